//! A* route planning over a [`GridWorld`].
//!
//! Unit step cost, Manhattan heuristic, 4-connected moves. The open set is a
//! binary heap keyed by `(f, h, y, x)` so equal-cost frontiers always expand
//! in the same order and routes are reproducible.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use rescue_core::types::Cell;

use crate::grid::GridWorld;

/// Plan a route from `start` to `goal`, both inclusive.
///
/// `is_blocked` lets the caller exclude extra cells (reserved or hazardous)
/// on top of the grid's own obstacles; it is never consulted for `start`.
/// Returns `None` when the goal is out of bounds, blocked, or unreachable,
/// and `Some(vec![start])` when `start == goal`.
pub fn find_path<F>(grid: &GridWorld, start: Cell, goal: Cell, mut is_blocked: F) -> Option<Vec<Cell>>
where
    F: FnMut(Cell) -> bool,
{
    if !grid.in_bounds(start) || !grid.in_bounds(goal) {
        return None;
    }
    if start == goal {
        return Some(vec![start]);
    }
    if !grid.is_walkable(goal) || is_blocked(goal) {
        return None;
    }

    let width = grid.width() as usize;
    let cell_count = width * grid.height() as usize;
    let index = |c: Cell| c.y as usize * width + c.x as usize;

    let mut best_cost = vec![u32::MAX; cell_count];
    let mut came_from: Vec<Option<Cell>> = vec![None; cell_count];
    let mut open = BinaryHeap::new();

    best_cost[index(start)] = 0;
    let h0 = start.manhattan(goal);
    open.push(Reverse((h0, h0, start.y, start.x, 0u32)));

    while let Some(Reverse((_f, _h, y, x, cost))) = open.pop() {
        let current = Cell::new(x, y);
        if cost > best_cost[index(current)] {
            // Stale entry superseded by a cheaper one.
            continue;
        }
        if current == goal {
            return Some(reconstruct(&came_from, index, start, goal));
        }

        let next_cost = cost + 1;
        for neighbor in grid.neighbors(current) {
            if is_blocked(neighbor) {
                continue;
            }
            let ni = index(neighbor);
            if next_cost < best_cost[ni] {
                best_cost[ni] = next_cost;
                came_from[ni] = Some(current);
                let h = neighbor.manhattan(goal);
                open.push(Reverse((next_cost + h, h, neighbor.y, neighbor.x, next_cost)));
            }
        }
    }

    None
}

fn reconstruct(
    came_from: &[Option<Cell>],
    index: impl Fn(Cell) -> usize,
    start: Cell,
    goal: Cell,
) -> Vec<Cell> {
    let mut path = vec![goal];
    let mut current = goal;
    while current != start {
        match came_from[index(current)] {
            Some(prev) => {
                path.push(prev);
                current = prev;
            }
            None => break,
        }
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use rescue_core::enums::CellState;

    fn open_grid(w: i32, h: i32) -> GridWorld {
        GridWorld::new(w, h, 30)
    }

    fn assert_chain(path: &[Cell]) {
        for pair in path.windows(2) {
            assert!(
                pair[0].is_adjacent(pair[1]),
                "{} -> {} is not a single step",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn test_open_grid_path_length_is_manhattan() {
        let grid = open_grid(12, 9);
        let pairs = [
            (Cell::new(0, 0), Cell::new(11, 8)),
            (Cell::new(5, 4), Cell::new(0, 8)),
            (Cell::new(3, 3), Cell::new(3, 7)),
            (Cell::new(10, 1), Cell::new(2, 1)),
        ];
        for (start, goal) in pairs {
            let path = find_path(&grid, start, goal, |_| false).unwrap();
            assert_eq!(path.first(), Some(&start));
            assert_eq!(path.last(), Some(&goal));
            assert_eq!(path.len() as u32 - 1, start.manhattan(goal));
            assert_chain(&path);
        }
    }

    #[test]
    fn test_start_equals_goal() {
        let grid = open_grid(3, 3);
        let path = find_path(&grid, Cell::new(1, 1), Cell::new(1, 1), |_| true).unwrap();
        assert_eq!(path, vec![Cell::new(1, 1)]);
    }

    #[test]
    fn test_enclosed_goal_has_no_path() {
        let mut grid = open_grid(7, 7);
        let goal = Cell::new(3, 3);
        for dx in -1..=1 {
            for dy in -1..=1 {
                if dx != 0 || dy != 0 {
                    grid.set_state(goal.offset(dx, dy), CellState::Obstacle);
                }
            }
        }
        assert!(find_path(&grid, Cell::new(0, 0), goal, |_| false).is_none());
    }

    #[test]
    fn test_routes_around_wall() {
        let mut grid = open_grid(5, 5);
        // Vertical wall at x = 2 with a gap at the bottom.
        for y in 0..4 {
            grid.set_state(Cell::new(2, y), CellState::Obstacle);
        }
        let path = find_path(&grid, Cell::new(0, 0), Cell::new(4, 0), |_| false).unwrap();
        assert_chain(&path);
        assert!(path.contains(&Cell::new(2, 4)));
        assert_eq!(path.len(), 13);
    }

    #[test]
    fn test_blocked_goal_and_out_of_bounds() {
        let mut grid = open_grid(4, 4);
        grid.set_state(Cell::new(3, 3), CellState::Obstacle);
        assert!(find_path(&grid, Cell::new(0, 0), Cell::new(3, 3), |_| false).is_none());
        assert!(find_path(&grid, Cell::new(0, 0), Cell::new(4, 0), |_| false).is_none());
        assert!(find_path(&grid, Cell::new(0, 0), Cell::new(1, 1), |c| c == Cell::new(1, 1)).is_none());
    }

    #[test]
    fn test_caller_blocked_cells_are_avoided() {
        let grid = open_grid(3, 3);
        let forbidden = Cell::new(1, 0);
        let path = find_path(&grid, Cell::new(0, 0), Cell::new(2, 0), |c| c == forbidden).unwrap();
        assert!(!path.contains(&forbidden));
        assert_eq!(path.len(), 5);
    }

    #[test]
    fn test_hazard_cells_are_walkable_by_default() {
        let mut grid = open_grid(3, 1);
        grid.set_state(Cell::new(1, 0), CellState::Hazard);
        let path = find_path(&grid, Cell::new(0, 0), Cell::new(2, 0), |_| false).unwrap();
        assert_eq!(path.len(), 3);
    }

    #[test]
    fn test_routes_are_deterministic() {
        let grid = open_grid(9, 9);
        let a = find_path(&grid, Cell::new(0, 0), Cell::new(8, 8), |_| false);
        let b = find_path(&grid, Cell::new(0, 0), Cell::new(8, 8), |_| false);
        assert_eq!(a, b);
    }
}
