//! HazardField: mines, their areas of effect, toggling and detonation.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use rand::Rng;

use rescue_core::components::Hazard;
use rescue_core::constants::STRIP_HALF_WIDTH;
use rescue_core::enums::{CellState, HazardKind, HazardShape};
use rescue_core::events::SimEvent;
use rescue_core::types::{Cell, HazardId};
use rescue_grid::GridWorld;

use crate::world::random_free_cell;

/// Cells cleared by one detonation, computed before anything is destroyed.
#[derive(Debug, Clone, PartialEq)]
pub struct Blast {
    pub hazard: HazardId,
    pub kind: HazardKind,
    pub center: Cell,
    pub cells: BTreeSet<Cell>,
}

#[derive(Debug, Clone, Default)]
pub struct HazardField {
    hazards: BTreeMap<HazardId, Hazard>,
    next_id: u32,
}

impl HazardField {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm a new hazard on a free cell.
    pub fn spawn(
        &mut self,
        kind: HazardKind,
        cell: Cell,
        radius: f32,
        grid: &mut GridWorld,
    ) -> Option<HazardId> {
        if !grid.is_free(cell) {
            return None;
        }
        let id = HazardId(self.next_id);
        self.insert(
            Hazard {
                id,
                kind,
                cell,
                radius,
                active: true,
                toggle_timer: 0,
            },
            grid,
        );
        Some(id)
    }

    /// Insert an already-identified hazard; only active hazards mark the grid.
    pub(crate) fn insert(&mut self, hazard: Hazard, grid: &mut GridWorld) {
        if hazard.active {
            grid.set_state(hazard.cell, CellState::Hazard);
        }
        self.next_id = self.next_id.max(hazard.id.0 + 1);
        self.hazards.insert(hazard.id, hazard);
    }

    pub fn get(&self, id: HazardId) -> Option<&Hazard> {
        self.hazards.get(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Hazard> {
        self.hazards.values()
    }

    pub fn active(&self) -> impl Iterator<Item = &Hazard> {
        self.hazards.values().filter(|h| h.active)
    }

    pub fn len(&self) -> usize {
        self.hazards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hazards.is_empty()
    }

    /// Whether the pixel center of `cell` lies inside the hazard's shape.
    pub fn covers(hazard: &Hazard, cell: Cell, grid: &GridWorld) -> bool {
        let d = grid.cell_center(cell) - grid.cell_center(hazard.cell);
        match hazard.kind.shape() {
            HazardShape::Circle => d.length() <= hazard.radius,
            HazardShape::HorizontalStrip => {
                d.x.abs() <= hazard.radius && d.y.abs() <= STRIP_HALF_WIDTH
            }
            HazardShape::VerticalStrip => {
                d.y.abs() <= hazard.radius && d.x.abs() <= STRIP_HALF_WIDTH
            }
        }
    }

    /// In-bounds cells inside the hazard's area, scanning a bounding box of
    /// `ceil(radius / tile)` cells around it, never wider than the map.
    pub fn affected_cells(hazard: &Hazard, grid: &GridWorld) -> BTreeSet<Cell> {
        let max_reach = grid.width().max(grid.height());
        let reach = (hazard.radius / grid.tile_size() as f32)
            .ceil()
            .clamp(0.0, max_reach as f32) as i32;
        let mut cells = BTreeSet::new();
        for dy in -reach..=reach {
            for dx in -reach..=reach {
                let cell = hazard.cell.offset(dx, dy);
                if grid.in_bounds(cell) && Self::covers(hazard, cell, grid) {
                    cells.insert(cell);
                }
            }
        }
        cells
    }

    /// First active hazard (by id) whose area contains `cell`.
    pub fn trigger_at(&self, cell: Cell, grid: &GridWorld) -> Option<HazardId> {
        self.active()
            .find(|h| Self::covers(h, cell, grid))
            .map(|h| h.id)
    }

    /// Union of the areas of all active hazards.
    pub fn danger_cells(&self, grid: &GridWorld) -> HashSet<Cell> {
        self.active()
            .flat_map(|h| Self::affected_cells(h, grid))
            .collect()
    }

    /// Advance mobile hazard timers, flipping those that reach `interval`.
    /// A hazard switching back on moves to a random placeable cell when
    /// `relocate` is set.
    pub fn tick<R, F>(
        &mut self,
        grid: &mut GridWorld,
        rng: &mut R,
        interval: u32,
        relocate: bool,
        is_placeable: F,
    ) -> Vec<SimEvent>
    where
        R: Rng,
        F: Fn(Cell) -> bool,
    {
        let mut events = Vec::new();
        if interval == 0 {
            return events;
        }

        let mut occupied: BTreeSet<Cell> = self.hazards.values().map(|h| h.cell).collect();
        for hazard in self.hazards.values_mut().filter(|h| h.kind.is_mobile()) {
            hazard.toggle_timer += 1;
            if hazard.toggle_timer < interval {
                continue;
            }
            hazard.toggle_timer = 0;

            if hazard.active {
                hazard.active = false;
                if grid.state(hazard.cell) == Some(CellState::Hazard) {
                    grid.set_state(hazard.cell, CellState::Free);
                }
            } else {
                if relocate {
                    let to = random_free_cell(grid, rng, |c| {
                        !occupied.contains(&c) && is_placeable(c)
                    });
                    if let Some(to) = to {
                        let from = hazard.cell;
                        occupied.remove(&from);
                        occupied.insert(to);
                        hazard.cell = to;
                        events.push(SimEvent::HazardRelocated {
                            hazard: hazard.id,
                            from,
                            to,
                        });
                    }
                }
                hazard.active = true;
                if grid.is_free(hazard.cell) {
                    grid.set_state(hazard.cell, CellState::Hazard);
                }
            }
            events.push(SimEvent::HazardToggled {
                hazard: hazard.id,
                active: hazard.active,
            });
        }
        events
    }

    /// Move every active mobile hazard to a random placeable cell.
    pub fn relocate_mobile<R, F>(&mut self, grid: &mut GridWorld, rng: &mut R, is_placeable: F) -> Vec<SimEvent>
    where
        R: Rng,
        F: Fn(Cell) -> bool,
    {
        let mut events = Vec::new();
        let mut occupied: BTreeSet<Cell> = self.hazards.values().map(|h| h.cell).collect();
        for hazard in self
            .hazards
            .values_mut()
            .filter(|h| h.active && h.kind.is_mobile())
        {
            let Some(to) = random_free_cell(grid, rng, |c| !occupied.contains(&c) && is_placeable(c))
            else {
                continue;
            };
            let from = hazard.cell;
            if grid.state(from) == Some(CellState::Hazard) {
                grid.set_state(from, CellState::Free);
            }
            grid.set_state(to, CellState::Hazard);
            occupied.remove(&from);
            occupied.insert(to);
            hazard.cell = to;
            events.push(SimEvent::HazardRelocated {
                hazard: hazard.id,
                from,
                to,
            });
        }
        events
    }

    /// Detonate and remove a hazard, resetting every affected cell to Free
    /// except those still holding another hazard. Returns `None` if the
    /// hazard is already gone.
    pub fn detonate(&mut self, id: HazardId, grid: &mut GridWorld) -> Option<Blast> {
        let hazard = self.hazards.remove(&id)?;
        let cells = Self::affected_cells(&hazard, grid);
        let survivors: HashSet<Cell> = self.hazards.values().map(|h| h.cell).collect();
        for cell in &cells {
            if !survivors.contains(cell) {
                grid.set_state(*cell, CellState::Free);
            }
        }
        if !survivors.contains(&hazard.cell) {
            grid.set_state(hazard.cell, CellState::Free);
        }
        Some(Blast {
            hazard: id,
            kind: hazard.kind,
            center: hazard.cell,
            cells,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn grid() -> GridWorld {
        GridWorld::new(10, 10, 30)
    }

    #[test]
    fn test_default_radius_covers_own_cell_only() {
        let mut grid = grid();
        let mut field = HazardField::new();
        for (i, kind) in HazardKind::ALL.into_iter().enumerate() {
            let cell = Cell::new(i as i32 * 2, 5);
            let id = field.spawn(kind, cell, kind.default_radius(), &mut grid).unwrap();
            let cells = HazardField::affected_cells(field.get(id).unwrap(), &grid);
            assert_eq!(cells, BTreeSet::from([cell]), "{kind:?}");
        }
    }

    #[test]
    fn test_circle_area() {
        let mut grid = grid();
        let mut field = HazardField::new();
        let id = field
            .spawn(HazardKind::LargeCircle, Cell::new(5, 5), 40.0, &mut grid)
            .unwrap();
        let cells = HazardField::affected_cells(field.get(id).unwrap(), &grid);
        // Orthogonal neighbours are 30 px away, diagonals 42.4 px.
        assert_eq!(cells.len(), 5);
        assert!(cells.contains(&Cell::new(5, 4)));
        assert!(!cells.contains(&Cell::new(6, 6)));
    }

    #[test]
    fn test_oversized_radius_scans_at_most_the_map() {
        let mut grid = grid();
        let mut field = HazardField::new();
        let id = field
            .spawn(HazardKind::LargeCircle, Cell::new(5, 5), 3.0e9, &mut grid)
            .unwrap();
        let cells = HazardField::affected_cells(field.get(id).unwrap(), &grid);
        assert_eq!(cells.len(), 100);
        assert_eq!(field.danger_cells(&grid).len(), 100);
    }

    #[test]
    fn test_strip_areas() {
        let mut grid = grid();
        let mut field = HazardField::new();
        let h = field
            .spawn(HazardKind::HorizontalStrip, Cell::new(5, 5), 65.0, &mut grid)
            .unwrap();
        let v = field
            .spawn(HazardKind::VerticalStrip, Cell::new(1, 1), 30.0, &mut grid)
            .unwrap();
        let h_cells = HazardField::affected_cells(field.get(h).unwrap(), &grid);
        let expected: BTreeSet<Cell> = (3..=7).map(|x| Cell::new(x, 5)).collect();
        assert_eq!(h_cells, expected);
        let v_cells = HazardField::affected_cells(field.get(v).unwrap(), &grid);
        let expected: BTreeSet<Cell> = (0..=2).map(|y| Cell::new(1, y)).collect();
        assert_eq!(v_cells, expected);
    }

    #[test]
    fn test_area_clipped_at_map_edge() {
        let mut grid = grid();
        let mut field = HazardField::new();
        let id = field
            .spawn(HazardKind::LargeCircle, Cell::new(0, 0), 40.0, &mut grid)
            .unwrap();
        let cells = HazardField::affected_cells(field.get(id).unwrap(), &grid);
        assert_eq!(
            cells,
            BTreeSet::from([Cell::new(0, 0), Cell::new(1, 0), Cell::new(0, 1)])
        );
    }

    #[test]
    fn test_detonate_once() {
        let mut grid = grid();
        let mut field = HazardField::new();
        let id = field
            .spawn(HazardKind::SmallCircle, Cell::new(3, 3), 40.0, &mut grid)
            .unwrap();
        grid.set_state(Cell::new(3, 4), CellState::Goods);

        let blast = field.detonate(id, &mut grid).unwrap();
        assert_eq!(blast.center, Cell::new(3, 3));
        assert!(blast.cells.contains(&Cell::new(3, 4)));
        assert_eq!(grid.state(Cell::new(3, 3)), Some(CellState::Free));
        assert_eq!(grid.state(Cell::new(3, 4)), Some(CellState::Free));
        assert!(field.get(id).is_none());
        assert!(field.detonate(id, &mut grid).is_none());
    }

    #[test]
    fn test_detonation_spares_neighbouring_hazard_marker() {
        let mut grid = grid();
        let mut field = HazardField::new();
        let big = field
            .spawn(HazardKind::LargeCircle, Cell::new(3, 3), 40.0, &mut grid)
            .unwrap();
        let small = field
            .spawn(HazardKind::SmallCircle, Cell::new(4, 3), 5.0, &mut grid)
            .unwrap();
        field.detonate(big, &mut grid).unwrap();
        assert_eq!(grid.state(Cell::new(4, 3)), Some(CellState::Hazard));
        assert!(field.get(small).is_some());
    }

    #[test]
    fn test_trigger_ignores_inactive() {
        let mut grid = grid();
        let mut field = HazardField::new();
        let cell = Cell::new(2, 2);
        let id = field
            .spawn(HazardKind::MobileCircle, cell, 7.0, &mut grid)
            .unwrap();
        assert_eq!(field.trigger_at(cell, &grid), Some(id));
        assert!(field.danger_cells(&grid).contains(&cell));

        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let events = field.tick(&mut grid, &mut rng, 1, false, |_| true);
        assert_eq!(
            events,
            vec![SimEvent::HazardToggled {
                hazard: id,
                active: false
            }]
        );
        assert_eq!(field.trigger_at(cell, &grid), None);
        assert!(field.danger_cells(&grid).is_empty());
        assert_eq!(grid.state(cell), Some(CellState::Free));
    }

    #[test]
    fn test_mobile_toggle_cycle() {
        let mut grid = grid();
        let mut field = HazardField::new();
        let cell = Cell::new(2, 2);
        let mobile = field
            .spawn(HazardKind::MobileCircle, cell, 7.0, &mut grid)
            .unwrap();
        let fixed = field
            .spawn(HazardKind::LargeCircle, Cell::new(7, 7), 10.0, &mut grid)
            .unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        assert!(field.tick(&mut grid, &mut rng, 3, false, |_| true).is_empty());
        assert!(field.tick(&mut grid, &mut rng, 3, false, |_| true).is_empty());
        assert_eq!(field.tick(&mut grid, &mut rng, 3, false, |_| true).len(), 1);
        assert!(!field.get(mobile).unwrap().active);
        assert!(field.get(fixed).unwrap().active);

        for _ in 0..2 {
            field.tick(&mut grid, &mut rng, 3, false, |_| true);
        }
        let events = field.tick(&mut grid, &mut rng, 3, false, |_| true);
        assert_eq!(
            events,
            vec![SimEvent::HazardToggled {
                hazard: mobile,
                active: true
            }]
        );
        assert_eq!(grid.state(cell), Some(CellState::Hazard));
    }

    #[test]
    fn test_reactivation_relocates() {
        let mut grid = grid();
        let mut field = HazardField::new();
        let id = field
            .spawn(HazardKind::MobileCircle, Cell::new(2, 2), 7.0, &mut grid)
            .unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        field.tick(&mut grid, &mut rng, 1, true, |_| true);
        let events = field.tick(&mut grid, &mut rng, 1, true, |c| c.x >= 5);

        let moved_to = field.get(id).unwrap().cell;
        assert!(moved_to.x >= 5);
        assert_eq!(grid.state(moved_to), Some(CellState::Hazard));
        assert_eq!(grid.state(Cell::new(2, 2)), Some(CellState::Free));
        assert!(matches!(events[0], SimEvent::HazardRelocated { .. }));
    }

    #[test]
    fn test_relocate_mobile_on_demand() {
        let mut grid = grid();
        let mut field = HazardField::new();
        let id = field
            .spawn(HazardKind::MobileCircle, Cell::new(2, 2), 7.0, &mut grid)
            .unwrap();
        field
            .spawn(HazardKind::SmallCircle, Cell::new(3, 3), 5.0, &mut grid)
            .unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let events = field.relocate_mobile(&mut grid, &mut rng, |c| c.y >= 6);
        assert_eq!(events.len(), 1);
        let cell = field.get(id).unwrap().cell;
        assert!(cell.y >= 6);
        assert_eq!(grid.state(cell), Some(CellState::Hazard));
        assert_eq!(grid.state(Cell::new(2, 2)), Some(CellState::Free));
        assert_eq!(grid.state(Cell::new(3, 3)), Some(CellState::Hazard));
    }
}
