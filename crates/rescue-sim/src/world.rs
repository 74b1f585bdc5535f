//! The shared map state every system reads and mutates.

use rand::Rng;

use rescue_core::constants::PLACEMENT_ATTEMPTS;
use rescue_core::enums::Team;
use rescue_core::types::{Base, Cell};
use rescue_grid::GridWorld;

use crate::hazards::HazardField;
use crate::resources::ResourceRegistry;

/// Grid, collectibles, hazards and bases. Vehicles live beside it in the
/// engine so systems can borrow the map and the fleet separately.
#[derive(Debug, Clone)]
pub struct World {
    pub grid: GridWorld,
    pub resources: ResourceRegistry,
    pub hazards: HazardField,
    pub bases: Vec<Base>,
}

impl World {
    pub fn new(grid: GridWorld) -> Self {
        Self {
            grid,
            resources: ResourceRegistry::new(),
            hazards: HazardField::new(),
            bases: Vec::new(),
        }
    }

    pub fn base(&self, team: Team) -> Option<&Base> {
        self.bases.iter().find(|b| b.team == team)
    }

    /// Whether `cell` belongs to any team's base.
    pub fn is_base_cell(&self, cell: Cell) -> bool {
        self.bases.iter().any(|b| b.contains(cell))
    }

    pub fn in_own_base(&self, team: Team, cell: Cell) -> bool {
        self.base(team).is_some_and(|b| b.contains(cell))
    }

    /// Walkable cell of `team`'s base closest to `from`, ties broken by row
    /// then column.
    pub fn home_cell(&self, team: Team, from: Cell) -> Option<Cell> {
        let base = self.base(team)?;
        let r = base.radius as i32;
        let mut best: Option<(u32, i32, i32)> = None;
        for y in base.anchor.y - r..=base.anchor.y + r {
            for x in base.anchor.x - r..=base.anchor.x + r {
                let cell = Cell::new(x, y);
                if !self.grid.is_walkable(cell) {
                    continue;
                }
                let key = (from.manhattan(cell), y, x);
                if best.map_or(true, |b| key < b) {
                    best = Some(key);
                }
            }
        }
        best.map(|(_, y, x)| Cell::new(x, y))
    }
}

/// Random free cell passing `accept`, or `None` after
/// `PLACEMENT_ATTEMPTS` misses.
pub(crate) fn random_free_cell<R, F>(grid: &GridWorld, rng: &mut R, accept: F) -> Option<Cell>
where
    R: Rng,
    F: Fn(Cell) -> bool,
{
    for _ in 0..PLACEMENT_ATTEMPTS {
        let cell = Cell::new(
            rng.gen_range(0..grid.width()),
            rng.gen_range(0..grid.height()),
        );
        if grid.is_free(cell) && accept(cell) {
            return Some(cell);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use rescue_core::enums::CellState;

    fn world_with_base(anchor: Cell, radius: u32) -> World {
        let mut world = World::new(GridWorld::new(10, 10, 30));
        world.bases.push(Base {
            team: Team::PlayerOne,
            anchor,
            radius,
        });
        world
    }

    #[test]
    fn test_home_cell_picks_closest_base_cell() {
        let world = world_with_base(Cell::new(0, 5), 1);
        assert_eq!(world.home_cell(Team::PlayerOne, Cell::new(9, 5)), Some(Cell::new(1, 5)));
        assert_eq!(world.home_cell(Team::PlayerOne, Cell::new(0, 0)), Some(Cell::new(0, 4)));
        assert_eq!(world.home_cell(Team::PlayerTwo, Cell::new(0, 0)), None);
    }

    #[test]
    fn test_home_cell_skips_obstacles_and_off_map() {
        let mut world = world_with_base(Cell::new(0, 0), 1);
        world.grid.set_state(Cell::new(1, 1), CellState::Obstacle);
        assert_eq!(world.home_cell(Team::PlayerOne, Cell::new(5, 5)), Some(Cell::new(1, 0)));
    }

    #[test]
    fn test_base_membership() {
        let world = world_with_base(Cell::new(0, 5), 1);
        assert!(world.is_base_cell(Cell::new(1, 6)));
        assert!(world.in_own_base(Team::PlayerOne, Cell::new(0, 4)));
        assert!(!world.in_own_base(Team::PlayerTwo, Cell::new(0, 4)));
        assert!(!world.is_base_cell(Cell::new(2, 5)));
    }
}
