//! ResourceRegistry: live collectibles and their spatial index.

use std::collections::{BTreeMap, HashMap};

use rescue_core::components::Resource;
use rescue_core::enums::{CellState, ResourceKind};
use rescue_core::types::{Cell, ResourceId};
use rescue_grid::GridWorld;

/// Every resource still on the map, iterated in id order.
///
/// A resource lives in the registry and as a marker on the grid. [`take`]
/// removes both together, and only the first call for a given id succeeds.
///
/// [`take`]: ResourceRegistry::take
#[derive(Debug, Clone, Default)]
pub struct ResourceRegistry {
    items: BTreeMap<ResourceId, Resource>,
    by_cell: HashMap<Cell, ResourceId>,
    next_id: u32,
}

impl ResourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a new resource of catalogue value on a free cell.
    pub fn spawn(&mut self, kind: ResourceKind, cell: Cell, grid: &mut GridWorld) -> Option<ResourceId> {
        if !grid.is_free(cell) {
            return None;
        }
        let id = ResourceId(self.next_id);
        self.insert(
            Resource {
                id,
                kind,
                cell,
                value: kind.value(),
            },
            grid,
        );
        Some(id)
    }

    /// Insert an already-identified resource. The caller guarantees the id
    /// and cell are unused.
    pub(crate) fn insert(&mut self, resource: Resource, grid: &mut GridWorld) {
        grid.set_state(resource.cell, resource.kind.cell_state());
        self.next_id = self.next_id.max(resource.id.0 + 1);
        self.by_cell.insert(resource.cell, resource.id);
        self.items.insert(resource.id, resource);
    }

    pub fn get(&self, id: ResourceId) -> Option<&Resource> {
        self.items.get(&id)
    }

    pub fn resource_at(&self, cell: Cell) -> Option<&Resource> {
        self.by_cell.get(&cell).and_then(|id| self.items.get(id))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Resource> {
        self.items.values()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Closest resource of the given kinds by Manhattan distance, passing
    /// `filter`. Ties go to the lowest id.
    pub fn nearest<F>(&self, from: Cell, kinds: &[ResourceKind], filter: F) -> Option<&Resource>
    where
        F: Fn(&Resource) -> bool,
    {
        self.items
            .values()
            .filter(|r| kinds.contains(&r.kind) && filter(r))
            .min_by_key(|r| from.manhattan(r.cell))
    }

    /// Best resource by `value / (1 + distance * weight)` among those of the
    /// given kinds worth at least `min_value`. Ties go to the lowest id.
    pub fn highest_value<F>(
        &self,
        from: Cell,
        kinds: &[ResourceKind],
        min_value: u32,
        weight: f64,
        filter: F,
    ) -> Option<&Resource>
    where
        F: Fn(&Resource) -> bool,
    {
        let score = |r: &Resource| r.value as f64 / (1.0 + from.manhattan(r.cell) as f64 * weight);
        self.items
            .values()
            .filter(|r| kinds.contains(&r.kind) && r.value >= min_value && filter(r))
            .fold(None, |best: Option<(&Resource, f64)>, r| {
                let s = score(r);
                match best {
                    Some((_, b)) if b >= s => best,
                    _ => Some((r, s)),
                }
            })
            .map(|(r, _)| r)
    }

    /// Remove a resource and reset its grid cell. Returns `None` if another
    /// actor already took it.
    pub fn take(&mut self, id: ResourceId, grid: &mut GridWorld) -> Option<Resource> {
        let resource = self.items.remove(&id)?;
        self.by_cell.remove(&resource.cell);
        if matches!(grid.state(resource.cell), Some(CellState::Person | CellState::Goods)) {
            grid.set_state(resource.cell, CellState::Free);
        }
        Some(resource)
    }

    pub fn take_at(&mut self, cell: Cell, grid: &mut GridWorld) -> Option<Resource> {
        let id = *self.by_cell.get(&cell)?;
        self.take(id, grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (GridWorld, ResourceRegistry) {
        (GridWorld::new(10, 10, 30), ResourceRegistry::new())
    }

    #[test]
    fn test_spawn_marks_grid() {
        let (mut grid, mut reg) = setup();
        let id = reg.spawn(ResourceKind::Person, Cell::new(2, 3), &mut grid).unwrap();
        assert_eq!(grid.state(Cell::new(2, 3)), Some(CellState::Person));
        assert_eq!(reg.resource_at(Cell::new(2, 3)).map(|r| r.id), Some(id));

        reg.spawn(ResourceKind::Food, Cell::new(4, 4), &mut grid).unwrap();
        assert_eq!(grid.state(Cell::new(4, 4)), Some(CellState::Goods));
    }

    #[test]
    fn test_spawn_refuses_occupied_cell() {
        let (mut grid, mut reg) = setup();
        grid.set_state(Cell::new(1, 1), CellState::Obstacle);
        assert!(reg.spawn(ResourceKind::Food, Cell::new(1, 1), &mut grid).is_none());
        reg.spawn(ResourceKind::Food, Cell::new(2, 2), &mut grid).unwrap();
        assert!(reg.spawn(ResourceKind::Food, Cell::new(2, 2), &mut grid).is_none());
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn test_take_is_idempotent() {
        let (mut grid, mut reg) = setup();
        let id = reg.spawn(ResourceKind::Medicine, Cell::new(5, 5), &mut grid).unwrap();
        let taken = reg.take(id, &mut grid).unwrap();
        assert_eq!(taken.value, 20);
        assert_eq!(grid.state(Cell::new(5, 5)), Some(CellState::Free));
        assert!(reg.resource_at(Cell::new(5, 5)).is_none());
        assert!(reg.take(id, &mut grid).is_none());
        assert!(reg.take_at(Cell::new(5, 5), &mut grid).is_none());
        assert!(reg.is_empty());
    }

    #[test]
    fn test_nearest_ties_go_to_lowest_id() {
        let (mut grid, mut reg) = setup();
        let first = reg.spawn(ResourceKind::Food, Cell::new(7, 5), &mut grid).unwrap();
        reg.spawn(ResourceKind::Food, Cell::new(3, 5), &mut grid).unwrap();
        let found = reg.nearest(Cell::new(5, 5), &[ResourceKind::Food], |_| true).unwrap();
        assert_eq!(found.id, first);
    }

    #[test]
    fn test_nearest_respects_kinds_and_filter() {
        let (mut grid, mut reg) = setup();
        reg.spawn(ResourceKind::Weapon, Cell::new(1, 0), &mut grid).unwrap();
        let person = reg.spawn(ResourceKind::Person, Cell::new(2, 0), &mut grid).unwrap();
        let far = reg.spawn(ResourceKind::Person, Cell::new(9, 9), &mut grid).unwrap();
        let from = Cell::new(0, 0);
        assert_eq!(reg.nearest(from, &[ResourceKind::Person], |_| true).unwrap().id, person);
        let skip = reg.get(person).unwrap().cell;
        assert_eq!(
            reg.nearest(from, &[ResourceKind::Person], |r| r.cell != skip).unwrap().id,
            far
        );
        assert!(reg.nearest(from, &[ResourceKind::Clothing], |_| true).is_none());
    }

    #[test]
    fn test_highest_value_trades_value_for_distance() {
        let (mut grid, mut reg) = setup();
        let food = reg.spawn(ResourceKind::Food, Cell::new(1, 0), &mut grid).unwrap();
        let person = reg.spawn(ResourceKind::Person, Cell::new(9, 0), &mut grid).unwrap();
        let from = Cell::new(0, 0);
        // 50 / (1 + 9 * 0.3) = 13.5 beats 10 / 1.3 = 7.7.
        let best = reg.highest_value(from, &ResourceKind::ALL, 0, 0.3, |_| true).unwrap();
        assert_eq!(best.id, person);
        // 50 / (1 + 9 * 5) = 1.09 loses to 10 / 6 = 1.67.
        let best = reg.highest_value(from, &ResourceKind::ALL, 0, 5.0, |_| true).unwrap();
        assert_eq!(best.id, food);
        assert!(reg.highest_value(from, &[ResourceKind::Food], 11, 0.3, |_| true).is_none());
    }
}
