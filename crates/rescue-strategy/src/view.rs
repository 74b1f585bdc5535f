//! Read-only window onto the world, and the decision inputs and outputs.

use glam::Vec2;

use rescue_core::enums::{ResourceKind, Team, VehicleClass};
use rescue_core::types::{Cell, HazardId, ResourceId, VehicleId};

/// What a rule decided the vehicle should do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Travel to a cell.
    Move(Cell),
    /// Travel to a resource and pick it up on arrival.
    Collect { resource: ResourceId, cell: Cell },
    /// Head home and deliver.
    ReturnToBase,
}

/// The deciding vehicle, as plain data.
#[derive(Debug, Clone, Copy)]
pub struct DecisionContext {
    pub id: VehicleId,
    pub team: Team,
    pub class: VehicleClass,
    pub cell: Cell,
    pub cargo_len: usize,
    pub trips_remaining: u32,
    pub at_base: bool,
}

/// A resource as seen by a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceSighting {
    pub id: ResourceId,
    pub kind: ResourceKind,
    pub cell: Cell,
    pub value: u32,
}

/// An active hazard as seen by a decision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HazardSighting {
    pub id: HazardId,
    /// Pixel center.
    pub center: Vec2,
    pub radius: f32,
}

/// Query surface available to rules. Implementors must not expose any way
/// to mutate the world; the simulation builds one per deciding vehicle so
/// resource queries can already exclude targets that vehicle may not take.
pub trait WorldView {
    /// Map size in cells.
    fn dimensions(&self) -> (i32, i32);

    fn tile_size(&self) -> i32;

    /// Whether the deciding vehicle may plan through `cell`.
    fn is_walkable(&self, cell: Cell) -> bool;

    /// Whether `cell` belongs to any team's base.
    fn is_base_cell(&self, cell: Cell) -> bool;

    /// Closest resource of the given kinds by Manhattan distance. Ties go to
    /// the first in iteration order.
    fn nearest_resource(&self, from: Cell, kinds: &[ResourceKind]) -> Option<ResourceSighting>;

    /// Best resource by `value / (1 + distance * weight)` among those of the
    /// given kinds worth at least `min_value`.
    fn highest_value_resource(
        &self,
        from: Cell,
        kinds: &[ResourceKind],
        min_value: u32,
        weight: f64,
    ) -> Option<ResourceSighting>;

    /// Closest active hazard by pixel distance from the center of `from`.
    fn nearest_active_hazard(&self, from: Cell) -> Option<HazardSighting>;

    /// Closest live vehicle not on `team`.
    fn nearest_enemy(&self, team: Team, from: Cell) -> Option<Cell>;

    fn in_bounds(&self, cell: Cell) -> bool {
        let (w, h) = self.dimensions();
        cell.x >= 0 && cell.y >= 0 && cell.x < w && cell.y < h
    }

    fn cell_center(&self, cell: Cell) -> Vec2 {
        let tile = self.tile_size() as f32;
        Vec2::new(cell.x as f32 * tile, cell.y as f32 * tile) + Vec2::splat(tile / 2.0)
    }

    /// Cell containing `point`, clamped onto the map.
    fn point_to_cell(&self, point: Vec2) -> Cell {
        let (w, h) = self.dimensions();
        let tile = self.tile_size() as f32;
        let x = (point.x / tile).floor() as i32;
        let y = (point.y / tile).floor() as i32;
        Cell::new(x.clamp(0, w - 1), y.clamp(0, h - 1))
    }
}
