//! Read-only world view handed to the decision engine.

use std::collections::{BTreeSet, HashSet};

use rescue_core::components::Resource;
use rescue_core::enums::{HazardPolicy, ResourceKind, Team};
use rescue_core::types::{Cell, VehicleId};
use rescue_grid::ReservationTable;
use rescue_strategy::{HazardSighting, ResourceSighting, WorldView};

use crate::world::World;

/// Live vehicle position as seen by other vehicles' decisions.
#[derive(Debug, Clone, Copy)]
pub struct Sighting {
    pub id: VehicleId,
    pub team: Team,
    pub cell: Cell,
}

/// The world as seen by one deciding vehicle. Resources reserved by an ally
/// or marked unreachable for this vehicle are hidden, and under
/// [`HazardPolicy::Avoid`] hazard areas are not walkable.
pub struct SimView<'a> {
    pub world: &'a World,
    pub danger: &'a HashSet<Cell>,
    pub policy: HazardPolicy,
    pub reservations: &'a ReservationTable,
    pub vehicles: &'a [Sighting],
    pub vehicle: VehicleId,
    pub team: Team,
    pub avoid: &'a BTreeSet<Cell>,
}

impl SimView<'_> {
    fn visible(&self, resource: &Resource) -> bool {
        !self.avoid.contains(&resource.cell)
            && !self
                .reservations
                .is_blocked_for(self.team, self.vehicle, resource.cell)
    }
}

fn sighting(resource: &Resource) -> ResourceSighting {
    ResourceSighting {
        id: resource.id,
        kind: resource.kind,
        cell: resource.cell,
        value: resource.value,
    }
}

impl WorldView for SimView<'_> {
    fn dimensions(&self) -> (i32, i32) {
        (self.world.grid.width(), self.world.grid.height())
    }

    fn tile_size(&self) -> i32 {
        self.world.grid.tile_size()
    }

    fn is_walkable(&self, cell: Cell) -> bool {
        self.world.grid.is_walkable(cell)
            && (self.policy == HazardPolicy::Traverse || !self.danger.contains(&cell))
    }

    fn is_base_cell(&self, cell: Cell) -> bool {
        self.world.is_base_cell(cell)
    }

    fn nearest_resource(&self, from: Cell, kinds: &[ResourceKind]) -> Option<ResourceSighting> {
        self.world
            .resources
            .nearest(from, kinds, |r| self.visible(r))
            .map(sighting)
    }

    fn highest_value_resource(
        &self,
        from: Cell,
        kinds: &[ResourceKind],
        min_value: u32,
        weight: f64,
    ) -> Option<ResourceSighting> {
        self.world
            .resources
            .highest_value(from, kinds, min_value, weight, |r| self.visible(r))
            .map(sighting)
    }

    fn nearest_active_hazard(&self, from: Cell) -> Option<HazardSighting> {
        let grid = &self.world.grid;
        let here = grid.cell_center(from);
        self.world
            .hazards
            .active()
            .map(|h| (h, grid.cell_center(h.cell)))
            .fold(None, |best: Option<(HazardSighting, f32)>, (h, center)| {
                let d = here.distance(center);
                match best {
                    Some((_, b)) if b <= d => best,
                    _ => Some((
                        HazardSighting {
                            id: h.id,
                            center,
                            radius: h.radius,
                        },
                        d,
                    )),
                }
            })
            .map(|(h, _)| h)
    }

    fn nearest_enemy(&self, team: Team, from: Cell) -> Option<Cell> {
        self.vehicles
            .iter()
            .filter(|v| v.team != team)
            .min_by_key(|v| (from.manhattan(v.cell), v.id))
            .map(|v| v.cell)
    }
}
