//! Observable events emitted by the simulation.
//!
//! A tick that emits at least one event is an observable change and is
//! recorded as a replay frame.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::{Cell, HazardId, ResourceId, VehicleId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    /// A mobile hazard switched on or off.
    HazardToggled { hazard: HazardId, active: bool },
    /// A mobile hazard moved to a new cell.
    HazardRelocated {
        hazard: HazardId,
        from: Cell,
        to: Cell,
    },
    /// A hazard detonated, clearing `cells` grid cells.
    HazardDetonated {
        hazard: HazardId,
        center: Cell,
        cells: usize,
    },
    VehicleDestroyed {
        vehicle: VehicleId,
        team: Team,
        cell: Cell,
        cause: DeathCause,
    },
    ResourceCollected {
        vehicle: VehicleId,
        resource: ResourceId,
        kind: ResourceKind,
        value: u32,
    },
    CargoDelivered {
        vehicle: VehicleId,
        team: Team,
        items: usize,
        value: u32,
    },
    /// The vehicle was ordered home and will no longer decide for itself.
    ForcedReturn { vehicle: VehicleId },
}
