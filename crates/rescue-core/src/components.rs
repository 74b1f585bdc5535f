//! Plain-data entities owned by the simulation.
//!
//! Components carry no behavior. Queries and mutation live in the
//! registries and systems of the simulation crate.

use serde::{Deserialize, Serialize};

use crate::enums::{HazardKind, ResourceKind};
use crate::types::{Cell, HazardId, ResourceId};

/// A collectible lying on the map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub id: ResourceId,
    pub kind: ResourceKind,
    pub cell: Cell,
    pub value: u32,
}

/// One unit of cargo on board a vehicle. Value is reserved here and only
/// realised into score on delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cargo {
    pub kind: ResourceKind,
    pub value: u32,
}

impl Cargo {
    /// Rebuild cargo from its kind using the catalogue value.
    pub fn from_kind(kind: ResourceKind) -> Self {
        Self {
            kind,
            value: kind.value(),
        }
    }
}

/// An area-effect hazard ("mine").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hazard {
    pub id: HazardId,
    pub kind: HazardKind,
    pub cell: Cell,
    /// Radius for circles, half-length for strips (pixels).
    pub radius: f32,
    pub active: bool,
    /// Ticks since the last toggle (mobile hazards only).
    pub toggle_timer: u32,
}
