//! Class-specific vehicle profiles.
//!
//! Consolidates per-class capacity, trip budget and cargo rules.

use rescue_core::enums::{ResourceKind, VehicleClass};

const EVERYTHING: &[ResourceKind] = &ResourceKind::ALL;
const PERSONS_ONLY: &[ResourceKind] = &[ResourceKind::Person];
const NO_WEAPONS: &[ResourceKind] = &[
    ResourceKind::Person,
    ResourceKind::Clothing,
    ResourceKind::Food,
    ResourceKind::Medicine,
];

/// Static parameters of a vehicle class.
#[derive(Debug, Clone, Copy)]
pub struct VehicleProfile {
    /// Maximum number of cargo items on board.
    pub capacity: usize,
    /// Round trips available before a mandatory return.
    pub max_trips: u32,
    /// Resource kinds this class may pick up.
    pub allowed: &'static [ResourceKind],
    /// Distance penalty in the value/distance score.
    pub value_weight: f64,
    /// Head home as soon as anything is on board.
    pub return_when_loaded: bool,
}

impl VehicleProfile {
    pub fn can_carry(&self, kind: ResourceKind) -> bool {
        self.allowed.contains(&kind)
    }
}

/// Get the profile for a given class.
pub fn get_profile(class: VehicleClass) -> VehicleProfile {
    match class {
        VehicleClass::Jeep => VehicleProfile {
            capacity: 3,
            max_trips: 2,
            allowed: EVERYTHING,
            value_weight: 0.3,
            return_when_loaded: false,
        },
        VehicleClass::Motorcycle => VehicleProfile {
            capacity: 1,
            max_trips: 1,
            allowed: PERSONS_ONLY,
            value_weight: 1.0,
            return_when_loaded: true,
        },
        VehicleClass::Truck => VehicleProfile {
            capacity: 5,
            max_trips: 3,
            allowed: EVERYTHING,
            value_weight: 0.15,
            return_when_loaded: false,
        },
        VehicleClass::Car => VehicleProfile {
            capacity: 2,
            max_trips: 1,
            allowed: NO_WEAPONS,
            value_weight: 0.5,
            return_when_loaded: true,
        },
    }
}
