//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

use crate::constants::*;

/// Occupancy state of a single grid cell. Exactly one per cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellState {
    #[default]
    Free,
    Obstacle,
    Person,
    Goods,
    Hazard,
}

/// Kind of collectible resource.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum ResourceKind {
    Person,
    Clothing,
    Food,
    Medicine,
    Weapon,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 5] = [
        ResourceKind::Person,
        ResourceKind::Clothing,
        ResourceKind::Food,
        ResourceKind::Medicine,
        ResourceKind::Weapon,
    ];

    /// Points realised when one unit of this kind is delivered.
    pub fn value(self) -> u32 {
        match self {
            ResourceKind::Person => POINTS_PERSON,
            ResourceKind::Clothing => POINTS_CLOTHING,
            ResourceKind::Food => POINTS_FOOD,
            ResourceKind::Medicine => POINTS_MEDICINE,
            ResourceKind::Weapon => POINTS_WEAPON,
        }
    }

    /// Grid marker written for a resource of this kind.
    pub fn cell_state(self) -> CellState {
        match self {
            ResourceKind::Person => CellState::Person,
            _ => CellState::Goods,
        }
    }
}

/// Area-of-effect shape of a hazard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HazardShape {
    Circle,
    /// Thin strip extending `radius` pixels east and west of the center.
    HorizontalStrip,
    /// Thin strip extending `radius` pixels north and south of the center.
    VerticalStrip,
}

/// Hazard ("mine") catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HazardKind {
    LargeCircle,
    SmallCircle,
    HorizontalStrip,
    VerticalStrip,
    /// Circular hazard that periodically switches on and off.
    MobileCircle,
}

impl HazardKind {
    pub const ALL: [HazardKind; 5] = [
        HazardKind::LargeCircle,
        HazardKind::SmallCircle,
        HazardKind::HorizontalStrip,
        HazardKind::VerticalStrip,
        HazardKind::MobileCircle,
    ];

    pub fn shape(self) -> HazardShape {
        match self {
            HazardKind::LargeCircle | HazardKind::SmallCircle | HazardKind::MobileCircle => {
                HazardShape::Circle
            }
            HazardKind::HorizontalStrip => HazardShape::HorizontalStrip,
            HazardKind::VerticalStrip => HazardShape::VerticalStrip,
        }
    }

    /// Default radius (or strip half-length) in pixels.
    pub fn default_radius(self) -> f32 {
        match self {
            HazardKind::LargeCircle => LARGE_CIRCLE_RADIUS,
            HazardKind::SmallCircle => SMALL_CIRCLE_RADIUS,
            HazardKind::HorizontalStrip => HORIZONTAL_STRIP_LENGTH,
            HazardKind::VerticalStrip => VERTICAL_STRIP_LENGTH,
            HazardKind::MobileCircle => MOBILE_CIRCLE_RADIUS,
        }
    }

    pub fn is_mobile(self) -> bool {
        matches!(self, HazardKind::MobileCircle)
    }
}

/// Competing fleet.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Team {
    PlayerOne,
    PlayerTwo,
}

impl Team {
    pub const ALL: [Team; 2] = [Team::PlayerOne, Team::PlayerTwo];

    pub fn opponent(self) -> Team {
        match self {
            Team::PlayerOne => Team::PlayerTwo,
            Team::PlayerTwo => Team::PlayerOne,
        }
    }
}

/// Vehicle class. Capacity, trip budget and cargo rules come from its profile.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum VehicleClass {
    /// Multi-cargo all-rounder.
    Jeep,
    /// Light, fast, single cargo, persons only.
    Motorcycle,
    /// Heavy multi-cargo hauler.
    Truck,
    /// Light two-slot carrier, no weapons.
    Car,
}

impl VehicleClass {
    pub const ALL: [VehicleClass; 4] = [
        VehicleClass::Jeep,
        VehicleClass::Motorcycle,
        VehicleClass::Truck,
        VehicleClass::Car,
    ];
}

/// Vehicle state machine phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum VehiclePhase {
    /// At base, empty, waiting for a decision.
    #[default]
    Idle,
    /// Out in the field following a decision.
    Traveling,
    /// Committed to a round trip home; trip budget already charged.
    Returning,
    /// Ordered home externally; decisions bypassed. Terminal once at base.
    ForcedReturning,
    Dead,
}

/// Top-level simulation state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimPhase {
    #[default]
    Running,
    Paused,
    Finished,
}

/// How the planner treats cells inside an active hazard's area.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum HazardPolicy {
    /// Hazard areas are blocked for planning.
    #[default]
    Avoid,
    /// Hazard areas are planned through; arrival still detonates.
    Traverse,
}

/// Why a vehicle was destroyed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    Hazard,
    Collision,
}
