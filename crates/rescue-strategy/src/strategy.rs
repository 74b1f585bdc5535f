//! Strategy identifiers and their rule tables.
//!
//! Team one plays cautiously (hazard evasion first); team two plays
//! aggressively (no evasion, rams and dodges enemies).

use std::fmt;

use rescue_core::constants::{HAZARD_DANGER_MARGIN, HIGH_VALUE_THRESHOLD};
use rescue_core::enums::{ResourceKind, Team, VehicleClass};

use crate::rules::Rule;

/// One rule list per (team, class). Serialized as its string key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrategyId {
    CautiousJeep,
    CautiousMotorcycle,
    CautiousTruck,
    CautiousCar,
    AggressiveJeep,
    FastMotorcycle,
    SupportTruck,
    BalancedCar,
}

impl StrategyId {
    pub const ALL: [StrategyId; 8] = [
        StrategyId::CautiousJeep,
        StrategyId::CautiousMotorcycle,
        StrategyId::CautiousTruck,
        StrategyId::CautiousCar,
        StrategyId::AggressiveJeep,
        StrategyId::FastMotorcycle,
        StrategyId::SupportTruck,
        StrategyId::BalancedCar,
    ];

    /// Default strategy for a vehicle of `class` fielded by `team`.
    pub fn for_vehicle(team: Team, class: VehicleClass) -> Self {
        match (team, class) {
            (Team::PlayerOne, VehicleClass::Jeep) => StrategyId::CautiousJeep,
            (Team::PlayerOne, VehicleClass::Motorcycle) => StrategyId::CautiousMotorcycle,
            (Team::PlayerOne, VehicleClass::Truck) => StrategyId::CautiousTruck,
            (Team::PlayerOne, VehicleClass::Car) => StrategyId::CautiousCar,
            (Team::PlayerTwo, VehicleClass::Jeep) => StrategyId::AggressiveJeep,
            (Team::PlayerTwo, VehicleClass::Motorcycle) => StrategyId::FastMotorcycle,
            (Team::PlayerTwo, VehicleClass::Truck) => StrategyId::SupportTruck,
            (Team::PlayerTwo, VehicleClass::Car) => StrategyId::BalancedCar,
        }
    }

    /// The class this strategy was written for.
    pub fn class(self) -> VehicleClass {
        match self {
            StrategyId::CautiousJeep | StrategyId::AggressiveJeep => VehicleClass::Jeep,
            StrategyId::CautiousMotorcycle | StrategyId::FastMotorcycle => {
                VehicleClass::Motorcycle
            }
            StrategyId::CautiousTruck | StrategyId::SupportTruck => VehicleClass::Truck,
            StrategyId::CautiousCar | StrategyId::BalancedCar => VehicleClass::Car,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            StrategyId::CautiousJeep => "cautious-jeep",
            StrategyId::CautiousMotorcycle => "cautious-motorcycle",
            StrategyId::CautiousTruck => "cautious-truck",
            StrategyId::CautiousCar => "cautious-car",
            StrategyId::AggressiveJeep => "aggressive-jeep",
            StrategyId::FastMotorcycle => "fast-motorcycle",
            StrategyId::SupportTruck => "support-truck",
            StrategyId::BalancedCar => "balanced-car",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        StrategyId::ALL.into_iter().find(|s| s.key() == key)
    }

    /// Ordered rule list. First rule that fires wins.
    pub fn rules(self) -> &'static [Rule] {
        match self {
            StrategyId::CautiousJeep => CAUTIOUS_JEEP,
            StrategyId::CautiousMotorcycle => CAUTIOUS_MOTORCYCLE,
            StrategyId::CautiousTruck => CAUTIOUS_TRUCK,
            StrategyId::CautiousCar => CAUTIOUS_CAR,
            StrategyId::AggressiveJeep => AGGRESSIVE_JEEP,
            StrategyId::FastMotorcycle => FAST_MOTORCYCLE,
            StrategyId::SupportTruck => SUPPORT_TRUCK,
            StrategyId::BalancedCar => BALANCED_CAR,
        }
    }
}

impl fmt::Display for StrategyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

const EVADE: Rule = Rule::EvadeHazards {
    margin: HAZARD_DANGER_MARGIN,
};

const CAUTIOUS_JEEP: &[Rule] = &[
    EVADE,
    Rule::ForcedReturn,
    Rule::SeekFromBase,
    Rule::SeekHighValue {
        kinds: None,
        min_value: HIGH_VALUE_THRESHOLD,
    },
    Rule::SeekNearest { kinds: None },
    Rule::Explore,
];

const CAUTIOUS_MOTORCYCLE: &[Rule] = &[
    EVADE,
    Rule::ReturnWhenLoaded,
    Rule::ForcedReturn,
    Rule::SeekFromBase,
    Rule::SeekNearest {
        kinds: Some(&[ResourceKind::Person]),
    },
    Rule::Explore,
];

const CAUTIOUS_TRUCK: &[Rule] = &[
    EVADE,
    Rule::ForcedReturn,
    Rule::SeekFromBase,
    Rule::SeekHighValue {
        kinds: None,
        min_value: 0,
    },
    Rule::Explore,
];

const CAUTIOUS_CAR: &[Rule] = &[
    EVADE,
    Rule::ReturnWhenLoaded,
    Rule::ForcedReturn,
    Rule::SeekFromBase,
    Rule::SeekHighValue {
        kinds: None,
        min_value: 0,
    },
    Rule::SeekNearest { kinds: None },
    Rule::Explore,
];

const AGGRESSIVE_JEEP: &[Rule] = &[
    Rule::ChaseEnemy { range: 1 },
    Rule::ForcedReturn,
    Rule::SeekFromBase,
    Rule::SeekHighValue {
        kinds: None,
        min_value: 0,
    },
    Rule::SeekNearest { kinds: None },
    Rule::Explore,
];

const FAST_MOTORCYCLE: &[Rule] = &[
    Rule::ReturnWhenLoaded,
    Rule::ForcedReturn,
    Rule::SeekFromBase,
    Rule::SeekNearest {
        kinds: Some(&[ResourceKind::Person]),
    },
    Rule::Explore,
];

const SUPPORT_TRUCK: &[Rule] = &[
    Rule::ForcedReturn,
    Rule::SeekFromBase,
    Rule::SeekHighValue {
        kinds: None,
        min_value: HIGH_VALUE_THRESHOLD,
    },
    Rule::SeekNearest { kinds: None },
    Rule::Explore,
];

const BALANCED_CAR: &[Rule] = &[
    Rule::ReturnWhenLoaded,
    Rule::ForcedReturn,
    Rule::AvoidEnemy { range: 1 },
    Rule::SeekFromBase,
    Rule::SeekHighValue {
        kinds: Some(&[ResourceKind::Person, ResourceKind::Medicine]),
        min_value: 0,
    },
    Rule::SeekNearest {
        kinds: Some(&[ResourceKind::Person, ResourceKind::Medicine]),
    },
    Rule::Explore,
];
