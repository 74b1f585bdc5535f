//! Runtime configuration for a simulation run.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use rescue_core::constants::*;
use rescue_core::enums::{HazardPolicy, ResourceKind, VehicleClass};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse configuration: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    pub map: MapConfig,
    pub population: PopulationConfig,
    /// Vehicles fielded by each team, per class.
    pub fleet: BTreeMap<VehicleClass, u32>,
    pub hazard_policy: HazardPolicy,
    /// Ticks between mobile hazard toggles. Zero disables toggling.
    pub hazard_toggle_interval: u32,
    /// Move mobile hazards to a random free cell whenever they switch back on.
    pub relocate_mobile_hazards: bool,
    /// The match is declared finished after this many ticks.
    pub max_ticks: u64,
    /// Keep a replay frame for every tick with an observable change.
    pub record_replay: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            map: MapConfig::default(),
            population: PopulationConfig::default(),
            fleet: BTreeMap::from([
                (VehicleClass::Jeep, 3),
                (VehicleClass::Motorcycle, 2),
                (VehicleClass::Truck, 2),
                (VehicleClass::Car, 3),
            ]),
            hazard_policy: HazardPolicy::default(),
            hazard_toggle_interval: HAZARD_TOGGLE_INTERVAL_TICKS,
            relocate_mobile_hazards: true,
            max_ticks: DEFAULT_MAX_TICKS,
            record_replay: false,
        }
    }
}

impl SimConfig {
    /// Parse a JSON document. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let map = &self.map;
        if map.width < 3 || map.height < 1 || map.tile_size < 1 {
            return Err(ConfigError::Invalid(format!(
                "map {}x{} with tile size {} is too small",
                map.width, map.height, map.tile_size
            )));
        }
        if map.base_radius as i32 * 2 + 1 >= map.width {
            return Err(ConfigError::Invalid(format!(
                "bases of radius {} overlap on a map {} cells wide",
                map.base_radius, map.width
            )));
        }
        if self.max_ticks == 0 {
            return Err(ConfigError::Invalid("max_ticks must be positive".into()));
        }
        Ok(())
    }

    /// Total vehicles per team.
    pub fn fleet_size(&self) -> u32 {
        self.fleet.values().sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub width: i32,
    pub height: i32,
    pub tile_size: i32,
    pub base_radius: u32,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            width: GRID_WIDTH,
            height: GRID_HEIGHT,
            tile_size: TILE_SIZE,
            base_radius: BASE_RADIUS,
        }
    }
}

/// How many of each object the random world setup places.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopulationConfig {
    pub obstacles: u32,
    pub persons: u32,
    pub clothing: u32,
    pub food: u32,
    pub medicine: u32,
    pub weapons: u32,
    pub hazards_per_kind: u32,
}

impl PopulationConfig {
    pub fn count(&self, kind: ResourceKind) -> u32 {
        match kind {
            ResourceKind::Person => self.persons,
            ResourceKind::Clothing => self.clothing,
            ResourceKind::Food => self.food,
            ResourceKind::Medicine => self.medicine,
            ResourceKind::Weapon => self.weapons,
        }
    }
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            obstacles: NUM_OBSTACLES,
            persons: NUM_PERSONS,
            clothing: NUM_CLOTHING,
            food: NUM_FOOD,
            medicine: NUM_MEDICINE,
            weapons: NUM_WEAPONS,
            hazards_per_kind: HAZARDS_PER_KIND,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_fleet_is_ten_per_team() {
        assert_eq!(SimConfig::default().fleet_size(), 10);
    }

    #[test]
    fn test_from_json_fills_defaults() {
        let config = SimConfig::from_json(r#"{ "seed": 7, "hazard_policy": "Traverse" }"#).unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.hazard_policy, HazardPolicy::Traverse);
        assert_eq!(config.map, MapConfig::default());
        assert_eq!(config.population.count(ResourceKind::Clothing), NUM_CLOTHING);
    }

    #[test]
    fn test_from_json_parses_fleet() {
        let config = SimConfig::from_json(r#"{ "fleet": { "Truck": 4 } }"#).unwrap();
        assert_eq!(config.fleet_size(), 4);
        assert_eq!(config.fleet.get(&VehicleClass::Truck), Some(&4));
    }

    #[test]
    fn test_from_json_rejects_tiny_map() {
        let err = SimConfig::from_json(r#"{ "map": { "width": 2 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)), "{err}");
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        let err = SimConfig::from_json("{ seed: ").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }
}
