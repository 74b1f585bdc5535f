//! Hand-built scenarios for tests and demos.
//!
//! A scenario is turned into a [`FullState`] and loaded through the normal
//! snapshot path, so it gets the same validation as a save file.

use std::collections::BTreeMap;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use rescue_core::components::{Hazard, Resource};
use rescue_core::constants::TILE_SIZE;
use rescue_core::enums::*;
use rescue_core::state::{FullState, VehicleSnapshot, WorldState};
use rescue_core::types::{Base, Cell, HazardId, ResourceId, VehicleId};
use rescue_strategy::profiles::get_profile;
use rescue_strategy::StrategyId;

use crate::systems::snapshot::rng_state;

#[derive(Debug, Clone)]
pub struct Scenario {
    width: i32,
    height: i32,
    tile_size: i32,
    obstacles: Vec<Cell>,
    resources: Vec<Resource>,
    hazards: Vec<Hazard>,
    bases: Vec<Base>,
    vehicles: Vec<(Team, VehicleSnapshot)>,
}

impl Scenario {
    /// Empty map of the given size with the default tile size.
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            tile_size: TILE_SIZE,
            obstacles: Vec::new(),
            resources: Vec::new(),
            hazards: Vec::new(),
            bases: Vec::new(),
            vehicles: Vec::new(),
        }
    }

    pub fn tile_size(mut self, tile_size: i32) -> Self {
        self.tile_size = tile_size;
        self
    }

    pub fn obstacle(mut self, cell: Cell) -> Self {
        self.obstacles.push(cell);
        self
    }

    /// A resource worth its catalogue value.
    pub fn resource(mut self, kind: ResourceKind, cell: Cell) -> Self {
        self.resources.push(Resource {
            id: ResourceId(self.resources.len() as u32),
            kind,
            cell,
            value: kind.value(),
        });
        self
    }

    /// An armed hazard with the catalogue radius.
    pub fn hazard(self, kind: HazardKind, cell: Cell) -> Self {
        self.hazard_with_radius(kind, cell, kind.default_radius())
    }

    pub fn hazard_with_radius(mut self, kind: HazardKind, cell: Cell, radius: f32) -> Self {
        self.hazards.push(Hazard {
            id: HazardId(self.hazards.len() as u32),
            kind,
            cell,
            radius,
            active: true,
            toggle_timer: 0,
        });
        self
    }

    pub fn base(mut self, team: Team, anchor: Cell, radius: u32) -> Self {
        self.bases.push(Base {
            team,
            anchor,
            radius,
        });
        self
    }

    /// A fresh vehicle with the team's default strategy for its class.
    pub fn vehicle(self, team: Team, class: VehicleClass, cell: Cell) -> Self {
        self.vehicle_with_strategy(team, class, cell, StrategyId::for_vehicle(team, class))
    }

    pub fn vehicle_with_strategy(
        mut self,
        team: Team,
        class: VehicleClass,
        cell: Cell,
        strategy: StrategyId,
    ) -> Self {
        let snapshot = VehicleSnapshot {
            id: VehicleId(self.vehicles.len() as u32),
            class,
            strategy: strategy.key().to_string(),
            cell,
            phase: VehiclePhase::Idle,
            target: None,
            path: Vec::new(),
            cargo: Vec::new(),
            trips_remaining: get_profile(class).max_trips,
            alive: true,
            at_base: false,
            score: 0,
            avoid_targets: Vec::new(),
        };
        self.vehicles.push((team, snapshot));
        self
    }

    /// The scenario as a snapshot at tick zero, with a generator seeded
    /// from `seed`.
    pub fn to_state(&self, seed: u64) -> FullState {
        let mut fleets: BTreeMap<Team, Vec<VehicleSnapshot>> = BTreeMap::new();
        for (team, vehicle) in &self.vehicles {
            fleets.entry(*team).or_default().push(vehicle.clone());
        }
        FullState {
            tick: 0,
            phase: SimPhase::Running,
            rng: rng_state(&ChaCha8Rng::seed_from_u64(seed)),
            world: WorldState {
                width: self.width,
                height: self.height,
                tile_size: self.tile_size,
                obstacles: self.obstacles.clone(),
                resources: self.resources.clone(),
                hazards: self.hazards.clone(),
            },
            bases: self.bases.clone(),
            fleets,
        }
    }
}
