//! Snapshot system: builds the serializable state tree and rebuilds a world
//! from one.
//!
//! Building is read-only. Restoring validates the whole tree into fresh
//! values and only hands them back once everything checks out, so a corrupt
//! snapshot can never leave a half-applied world behind.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use rescue_core::components::Cargo;
use rescue_core::enums::{CellState, SimPhase, Team, VehiclePhase};
use rescue_core::error::SnapshotError;
use rescue_core::state::*;
use rescue_core::types::Cell;
use rescue_grid::GridWorld;
use rescue_strategy::StrategyId;

use crate::vehicle::Vehicle;
use crate::world::World;

/// Largest accepted map edge, in cells.
const MAX_DIMENSION: i32 = 4096;

/// Build a complete snapshot of the current simulation.
pub fn build_full_state(
    tick: u64,
    phase: SimPhase,
    rng: &ChaCha8Rng,
    world: &World,
    vehicles: &[Vehicle],
) -> FullState {
    let mut fleets: BTreeMap<Team, Vec<VehicleSnapshot>> = BTreeMap::new();
    for v in vehicles {
        fleets.entry(v.team).or_default().push(snapshot_vehicle(v));
    }

    FullState {
        tick,
        phase,
        rng: rng_state(rng),
        world: WorldState {
            width: world.grid.width(),
            height: world.grid.height(),
            tile_size: world.grid.tile_size(),
            obstacles: world.grid.cells_in_state(CellState::Obstacle),
            resources: world.resources.iter().cloned().collect(),
            hazards: world.hazards.iter().cloned().collect(),
        },
        bases: world.bases.clone(),
        fleets,
    }
}

fn snapshot_vehicle(v: &Vehicle) -> VehicleSnapshot {
    VehicleSnapshot {
        id: v.id,
        class: v.class,
        strategy: v.strategy.key().to_string(),
        cell: v.cell,
        phase: v.phase,
        target: v.target,
        path: v.path.iter().copied().collect(),
        cargo: v.cargo.iter().map(|c| c.kind).collect(),
        trips_remaining: v.trips_remaining,
        alive: v.alive,
        at_base: v.at_base,
        score: v.score,
        avoid_targets: v.avoid_targets.iter().copied().collect(),
    }
}

pub fn rng_state(rng: &ChaCha8Rng) -> RngState {
    let word_pos = rng.get_word_pos();
    RngState {
        seed: rng.get_seed(),
        stream: rng.get_stream(),
        word_pos_hi: (word_pos >> 64) as u64,
        word_pos_lo: word_pos as u64,
    }
}

pub fn restore_rng(state: &RngState) -> ChaCha8Rng {
    let mut rng = ChaCha8Rng::from_seed(state.seed);
    rng.set_stream(state.stream);
    rng.set_word_pos(((state.word_pos_hi as u128) << 64) | state.word_pos_lo as u128);
    rng
}

/// Everything a snapshot rebuilds.
#[derive(Debug)]
pub struct Restored {
    pub world: World,
    pub vehicles: Vec<Vehicle>,
    pub rng: ChaCha8Rng,
}

/// Validate a snapshot and rebuild the world and fleet from it.
pub fn restore(state: &FullState) -> Result<Restored, SnapshotError> {
    let ws = &state.world;
    let valid_dim = |d: i32| (1..=MAX_DIMENSION).contains(&d);
    if !valid_dim(ws.width) || !valid_dim(ws.height) || ws.tile_size < 1 {
        return Err(SnapshotError::InvalidDimensions {
            width: ws.width,
            height: ws.height,
            tile_size: ws.tile_size,
        });
    }

    let mut world = World::new(GridWorld::new(ws.width, ws.height, ws.tile_size));

    for base in &state.bases {
        check_bounds(&world.grid, "base", base.anchor)?;
        if world.base(base.team).is_none() {
            world.bases.push(*base);
        }
    }

    for &cell in &ws.obstacles {
        check_bounds(&world.grid, "obstacle", cell)?;
        check_free(&world.grid, "obstacle", cell)?;
        world.grid.set_state(cell, CellState::Obstacle);
    }

    let mut seen = HashSet::new();
    for resource in &ws.resources {
        check_bounds(&world.grid, "resource", resource.cell)?;
        check_free(&world.grid, "resource", resource.cell)?;
        if !seen.insert(resource.id) {
            return Err(SnapshotError::DuplicateId {
                what: "resource",
                id: resource.id.0,
            });
        }
        world.resources.insert(resource.clone(), &mut world.grid);
    }

    let diagonal = world.grid.pixel_size().length();
    let mut seen = HashSet::new();
    for hazard in &ws.hazards {
        check_bounds(&world.grid, "hazard", hazard.cell)?;
        if !hazard.radius.is_finite() || hazard.radius <= 0.0 {
            return Err(SnapshotError::InvalidRadius(hazard.radius));
        }
        if hazard.radius > diagonal {
            return Err(SnapshotError::RadiusTooLarge {
                radius: hazard.radius,
                max: diagonal,
            });
        }
        if hazard.active {
            check_free(&world.grid, "hazard", hazard.cell)?;
        }
        if !seen.insert(hazard.id) {
            return Err(SnapshotError::DuplicateId {
                what: "hazard",
                id: hazard.id.0,
            });
        }
        world.hazards.insert(hazard.clone(), &mut world.grid);
    }

    let mut vehicles = Vec::new();
    let mut seen = HashSet::new();
    for (&team, fleet) in &state.fleets {
        if world.base(team).is_none() && !fleet.is_empty() {
            return Err(SnapshotError::UnknownBase);
        }
        for snapshot in fleet {
            if !seen.insert(snapshot.id) {
                return Err(SnapshotError::DuplicateId {
                    what: "vehicle",
                    id: snapshot.id.0,
                });
            }
            vehicles.push(restore_vehicle(&world, team, snapshot)?);
        }
    }

    Ok(Restored {
        world,
        vehicles,
        rng: restore_rng(&state.rng),
    })
}

fn restore_vehicle(world: &World, team: Team, s: &VehicleSnapshot) -> Result<Vehicle, SnapshotError> {
    let strategy = StrategyId::from_key(&s.strategy)
        .ok_or_else(|| SnapshotError::UnknownStrategy(s.strategy.clone()))?;
    if strategy.class() != s.class {
        return Err(SnapshotError::StrategyMismatch {
            vehicle: s.id,
            key: s.strategy.clone(),
        });
    }

    if s.alive == (s.phase == VehiclePhase::Dead) {
        return Err(SnapshotError::PhaseMismatch {
            vehicle: s.id,
            alive: s.alive,
            phase: s.phase,
        });
    }

    check_bounds(&world.grid, "vehicle", s.cell)?;
    if s.alive && !world.grid.is_walkable(s.cell) {
        return Err(SnapshotError::BlockedCell {
            what: "vehicle",
            cell: s.cell,
        });
    }

    let mut vehicle = Vehicle::new(s.id, team, s.class, s.cell, world.in_own_base(team, s.cell));
    let profile = vehicle.profile();
    if s.cargo.len() > profile.capacity {
        return Err(SnapshotError::CargoOverCapacity {
            vehicle: s.id,
            len: s.cargo.len(),
            capacity: profile.capacity,
        });
    }
    if s.trips_remaining > profile.max_trips {
        return Err(SnapshotError::TripsOutOfRange {
            vehicle: s.id,
            trips: s.trips_remaining,
            max: profile.max_trips,
        });
    }

    let mut previous = s.cell;
    for &cell in &s.path {
        if !world.grid.in_bounds(cell) || !previous.is_adjacent(cell) {
            return Err(SnapshotError::BrokenPath { vehicle: s.id });
        }
        previous = cell;
    }
    for &cell in &s.avoid_targets {
        check_bounds(&world.grid, "avoided target", cell)?;
    }

    vehicle.strategy = strategy;
    vehicle.set_route(s.path.iter().copied());
    vehicle.cargo = s.cargo.iter().map(|k| Cargo::from_kind(*k)).collect();
    vehicle.trips_remaining = s.trips_remaining;
    vehicle.alive = s.alive;
    vehicle.phase = s.phase;
    vehicle.score = s.score;
    vehicle.avoid_targets = s.avoid_targets.iter().copied().collect::<BTreeSet<_>>();
    if !vehicle.alive {
        vehicle.clear_route();
    }
    Ok(vehicle)
}

fn check_bounds(grid: &GridWorld, what: &'static str, cell: Cell) -> Result<(), SnapshotError> {
    if grid.in_bounds(cell) {
        Ok(())
    } else {
        Err(SnapshotError::CellOutOfBounds { what, cell })
    }
}

fn check_free(grid: &GridWorld, what: &'static str, cell: Cell) -> Result<(), SnapshotError> {
    if grid.is_free(cell) {
        Ok(())
    } else {
        Err(SnapshotError::BlockedCell { what, cell })
    }
}
