//! Random world generation for a fresh match.
//!
//! Bases sit at the middle of the west and east edges. Obstacles, resources
//! and hazards go on random free cells outside both bases, in that order,
//! all drawn from the engine's seeded generator.

use rand_chacha::ChaCha8Rng;

use rescue_core::enums::{CellState, HazardKind, ResourceKind, Team};
use rescue_core::types::{Base, Cell, VehicleId};
use rescue_grid::GridWorld;

use crate::config::SimConfig;
use crate::vehicle::Vehicle;
use crate::world::{random_free_cell, World};

/// Generate the map and both fleets.
pub fn generate(config: &SimConfig, rng: &mut ChaCha8Rng) -> (World, Vec<Vehicle>) {
    let map = &config.map;
    let mut world = World::new(GridWorld::new(map.width, map.height, map.tile_size));
    world.bases = build_bases(&world.grid, map.base_radius);

    place_obstacles(&mut world, rng, config.population.obstacles);
    place_resources(&mut world, rng, config);
    place_hazards(&mut world, rng, config.population.hazards_per_kind);
    let vehicles = spawn_fleets(&world, config);

    log::info!(
        "generated {}x{} world: {} resources, {} hazards, {} vehicles",
        world.grid.width(),
        world.grid.height(),
        world.resources.len(),
        world.hazards.len(),
        vehicles.len()
    );
    (world, vehicles)
}

fn build_bases(grid: &GridWorld, radius: u32) -> Vec<Base> {
    let mid = grid.height() / 2;
    vec![
        Base {
            team: Team::PlayerOne,
            anchor: Cell::new(0, mid),
            radius,
        },
        Base {
            team: Team::PlayerTwo,
            anchor: Cell::new(grid.width() - 1, mid),
            radius,
        },
    ]
}

fn free_cell_outside_bases(world: &World, rng: &mut ChaCha8Rng) -> Option<Cell> {
    random_free_cell(&world.grid, rng, |c| !world.is_base_cell(c))
}

fn place_obstacles(world: &mut World, rng: &mut ChaCha8Rng, count: u32) {
    for _ in 0..count {
        let Some(cell) = free_cell_outside_bases(world, rng) else {
            log::warn!("no room left for obstacles");
            return;
        };
        world.grid.set_state(cell, CellState::Obstacle);
    }
}

fn place_resources(world: &mut World, rng: &mut ChaCha8Rng, config: &SimConfig) {
    for kind in ResourceKind::ALL {
        for _ in 0..config.population.count(kind) {
            let Some(cell) = free_cell_outside_bases(world, rng) else {
                log::warn!("no room left for {kind:?}");
                break;
            };
            world.resources.spawn(kind, cell, &mut world.grid);
        }
    }
}

fn place_hazards(world: &mut World, rng: &mut ChaCha8Rng, per_kind: u32) {
    for kind in HazardKind::ALL {
        for _ in 0..per_kind {
            let Some(cell) = free_cell_outside_bases(world, rng) else {
                log::warn!("no room left for {kind:?} hazards");
                break;
            };
            world
                .hazards
                .spawn(kind, cell, kind.default_radius(), &mut world.grid);
        }
    }
}

/// Each team's vehicles start stacked on its base anchor, ids assigned team
/// by team.
fn spawn_fleets(world: &World, config: &SimConfig) -> Vec<Vehicle> {
    let mut vehicles = Vec::new();
    let mut next_id = 0;
    for base in &world.bases {
        for (&class, &count) in &config.fleet {
            for _ in 0..count {
                vehicles.push(Vehicle::new(
                    VehicleId(next_id),
                    base.team,
                    class,
                    base.anchor,
                    true,
                ));
                next_id += 1;
            }
        }
    }
    vehicles
}
