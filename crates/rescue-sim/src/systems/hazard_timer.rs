//! Hazard timer system: toggles mobile hazards and relocates them on demand.

use std::collections::BTreeSet;

use rand_chacha::ChaCha8Rng;

use rescue_core::events::SimEvent;
use rescue_core::types::{Base, Cell};

use crate::vehicle::Vehicle;
use crate::world::World;

/// Advance mobile hazard timers.
pub fn run(
    world: &mut World,
    vehicles: &[Vehicle],
    rng: &mut ChaCha8Rng,
    interval: u32,
    relocate: bool,
    events: &mut Vec<SimEvent>,
) {
    let World {
        grid,
        hazards,
        bases,
        ..
    } = world;
    let bases: &[Base] = bases;
    let occupied = occupied_cells(vehicles);
    let toggled = hazards.tick(grid, rng, interval, relocate, |c| {
        is_placeable(c, bases, &occupied)
    });
    for event in &toggled {
        log::debug!("hazard event: {event:?}");
    }
    events.extend(toggled);
}

/// Move every active mobile hazard right now.
pub fn relocate_all(
    world: &mut World,
    vehicles: &[Vehicle],
    rng: &mut ChaCha8Rng,
    events: &mut Vec<SimEvent>,
) {
    let World {
        grid,
        hazards,
        bases,
        ..
    } = world;
    let bases: &[Base] = bases;
    let occupied = occupied_cells(vehicles);
    events.extend(hazards.relocate_mobile(grid, rng, |c| is_placeable(c, bases, &occupied)));
}

fn occupied_cells(vehicles: &[Vehicle]) -> BTreeSet<Cell> {
    vehicles
        .iter()
        .filter(|v| v.alive)
        .map(|v| v.cell)
        .collect()
}

/// Hazards never land in a base or under a live vehicle.
fn is_placeable(cell: Cell, bases: &[Base], occupied: &BTreeSet<Cell>) -> bool {
    !bases.iter().any(|b| b.contains(cell)) && !occupied.contains(&cell)
}
