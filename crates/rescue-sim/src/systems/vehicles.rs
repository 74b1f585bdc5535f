//! Vehicle system: decide or plan, advance one cell, then resolve arrival.
//!
//! Vehicles act one at a time in fleet order. Each sees the world as left by
//! the vehicles before it, so a resource taken earlier in the tick is simply
//! gone for the ones after.

use std::collections::HashSet;

use rand_chacha::ChaCha8Rng;

use rescue_core::components::Cargo;
use rescue_core::enums::{HazardPolicy, VehiclePhase};
use rescue_core::events::SimEvent;
use rescue_core::types::{Cell, HazardId};
use rescue_grid::{find_path, ReservationTable};
use rescue_strategy::{decide, Intent};

use crate::vehicle::Vehicle;
use crate::view::{Sighting, SimView};
use crate::world::World;

/// Per-tick inputs shared by every vehicle.
pub struct TickContext<'a> {
    pub policy: HazardPolicy,
    pub danger: &'a HashSet<Cell>,
}

pub fn run(
    world: &mut World,
    vehicles: &mut [Vehicle],
    reservations: &mut ReservationTable,
    policy: HazardPolicy,
    rng: &mut ChaCha8Rng,
    pending: &mut Vec<HazardId>,
    events: &mut Vec<SimEvent>,
) {
    let danger = world.hazards.danger_cells(&world.grid);
    let ctx = TickContext {
        policy,
        danger: &danger,
    };
    let mut sightings: Vec<Sighting> = vehicles
        .iter()
        .filter(|v| v.alive)
        .map(|v| Sighting {
            id: v.id,
            team: v.team,
            cell: v.cell,
        })
        .collect();

    for vehicle in vehicles.iter_mut() {
        if !vehicle.can_act() {
            continue;
        }
        if vehicle.path.is_empty() {
            plan(world, vehicle, reservations, &ctx, &sightings, rng, events);
        }
        advance(world, vehicle, &ctx, pending, events);
        sync_reservation(world, vehicle, reservations);

        if let Some(s) = sightings.iter_mut().find(|s| s.id == vehicle.id) {
            s.cell = vehicle.cell;
        }
    }
}

/// Make the reservation table agree with every vehicle's current route.
pub fn sync_reservations(world: &World, vehicles: &[Vehicle], reservations: &mut ReservationTable) {
    for vehicle in vehicles {
        sync_reservation(world, vehicle, reservations);
    }
}

/// A vehicle holds the goal of its in-flight route unless that goal is a
/// base cell.
fn sync_reservation(world: &World, vehicle: &Vehicle, reservations: &mut ReservationTable) {
    match vehicle.path.back() {
        Some(&goal) if vehicle.alive && !world.is_base_cell(goal) => {
            reservations.reserve(vehicle.team, vehicle.id, goal);
        }
        _ => reservations.release(vehicle.id),
    }
}

/// Give an idle vehicle something to do: a route home, or a fresh decision.
fn plan(
    world: &mut World,
    vehicle: &mut Vehicle,
    reservations: &ReservationTable,
    ctx: &TickContext,
    sightings: &[Sighting],
    rng: &mut ChaCha8Rng,
    events: &mut Vec<SimEvent>,
) {
    match vehicle.phase {
        VehiclePhase::Dead => {}
        VehiclePhase::Returning | VehiclePhase::ForcedReturning => {
            if vehicle.at_base {
                arrive_home(vehicle, events);
            } else {
                route_home(world, vehicle, reservations, ctx);
            }
        }
        VehiclePhase::Idle | VehiclePhase::Traveling => {
            let intent = {
                let view = SimView {
                    world,
                    danger: ctx.danger,
                    policy: ctx.policy,
                    reservations,
                    vehicles: sightings,
                    vehicle: vehicle.id,
                    team: vehicle.team,
                    avoid: &vehicle.avoid_targets,
                };
                decide(&vehicle.context(), vehicle.strategy, &view, rng)
            };
            carry_out(world, vehicle, intent, reservations, ctx, events);
        }
    }
}

fn carry_out(
    world: &mut World,
    vehicle: &mut Vehicle,
    intent: Intent,
    reservations: &ReservationTable,
    ctx: &TickContext,
    events: &mut Vec<SimEvent>,
) {
    match intent {
        Intent::ReturnToBase => {
            if vehicle.at_base {
                vehicle.phase = VehiclePhase::Returning;
                arrive_home(vehicle, events);
            } else {
                vehicle.commit_return();
                route_home(world, vehicle, reservations, ctx);
            }
        }
        Intent::Move(goal) => {
            if !route_to(world, vehicle, goal, reservations, ctx, true) {
                log::debug!("{} has no route to {}", vehicle.id, goal);
            }
        }
        Intent::Collect { resource, cell } => {
            if cell == vehicle.cell {
                try_collect(world, vehicle, events);
            } else if !route_to(world, vehicle, cell, reservations, ctx, true) {
                log::debug!("{} cannot reach {} at {}, skipping it", vehicle.id, resource, cell);
                vehicle.avoid_targets.insert(cell);
            }
        }
    }
    if vehicle.phase == VehiclePhase::Idle && !vehicle.path.is_empty() {
        vehicle.phase = VehiclePhase::Traveling;
    }
}

/// Plan and install a route to `goal`. Returns false when none exists.
fn route_to(
    world: &World,
    vehicle: &mut Vehicle,
    goal: Cell,
    reservations: &ReservationTable,
    ctx: &TickContext,
    respect_reservations: bool,
) -> bool {
    let (team, id) = (vehicle.team, vehicle.id);
    let avoid_hazards = ctx.policy == HazardPolicy::Avoid;
    let route = find_path(&world.grid, vehicle.cell, goal, |c| {
        (avoid_hazards && ctx.danger.contains(&c))
            || (respect_reservations
                && !world.is_base_cell(c)
                && reservations.is_blocked_for(team, id, c))
    });
    match route {
        Some(cells) => {
            vehicle.set_route(cells.into_iter().skip(1));
            true
        }
        None => false,
    }
}

/// Route to the nearest cell of the vehicle's own base. Falls back to
/// ignoring allied reservations rather than staying stranded.
fn route_home(world: &World, vehicle: &mut Vehicle, reservations: &ReservationTable, ctx: &TickContext) {
    let Some(home) = world.home_cell(vehicle.team, vehicle.cell) else {
        log::debug!("{} has no base to return to", vehicle.id);
        return;
    };
    if !route_to(world, vehicle, home, reservations, ctx, true)
        && !route_to(world, vehicle, home, reservations, ctx, false)
    {
        log::debug!("{} has no route home from {}", vehicle.id, vehicle.cell);
    }
}

/// Take one step and resolve whatever is on the new cell.
fn advance(
    world: &mut World,
    vehicle: &mut Vehicle,
    ctx: &TickContext,
    pending: &mut Vec<HazardId>,
    events: &mut Vec<SimEvent>,
) {
    let Some(&next) = vehicle.path.front() else {
        return;
    };
    let hazardous = ctx.policy == HazardPolicy::Avoid && ctx.danger.contains(&next);
    if !vehicle.cell.is_adjacent(next) || !world.grid.is_walkable(next) || hazardous {
        log::debug!("{} route blocked at {}, replanning", vehicle.id, next);
        vehicle.clear_route();
        return;
    }

    vehicle.step();
    vehicle.at_base = world.in_own_base(vehicle.team, vehicle.cell);

    if let Some(hazard) = world.hazards.trigger_at(vehicle.cell, &world.grid) {
        if !pending.contains(&hazard) {
            log::debug!("{} triggered {} at {}", vehicle.id, hazard, vehicle.cell);
            pending.push(hazard);
        }
        return;
    }

    match vehicle.phase {
        VehiclePhase::Idle | VehiclePhase::Traveling => try_collect(world, vehicle, events),
        VehiclePhase::Returning | VehiclePhase::ForcedReturning if vehicle.at_base => {
            arrive_home(vehicle, events)
        }
        _ => {}
    }
}

/// Pick up an allowed resource on the current cell, committing to return
/// when the hold is full or the class goes home after every pickup.
fn try_collect(world: &mut World, vehicle: &mut Vehicle, events: &mut Vec<SimEvent>) {
    let profile = vehicle.profile();
    let Some(resource) = world.resources.resource_at(vehicle.cell) else {
        return;
    };
    if !profile.can_carry(resource.kind) || vehicle.is_full() {
        return;
    }
    let id = resource.id;
    let Some(resource) = world.resources.take(id, &mut world.grid) else {
        return;
    };

    vehicle.load(Cargo {
        kind: resource.kind,
        value: resource.value,
    });
    log::debug!("{} collected {:?} at {}", vehicle.id, resource.kind, resource.cell);
    events.push(SimEvent::ResourceCollected {
        vehicle: vehicle.id,
        resource: id,
        kind: resource.kind,
        value: resource.value,
    });

    if vehicle.is_full() || profile.return_when_loaded {
        vehicle.commit_return();
    }
}

fn arrive_home(vehicle: &mut Vehicle, events: &mut Vec<SimEvent>) {
    let (items, value) = match vehicle.phase {
        VehiclePhase::Returning => vehicle.deliver(),
        VehiclePhase::ForcedReturning => vehicle.finalize(),
        _ => return,
    };
    if items > 0 {
        log::info!(
            "{} ({:?}) delivered {} items worth {}, score {}",
            vehicle.id,
            vehicle.team,
            items,
            value,
            vehicle.score
        );
        events.push(SimEvent::CargoDelivered {
            vehicle: vehicle.id,
            team: vehicle.team,
            items,
            value,
        });
    }
}
