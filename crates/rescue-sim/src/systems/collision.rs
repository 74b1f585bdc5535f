//! Collision system: enemy vehicles sharing a cell outside every base both die.

use std::collections::BTreeMap;

use rescue_core::enums::DeathCause;
use rescue_core::events::SimEvent;
use rescue_core::types::Cell;

use crate::vehicle::Vehicle;
use crate::world::World;

pub fn run(world: &World, vehicles: &mut [Vehicle], events: &mut Vec<SimEvent>) {
    let mut by_cell: BTreeMap<Cell, Vec<usize>> = BTreeMap::new();
    for (i, v) in vehicles.iter().enumerate().filter(|(_, v)| v.alive) {
        by_cell.entry(v.cell).or_default().push(i);
    }

    for (cell, occupants) in by_cell {
        if occupants.len() < 2 || world.is_base_cell(cell) {
            continue;
        }
        let first_team = vehicles[occupants[0]].team;
        if occupants.iter().all(|&i| vehicles[i].team == first_team) {
            continue;
        }
        for i in occupants {
            let v = &mut vehicles[i];
            v.kill();
            log::info!("{} ({:?}) destroyed in collision at {}", v.id, v.team, cell);
            events.push(SimEvent::VehicleDestroyed {
                vehicle: v.id,
                team: v.team,
                cell,
                cause: DeathCause::Collision,
            });
        }
    }
}
