//! Detonation system: resolves hazards triggered during the vehicle pass.
//!
//! Each blast's area is fixed before anything in it is destroyed, so the
//! order in which victims are processed cannot change the outcome.

use rescue_core::enums::DeathCause;
use rescue_core::events::SimEvent;
use rescue_core::types::HazardId;

use crate::vehicle::Vehicle;
use crate::world::World;

pub fn run(
    world: &mut World,
    vehicles: &mut [Vehicle],
    pending: &mut Vec<HazardId>,
    events: &mut Vec<SimEvent>,
) {
    for id in pending.drain(..) {
        let Some(blast) = world.hazards.detonate(id, &mut world.grid) else {
            continue;
        };

        let victims: Vec<usize> = vehicles
            .iter()
            .enumerate()
            .filter(|(_, v)| v.alive && blast.cells.contains(&v.cell))
            .map(|(i, _)| i)
            .collect();
        let destroyed: Vec<_> = world
            .resources
            .iter()
            .filter(|r| blast.cells.contains(&r.cell))
            .map(|r| r.id)
            .collect();

        for i in victims {
            let v = &mut vehicles[i];
            v.kill();
            log::info!("{} ({:?}) destroyed by {} at {}", v.id, v.team, id, v.cell);
            events.push(SimEvent::VehicleDestroyed {
                vehicle: v.id,
                team: v.team,
                cell: v.cell,
                cause: DeathCause::Hazard,
            });
        }
        for resource in destroyed {
            world.resources.take(resource, &mut world.grid);
        }

        log::info!(
            "{} ({:?}) detonated at {}, {} cells cleared",
            id,
            blast.kind,
            blast.center,
            blast.cells.len()
        );
        events.push(SimEvent::HazardDetonated {
            hazard: id,
            center: blast.center,
            cells: blast.cells.len(),
        });
    }
}
