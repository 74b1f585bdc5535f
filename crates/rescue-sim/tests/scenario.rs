//! End-to-end matches on hand-built maps.

use rescue_sim::core::enums::*;
use rescue_sim::core::events::SimEvent;
use rescue_sim::core::types::Cell;
use rescue_sim::{Scenario, SimConfig, SimulationEngine};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn engine_for(scenario: &Scenario, config: SimConfig) -> SimulationEngine {
    SimulationEngine::from_scenario(scenario, config).expect("scenario should load")
}

#[test]
fn test_motorcycle_round_trip() {
    init_logging();
    let scenario = Scenario::new(10, 10)
        .base(Team::PlayerOne, Cell::new(0, 0), 0)
        .vehicle(Team::PlayerOne, VehicleClass::Motorcycle, Cell::new(0, 0))
        .resource(ResourceKind::Person, Cell::new(9, 9));
    let mut engine = engine_for(&scenario, SimConfig::default());

    for _ in 0..18 {
        engine.tick();
    }
    let bike = &engine.vehicles()[0];
    assert_eq!(bike.cell, Cell::new(9, 9));
    assert_eq!(bike.cargo.len(), 1);
    assert_eq!(bike.score, 0);
    assert!(engine.world().resources.is_empty());

    for _ in 18..37 {
        engine.tick();
    }
    let bike = &engine.vehicles()[0];
    assert_eq!(bike.cell, Cell::new(0, 0));
    assert!(bike.cargo.is_empty());
    assert_eq!(bike.score, 50);
    assert_eq!(engine.phase(), SimPhase::Finished);

    let outcome = engine.outcome();
    assert_eq!(outcome.winner, Some(Team::PlayerOne));
    assert_eq!(outcome.scores.get(&Team::PlayerOne), Some(&50));
}

#[test]
fn test_resource_collected_at_most_once() {
    init_logging();
    let scenario = Scenario::new(5, 5)
        .base(Team::PlayerOne, Cell::new(0, 0), 0)
        .vehicle(Team::PlayerOne, VehicleClass::Motorcycle, Cell::new(1, 2))
        .vehicle(Team::PlayerOne, VehicleClass::Motorcycle, Cell::new(3, 2))
        .resource(ResourceKind::Person, Cell::new(2, 2));
    let mut engine = engine_for(&scenario, SimConfig::default());

    let report = engine.tick();
    let collected = report
        .events
        .iter()
        .filter(|e| matches!(e, SimEvent::ResourceCollected { .. }))
        .count();
    assert_eq!(collected, 1);

    let carried: usize = engine.vehicles().iter().map(|v| v.cargo.len()).sum();
    assert_eq!(carried, 1);
    assert!(engine.world().resources.is_empty());
    assert_ne!(
        engine.world().grid.state(Cell::new(2, 2)),
        Some(CellState::Person)
    );
}

fn minefield() -> Scenario {
    Scenario::new(10, 10)
        .base(Team::PlayerOne, Cell::new(0, 0), 0)
        .base(Team::PlayerTwo, Cell::new(9, 9), 0)
        .vehicle(Team::PlayerTwo, VehicleClass::Jeep, Cell::new(5, 8))
        .resource(ResourceKind::Weapon, Cell::new(5, 2))
        .resource(ResourceKind::Food, Cell::new(4, 5))
        .hazard_with_radius(HazardKind::LargeCircle, Cell::new(5, 5), 40.0)
}

#[test]
fn test_traverse_detonates_on_entry() {
    init_logging();
    let mut engine = engine_for(
        &minefield(),
        SimConfig {
            hazard_policy: HazardPolicy::Traverse,
            ..Default::default()
        },
    );

    let first = engine.tick();
    assert!(first.events.is_empty());
    assert_eq!(engine.vehicles()[0].cell, Cell::new(5, 7));

    let second = engine.tick();
    assert!(second.events.iter().any(|e| matches!(
        e,
        SimEvent::VehicleDestroyed {
            cause: DeathCause::Hazard,
            ..
        }
    )));
    assert!(second
        .events
        .iter()
        .any(|e| matches!(e, SimEvent::HazardDetonated { cells: 5, .. })));

    let jeep = &engine.vehicles()[0];
    assert!(!jeep.alive);
    assert_eq!(jeep.phase, VehiclePhase::Dead);

    let world = engine.world();
    assert!(world.hazards.is_empty());
    assert_eq!(world.grid.state(Cell::new(5, 5)), Some(CellState::Free));
    assert!(world.resources.resource_at(Cell::new(4, 5)).is_none());
    assert_eq!(world.grid.state(Cell::new(4, 5)), Some(CellState::Free));
    assert!(world.resources.resource_at(Cell::new(5, 2)).is_some());
    assert_eq!(engine.phase(), SimPhase::Finished);
}

#[test]
fn test_avoid_routes_around_hazard() {
    init_logging();
    let mut engine = engine_for(&minefield(), SimConfig::default());

    for _ in 0..12 {
        let report = engine.tick();
        assert!(!report
            .events
            .iter()
            .any(|e| matches!(e, SimEvent::HazardDetonated { .. })));
    }
    let jeep = &engine.vehicles()[0];
    assert!(jeep.alive);
    assert_eq!(jeep.cargo.len(), 1);
    assert_eq!(engine.world().hazards.len(), 1);
    assert!(engine.world().resources.resource_at(Cell::new(5, 2)).is_none());
}

#[test]
fn test_enemies_meeting_in_the_open_both_die() {
    init_logging();
    let scenario = Scenario::new(7, 1)
        .base(Team::PlayerOne, Cell::new(0, 0), 0)
        .base(Team::PlayerTwo, Cell::new(6, 0), 0)
        .vehicle(Team::PlayerOne, VehicleClass::Jeep, Cell::new(2, 0))
        .vehicle(Team::PlayerTwo, VehicleClass::Jeep, Cell::new(4, 0))
        .resource(ResourceKind::Food, Cell::new(3, 0));
    let mut engine = engine_for(&scenario, SimConfig::default());

    // The first jeep grabs the food; the aggressive one charges it there.
    let report = engine.tick();
    let crashes = report
        .events
        .iter()
        .filter(|e| {
            matches!(
                e,
                SimEvent::VehicleDestroyed {
                    cause: DeathCause::Collision,
                    ..
                }
            )
        })
        .count();
    assert_eq!(crashes, 2);
    assert!(engine.vehicles().iter().all(|v| !v.alive));
    assert_eq!(engine.phase(), SimPhase::Finished);
}

#[test]
fn test_fleet_invariants_hold_over_a_match() {
    init_logging();
    let mut engine = SimulationEngine::new(SimConfig {
        seed: 2024,
        max_ticks: 1500,
        ..Default::default()
    });
    let mut scores: Vec<u32> = engine.vehicles().iter().map(|v| v.score).collect();

    while engine.phase() == SimPhase::Running {
        engine.tick();
        for (v, last) in engine.vehicles().iter().zip(scores.iter_mut()) {
            let profile = v.profile();
            assert!(v.cargo.len() <= profile.capacity, "{} over capacity", v.id);
            assert!(v.trips_remaining <= profile.max_trips);
            assert!(v.score >= *last, "{} lost score", v.id);
            if !v.alive {
                assert!(v.cargo.is_empty());
                assert_eq!(v.phase, VehiclePhase::Dead);
            }
            *last = v.score;
        }
    }

    let outcome = engine.outcome();
    let total: u32 = engine.vehicles().iter().map(|v| v.score).sum();
    assert_eq!(outcome.scores.values().sum::<u32>(), total);
}

#[test]
fn test_allies_split_between_equal_targets() {
    init_logging();
    let scenario = Scenario::new(7, 5)
        .base(Team::PlayerOne, Cell::new(0, 0), 0)
        .vehicle(Team::PlayerOne, VehicleClass::Truck, Cell::new(2, 2))
        .vehicle(Team::PlayerOne, VehicleClass::Truck, Cell::new(4, 2))
        .resource(ResourceKind::Food, Cell::new(3, 0))
        .resource(ResourceKind::Food, Cell::new(3, 4));
    let mut engine = engine_for(&scenario, SimConfig::default());

    engine.tick();
    let first = &engine.vehicles()[0];
    let second = &engine.vehicles()[1];
    assert_eq!(first.target, Some(Cell::new(3, 0)));
    assert_eq!(second.target, Some(Cell::new(3, 4)));
    let reservations = engine.reservations();
    assert_eq!(reservations.reserved_by(first.id), Some(Cell::new(3, 0)));
    assert_eq!(reservations.reserved_by(second.id), Some(Cell::new(3, 4)));
}

#[test]
fn test_routes_home_hold_no_reservation() {
    init_logging();
    let scenario = Scenario::new(10, 10)
        .base(Team::PlayerOne, Cell::new(0, 0), 0)
        .vehicle(Team::PlayerOne, VehicleClass::Motorcycle, Cell::new(0, 0))
        .resource(ResourceKind::Person, Cell::new(9, 9));
    let mut engine = engine_for(&scenario, SimConfig::default());

    engine.tick();
    let bike = engine.vehicles()[0].id;
    assert_eq!(engine.reservations().reserved_by(bike), Some(Cell::new(9, 9)));

    for _ in 1..19 {
        engine.tick();
    }
    let v = &engine.vehicles()[0];
    assert_eq!(v.phase, VehiclePhase::ForcedReturning);
    assert_eq!(v.path.back(), Some(&Cell::new(0, 0)));
    assert_eq!(engine.reservations().reserved_by(bike), None);
}

#[test]
fn test_reservations_track_routes_over_a_match() {
    init_logging();
    let mut engine = SimulationEngine::new(SimConfig {
        seed: 99,
        ..Default::default()
    });
    for _ in 0..300 {
        engine.tick();
        for v in engine.vehicles() {
            match engine.reservations().reserved_by(v.id) {
                Some(cell) => {
                    assert!(!engine.world().is_base_cell(cell), "{} reserved base {cell}", v.id);
                    assert_eq!(v.path.back(), Some(&cell));
                }
                None => assert!(
                    !v.alive || v.path.back().map_or(true, |&c| engine.world().is_base_cell(c))
                ),
            }
        }
    }
}

#[test]
fn test_unreachable_resource_falls_back_to_exploring() {
    init_logging();
    let target = Cell::new(5, 5);
    let mut scenario = Scenario::new(11, 11)
        .base(Team::PlayerOne, Cell::new(0, 0), 0)
        .vehicle(Team::PlayerOne, VehicleClass::Truck, Cell::new(1, 1))
        .resource(ResourceKind::Food, target);
    for wall in target.neighbors4() {
        scenario = scenario.obstacle(wall);
    }
    let mut engine = engine_for(&scenario, SimConfig::default());

    let report = engine.tick();
    assert!(report.events.is_empty());
    let truck = &engine.vehicles()[0];
    assert_eq!(truck.cell, Cell::new(1, 1));
    assert!(truck.avoid_targets.contains(&target));

    let mut moves = 0;
    let mut last = truck.cell;
    for _ in 0..60 {
        engine.tick();
        let cell = engine.vehicles()[0].cell;
        if cell != last {
            moves += 1;
            last = cell;
        }
    }
    let truck = &engine.vehicles()[0];
    assert!(moves > 0, "truck never left its cell");
    assert!(truck.alive);
    assert!(truck.avoid_targets.contains(&target));
    assert!(engine.world().resources.resource_at(target).is_some());
    assert_eq!(engine.phase(), SimPhase::Running);
}
