//! Simulation engine: the logical tick loop.
//!
//! `SimulationEngine` owns the world, both fleets and the seeded generator,
//! processes external commands, runs all systems in a fixed order and
//! reports what changed. It is completely headless.

use std::collections::VecDeque;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use rescue_core::commands::SimCommand;
use rescue_core::enums::{SimPhase, Team};
use rescue_core::error::SnapshotError;
use rescue_core::events::SimEvent;
use rescue_core::state::{FullState, Outcome, RenderFrame, TickReport};
use rescue_core::types::{HazardId, VehicleId};
use rescue_grid::ReservationTable;

use crate::config::SimConfig;
use crate::replay::Replay;
use crate::scenario::Scenario;
use crate::systems;
use crate::vehicle::Vehicle;
use crate::world::World;
use crate::world_setup;

#[derive(Debug)]
pub struct SimulationEngine {
    config: SimConfig,
    world: World,
    vehicles: Vec<Vehicle>,
    reservations: ReservationTable,
    tick: u64,
    phase: SimPhase,
    rng: ChaCha8Rng,
    command_queue: VecDeque<SimCommand>,
    pending_detonations: Vec<HazardId>,
    events: Vec<SimEvent>,
    replay: Option<Replay>,
}

impl SimulationEngine {
    /// Start a match on a randomly generated world.
    pub fn new(config: SimConfig) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let (world, vehicles) = world_setup::generate(&config, &mut rng);
        Self::assemble(config, world, vehicles, rng, 0, SimPhase::Running)
    }

    /// Start a match on a hand-built scenario.
    pub fn from_scenario(scenario: &Scenario, config: SimConfig) -> Result<Self, SnapshotError> {
        Self::from_state(&scenario.to_state(config.seed), config)
    }

    /// Resume from a snapshot.
    pub fn from_state(state: &FullState, config: SimConfig) -> Result<Self, SnapshotError> {
        let restored = systems::snapshot::restore(state)?;
        Ok(Self::assemble(
            config,
            restored.world,
            restored.vehicles,
            restored.rng,
            state.tick,
            state.phase,
        ))
    }

    fn assemble(
        config: SimConfig,
        world: World,
        vehicles: Vec<Vehicle>,
        rng: ChaCha8Rng,
        tick: u64,
        phase: SimPhase,
    ) -> Self {
        let mut engine = Self {
            config,
            world,
            vehicles,
            reservations: ReservationTable::new(),
            tick,
            phase,
            rng,
            command_queue: VecDeque::new(),
            pending_detonations: Vec::new(),
            events: Vec::new(),
            replay: None,
        };
        systems::vehicles::sync_reservations(
            &engine.world,
            &engine.vehicles,
            &mut engine.reservations,
        );
        if engine.config.record_replay {
            engine.replay = Some(Replay::new(engine.full_state()));
        }
        engine
    }

    /// Queue a command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: SimCommand) {
        self.command_queue.push_back(command);
    }

    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = SimCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance one logical tick and report what changed.
    pub fn tick(&mut self) -> TickReport {
        self.process_commands();

        if self.phase == SimPhase::Running {
            self.tick += 1;
            self.run_systems();
            self.check_exhaustion();
            self.check_terminal();
            systems::vehicles::sync_reservations(
                &self.world,
                &self.vehicles,
                &mut self.reservations,
            );
        }

        let events = std::mem::take(&mut self.events);
        if !events.is_empty() && self.replay.is_some() {
            let frame = self.full_state();
            if let Some(replay) = self.replay.as_mut() {
                replay.push(frame);
            }
        }
        TickReport {
            tick: self.tick,
            phase: self.phase,
            events,
        }
    }

    /// Tick until the match finishes or is paused.
    pub fn run_until_finished(&mut self) -> Outcome {
        while self.phase == SimPhase::Running {
            self.tick();
        }
        self.outcome()
    }

    pub fn full_state(&self) -> FullState {
        systems::snapshot::build_full_state(
            self.tick,
            self.phase,
            &self.rng,
            &self.world,
            &self.vehicles,
        )
    }

    /// Replace the whole simulation state. On error nothing changes.
    pub fn load_full_state(&mut self, state: &FullState) -> Result<(), SnapshotError> {
        let restored = systems::snapshot::restore(state).map_err(|e| {
            log::warn!("rejected snapshot at tick {}: {e}", state.tick);
            e
        })?;
        self.world = restored.world;
        self.vehicles = restored.vehicles;
        self.rng = restored.rng;
        self.tick = state.tick;
        self.phase = state.phase;
        self.pending_detonations.clear();
        self.events.clear();
        self.reservations.clear();
        systems::vehicles::sync_reservations(&self.world, &self.vehicles, &mut self.reservations);
        Ok(())
    }

    /// Restore the latest replay frame at or before `tick` and discard the
    /// frames after it. Returns the tick actually restored, or `None` when
    /// no replay is being recorded or no frame is that old.
    pub fn rewind_to(&mut self, tick: u64) -> Result<Option<u64>, SnapshotError> {
        let Some(frame) = self.replay.as_ref().and_then(|r| r.frame_at(tick)).cloned() else {
            return Ok(None);
        };
        self.load_full_state(&frame)?;
        if let Some(replay) = self.replay.as_mut() {
            replay.truncate_after(frame.tick);
        }
        Ok(Some(frame.tick))
    }

    /// Render view; `alpha` is the elapsed fraction of the current tick.
    pub fn render_frame(&self, alpha: f32) -> RenderFrame {
        systems::render::build_frame(self.tick, alpha, &self.world, &self.vehicles)
    }

    /// Scores and survivors per team, with the leader as winner.
    pub fn outcome(&self) -> Outcome {
        let scores = systems::render::team_scores(&self.vehicles);
        let survivors = Team::ALL
            .into_iter()
            .map(|t| {
                let alive = self.vehicles.iter().filter(|v| v.team == t && v.alive).count();
                (t, alive)
            })
            .collect();
        let one = scores.get(&Team::PlayerOne).copied().unwrap_or(0);
        let two = scores.get(&Team::PlayerTwo).copied().unwrap_or(0);
        let winner = match one.cmp(&two) {
            std::cmp::Ordering::Greater => Some(Team::PlayerOne),
            std::cmp::Ordering::Less => Some(Team::PlayerTwo),
            std::cmp::Ordering::Equal => None,
        };
        Outcome {
            scores,
            survivors,
            winner,
        }
    }

    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    pub fn phase(&self) -> SimPhase {
        self.phase
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn vehicle(&self, id: VehicleId) -> Option<&Vehicle> {
        self.vehicles.iter().find(|v| v.id == id)
    }

    pub fn reservations(&self) -> &ReservationTable {
        &self.reservations
    }

    pub fn replay(&self) -> Option<&Replay> {
        self.replay.as_ref()
    }

    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    fn handle_command(&mut self, command: SimCommand) {
        match command {
            SimCommand::Pause => {
                if self.phase == SimPhase::Running {
                    self.phase = SimPhase::Paused;
                }
            }
            SimCommand::Resume => {
                if self.phase == SimPhase::Paused {
                    self.phase = SimPhase::Running;
                }
            }
            SimCommand::ForceReturn { vehicle } => {
                if let Some(v) = self.vehicles.iter_mut().find(|v| v.id == vehicle) {
                    if v.force_return() {
                        log::info!("{} ordered home", v.id);
                        self.events.push(SimEvent::ForcedReturn { vehicle });
                    }
                }
            }
            SimCommand::ForceReturnAll => self.force_return_all(),
            SimCommand::RelocateMobileHazards => {
                systems::hazard_timer::relocate_all(
                    &mut self.world,
                    &self.vehicles,
                    &mut self.rng,
                    &mut self.events,
                );
            }
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self) {
        // 1. Mobile hazard timers
        systems::hazard_timer::run(
            &mut self.world,
            &self.vehicles,
            &mut self.rng,
            self.config.hazard_toggle_interval,
            self.config.relocate_mobile_hazards,
            &mut self.events,
        );
        // 2. Decide, plan, move, collect, deliver
        systems::vehicles::run(
            &mut self.world,
            &mut self.vehicles,
            &mut self.reservations,
            self.config.hazard_policy,
            &mut self.rng,
            &mut self.pending_detonations,
            &mut self.events,
        );
        // 3. Enemy collisions
        systems::collision::run(&self.world, &mut self.vehicles, &mut self.events);
        // 4. Hazards stepped on this tick
        systems::detonation::run(
            &mut self.world,
            &mut self.vehicles,
            &mut self.pending_detonations,
            &mut self.events,
        );
    }

    fn force_return_all(&mut self) {
        for v in self.vehicles.iter_mut() {
            if v.force_return() {
                self.events.push(SimEvent::ForcedReturn { vehicle: v.id });
            }
        }
    }

    /// Once the map is picked clean every vehicle heads home for good.
    fn check_exhaustion(&mut self) {
        if !self.world.resources.is_empty() {
            return;
        }
        let before = self.events.len();
        self.force_return_all();
        if self.events.len() > before {
            log::info!("resources exhausted at tick {}, recalling all vehicles", self.tick);
        }
    }

    fn check_terminal(&mut self) {
        let idle = self.vehicles.iter().all(|v| !v.can_act());
        if idle || self.tick >= self.config.max_ticks {
            self.phase = SimPhase::Finished;
            let outcome = self.outcome();
            log::info!(
                "match finished at tick {}: scores {:?}, winner {:?}",
                self.tick,
                outcome.scores,
                outcome.winner
            );
        }
    }
}
