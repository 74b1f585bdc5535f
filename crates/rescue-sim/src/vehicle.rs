//! Vehicle agent and its state machine transitions.

use std::collections::{BTreeSet, VecDeque};

use rescue_core::components::Cargo;
use rescue_core::enums::{Team, VehicleClass, VehiclePhase};
use rescue_core::state::VehicleRender;
use rescue_core::types::{Cell, VehicleId};
use rescue_grid::GridWorld;
use rescue_strategy::profiles::{get_profile, VehicleProfile};
use rescue_strategy::{DecisionContext, StrategyId};

#[derive(Debug, Clone, PartialEq)]
pub struct Vehicle {
    pub id: VehicleId,
    pub team: Team,
    pub class: VehicleClass,
    pub strategy: StrategyId,
    pub cell: Cell,
    /// Cell occupied before the last step, for render interpolation only.
    pub prev_cell: Cell,
    /// Goal of the current route.
    pub target: Option<Cell>,
    /// Remaining route; the front is always adjacent to `cell`.
    pub path: VecDeque<Cell>,
    pub cargo: Vec<Cargo>,
    pub trips_remaining: u32,
    pub phase: VehiclePhase,
    pub alive: bool,
    pub at_base: bool,
    pub score: u32,
    /// Resource cells this vehicle failed to route to since its last delivery.
    pub avoid_targets: BTreeSet<Cell>,
}

impl Vehicle {
    pub fn new(id: VehicleId, team: Team, class: VehicleClass, cell: Cell, at_base: bool) -> Self {
        Self {
            id,
            team,
            class,
            strategy: StrategyId::for_vehicle(team, class),
            cell,
            prev_cell: cell,
            target: None,
            path: VecDeque::new(),
            cargo: Vec::new(),
            trips_remaining: get_profile(class).max_trips,
            phase: VehiclePhase::Idle,
            alive: true,
            at_base,
            score: 0,
            avoid_targets: BTreeSet::new(),
        }
    }

    pub fn profile(&self) -> VehicleProfile {
        get_profile(self.class)
    }

    pub fn is_full(&self) -> bool {
        self.cargo.len() >= self.profile().capacity
    }

    /// Parked at base after a forced return; takes no further part.
    pub fn is_parked(&self) -> bool {
        self.phase == VehiclePhase::ForcedReturning && self.at_base && self.cargo.is_empty()
    }

    /// Alive and not parked.
    pub fn can_act(&self) -> bool {
        self.alive && !self.is_parked()
    }

    pub fn context(&self) -> DecisionContext {
        DecisionContext {
            id: self.id,
            team: self.team,
            class: self.class,
            cell: self.cell,
            cargo_len: self.cargo.len(),
            trips_remaining: self.trips_remaining,
            at_base: self.at_base,
        }
    }

    pub fn set_route(&mut self, route: impl IntoIterator<Item = Cell>) {
        self.path = route.into_iter().collect();
        self.target = self.path.back().copied();
    }

    pub fn clear_route(&mut self) {
        self.path.clear();
        self.target = None;
    }

    /// Load one unit of cargo if the class allows the kind and has room.
    pub fn load(&mut self, cargo: Cargo) -> bool {
        if !self.profile().can_carry(cargo.kind) || self.is_full() {
            return false;
        }
        self.cargo.push(cargo);
        true
    }

    /// Commit to a round trip home. Charges one trip, only on the
    /// transition into `Returning`.
    pub fn commit_return(&mut self) -> bool {
        if !self.alive
            || matches!(
                self.phase,
                VehiclePhase::Returning | VehiclePhase::ForcedReturning
            )
        {
            return false;
        }
        self.trips_remaining = self.trips_remaining.saturating_sub(1);
        self.phase = VehiclePhase::Returning;
        self.clear_route();
        true
    }

    /// Realise cargo into score, refill trips and go idle. Returns the
    /// number of items and the value delivered.
    pub fn deliver(&mut self) -> (usize, u32) {
        let delivered = self.unload();
        self.trips_remaining = self.profile().max_trips;
        self.phase = VehiclePhase::Idle;
        self.avoid_targets.clear();
        self.clear_route();
        delivered
    }

    /// Final delivery after a forced return. Trips are not refilled.
    pub fn finalize(&mut self) -> (usize, u32) {
        self.clear_route();
        self.unload()
    }

    fn unload(&mut self) -> (usize, u32) {
        let items = self.cargo.len();
        let value: u32 = self.cargo.drain(..).map(|c| c.value).sum();
        self.score += value;
        (items, value)
    }

    /// Destroy the vehicle. Cargo is lost; score already banked stays.
    pub fn kill(&mut self) {
        self.alive = false;
        self.phase = VehiclePhase::Dead;
        self.cargo.clear();
        self.clear_route();
    }

    /// Order the vehicle home for good, discarding its route and intent.
    pub fn force_return(&mut self) -> bool {
        if !self.alive || self.phase == VehiclePhase::ForcedReturning {
            return false;
        }
        self.phase = VehiclePhase::ForcedReturning;
        self.clear_route();
        true
    }

    /// Advance one cell along the route.
    pub fn step(&mut self) -> Option<Cell> {
        let next = self.path.pop_front()?;
        self.prev_cell = self.cell;
        self.cell = next;
        if self.path.is_empty() {
            self.target = None;
        }
        Some(next)
    }

    /// Pure render view; `alpha` in `[0, 1]` blends from the previous cell.
    pub fn render_state(&self, alpha: f32, grid: &GridWorld) -> VehicleRender {
        let from = grid.cell_to_pixel(self.prev_cell).as_vec2();
        let to = grid.cell_to_pixel(self.cell).as_vec2();
        VehicleRender {
            id: self.id,
            team: self.team,
            class: self.class,
            position: from.lerp(to, alpha.clamp(0.0, 1.0)),
            alive: self.alive,
            cargo_count: self.cargo.len(),
        }
    }
}
