//! Soft per-team reservations of route destinations.
//!
//! A vehicle reserves the goal cell of its in-flight route; allies treat that
//! cell as blocked when planning. The shared grid is never touched, and
//! enemies ignore the reservation entirely.

use std::collections::HashMap;

use rescue_core::enums::Team;
use rescue_core::types::{Cell, VehicleId};

#[derive(Debug, Clone, Default)]
pub struct ReservationTable {
    by_cell: HashMap<(Team, Cell), VehicleId>,
    by_vehicle: HashMap<VehicleId, (Team, Cell)>,
}

impl ReservationTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve `cell` for `vehicle`, dropping any reservation it held before.
    /// Fails if an ally already holds the cell.
    pub fn reserve(&mut self, team: Team, vehicle: VehicleId, cell: Cell) -> bool {
        match self.by_cell.get(&(team, cell)) {
            Some(holder) if *holder == vehicle => return true,
            Some(_) => return false,
            None => {}
        }
        self.release(vehicle);
        self.by_cell.insert((team, cell), vehicle);
        self.by_vehicle.insert(vehicle, (team, cell));
        true
    }

    /// Drop whatever `vehicle` holds. No-op when it holds nothing.
    pub fn release(&mut self, vehicle: VehicleId) {
        if let Some(key) = self.by_vehicle.remove(&vehicle) {
            self.by_cell.remove(&key);
        }
    }

    /// Whether `cell` is held by an ally of `vehicle` on `team`.
    pub fn is_blocked_for(&self, team: Team, vehicle: VehicleId, cell: Cell) -> bool {
        self.by_cell
            .get(&(team, cell))
            .is_some_and(|holder| *holder != vehicle)
    }

    pub fn holder(&self, team: Team, cell: Cell) -> Option<VehicleId> {
        self.by_cell.get(&(team, cell)).copied()
    }

    pub fn reserved_by(&self, vehicle: VehicleId) -> Option<Cell> {
        self.by_vehicle.get(&vehicle).map(|(_, cell)| *cell)
    }

    pub fn clear(&mut self) {
        self.by_cell.clear();
        self.by_vehicle.clear();
    }

    pub fn len(&self) -> usize {
        self.by_vehicle.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_vehicle.is_empty()
    }
}
