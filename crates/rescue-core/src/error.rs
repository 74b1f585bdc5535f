//! Errors raised when reconstructing simulation state from external data.

use thiserror::Error;

use crate::enums::VehiclePhase;
use crate::types::{Cell, VehicleId};

/// A snapshot failed validation. The simulation state is left untouched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SnapshotError {
    #[error("invalid map dimensions {width}x{height} with tile size {tile_size}")]
    InvalidDimensions {
        width: i32,
        height: i32,
        tile_size: i32,
    },
    #[error("{what} at {cell} lies outside the map")]
    CellOutOfBounds { what: &'static str, cell: Cell },
    #[error("{what} at {cell} overlaps another occupant")]
    BlockedCell { what: &'static str, cell: Cell },
    #[error("duplicate {what} id {id}")]
    DuplicateId { what: &'static str, id: u32 },
    #[error("unknown strategy key `{0}`")]
    UnknownStrategy(String),
    #[error("strategy `{key}` does not fit vehicle {vehicle}")]
    StrategyMismatch { vehicle: VehicleId, key: String },
    #[error("{vehicle} carries {len} items but its capacity is {capacity}")]
    CargoOverCapacity {
        vehicle: VehicleId,
        len: usize,
        capacity: usize,
    },
    #[error("{vehicle} has {trips} trips remaining, above its maximum {max}")]
    TripsOutOfRange {
        vehicle: VehicleId,
        trips: u32,
        max: u32,
    },
    #[error("{vehicle} has a path that is not a chain of adjacent cells")]
    BrokenPath { vehicle: VehicleId },
    #[error("hazard radius {0} is not a positive finite number")]
    InvalidRadius(f32),
    #[error("hazard radius {radius} exceeds the map diagonal {max}")]
    RadiusTooLarge { radius: f32, max: f32 },
    #[error("{vehicle} is marked alive={alive} but in phase {phase:?}")]
    PhaseMismatch {
        vehicle: VehicleId,
        alive: bool,
        phase: VehiclePhase,
    },
    #[error("fleet references a team without a base")]
    UnknownBase,
}
