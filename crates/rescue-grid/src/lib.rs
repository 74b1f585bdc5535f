//! Grid layer for the rescue simulation.
//!
//! Occupancy grid with cell/pixel conversion, A* route planning over it,
//! and the per-team soft reservation table used to spread allied vehicles.

pub use rescue_core as core;

pub mod grid;
pub mod pathfinding;
pub mod reservation;

pub use grid::GridWorld;
pub use pathfinding::find_path;
pub use reservation::ReservationTable;
