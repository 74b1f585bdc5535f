//! Simulation engine for the rescue fleets.
//!
//! Owns the world and both fleets, runs systems at a fixed logical tick,
//! and produces snapshots, replays and render frames for whatever sits on
//! top of it.

pub mod config;
pub mod engine;
pub mod hazards;
pub mod persistence;
pub mod replay;
pub mod resources;
pub mod scenario;
pub mod systems;
pub mod vehicle;
pub mod view;
pub mod world;
pub mod world_setup;

pub use config::{ConfigError, SimConfig};
pub use engine::SimulationEngine;
pub use persistence::PersistenceError;
pub use replay::Replay;
pub use rescue_core as core;
pub use scenario::Scenario;
