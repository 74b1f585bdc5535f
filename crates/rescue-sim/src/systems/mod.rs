//! Systems that operate on the simulation world each tick.
//!
//! Systems are plain functions over the world and the fleet. They do not
//! own state; everything they touch is passed in by the engine.

pub mod collision;
pub mod detonation;
pub mod hazard_timer;
pub mod render;
pub mod snapshot;
pub mod vehicles;
