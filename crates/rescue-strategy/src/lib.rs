//! Decision engine for rescue vehicles.
//!
//! Each (team, class) pair maps to a fixed, ordered list of guarded rules.
//! Evaluation is pure with respect to the world: rules only read through the
//! [`view::WorldView`] trait and return an [`view::Intent`] for the vehicle
//! state machine to carry out.

pub mod profiles;
pub mod rules;
pub mod strategy;
pub mod view;

pub use rescue_core as core;
pub use rules::decide;
pub use strategy::StrategyId;
pub use view::{DecisionContext, HazardSighting, Intent, ResourceSighting, WorldView};
