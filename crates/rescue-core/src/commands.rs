//! Commands sent to the simulation from outside.
//!
//! Commands are queued and processed at the next tick boundary.

use serde::{Deserialize, Serialize};

use crate::types::VehicleId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimCommand {
    /// Stop advancing logical ticks.
    Pause,
    Resume,
    /// Send one vehicle home, discarding its current path and intent.
    ForceReturn { vehicle: VehicleId },
    /// Send every live vehicle home.
    ForceReturnAll,
    /// Move every active mobile hazard to a random free cell.
    RelocateMobileHazards,
}
