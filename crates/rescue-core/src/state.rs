//! Serializable state trees: full snapshots for save/replay, render views
//! for the presentation layer, and per-tick reports.

use std::collections::BTreeMap;

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use crate::components::{Hazard, Resource};
use crate::enums::*;
use crate::events::SimEvent;
use crate::types::{Base, Cell, HazardId, ResourceId, VehicleId};

/// Complete, self-contained simulation state.
///
/// `load_full_state(full_state())` reproduces the simulation exactly,
/// including the random stream, so resumed runs match the original tick
/// for tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FullState {
    pub tick: u64,
    pub phase: SimPhase,
    pub rng: RngState,
    pub world: WorldState,
    pub bases: Vec<Base>,
    pub fleets: BTreeMap<Team, Vec<VehicleSnapshot>>,
}

/// Position of the ChaCha stream. The 128-bit word position is split so the
/// tree stays within plain JSON number range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RngState {
    pub seed: [u8; 32],
    pub stream: u64,
    pub word_pos_hi: u64,
    pub word_pos_lo: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldState {
    pub width: i32,
    pub height: i32,
    pub tile_size: i32,
    pub obstacles: Vec<Cell>,
    pub resources: Vec<Resource>,
    pub hazards: Vec<Hazard>,
}

/// One vehicle inside a [`FullState`]. Cargo is stored as kinds and rebuilt
/// from the catalogue on load; the strategy is stored as its key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleSnapshot {
    pub id: VehicleId,
    pub class: VehicleClass,
    pub strategy: String,
    pub cell: Cell,
    pub phase: VehiclePhase,
    pub target: Option<Cell>,
    pub path: Vec<Cell>,
    pub cargo: Vec<ResourceKind>,
    pub trips_remaining: u32,
    pub alive: bool,
    pub at_base: bool,
    pub score: u32,
    #[serde(default)]
    pub avoid_targets: Vec<Cell>,
}

/// Result of one logical tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickReport {
    pub tick: u64,
    pub phase: SimPhase,
    pub events: Vec<SimEvent>,
}

impl TickReport {
    /// Whether this tick changed anything observable.
    pub fn changed(&self) -> bool {
        !self.events.is_empty()
    }
}

/// Final or running standings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub scores: BTreeMap<Team, u32>,
    pub survivors: BTreeMap<Team, usize>,
    /// `None` on a draw.
    pub winner: Option<Team>,
}

// --- Render views ---

/// Everything a renderer needs for one animation frame.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RenderFrame {
    pub tick: u64,
    pub vehicles: Vec<VehicleRender>,
    pub resources: Vec<ResourceRender>,
    pub hazards: Vec<HazardRender>,
    pub scores: BTreeMap<Team, u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleRender {
    pub id: VehicleId,
    pub team: Team,
    pub class: VehicleClass,
    /// Top-left pixel, interpolated between the previous and current cell.
    pub position: Vec2,
    pub alive: bool,
    pub cargo_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceRender {
    pub id: ResourceId,
    pub kind: ResourceKind,
    pub position: IVec2,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HazardRender {
    pub id: HazardId,
    pub kind: HazardKind,
    pub center: Vec2,
    pub radius: f32,
    pub active: bool,
}
