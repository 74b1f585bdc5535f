//! JSON save files for snapshots and replays.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use rescue_core::error::SnapshotError;
use rescue_core::state::FullState;

use crate::config::SimConfig;
use crate::engine::SimulationEngine;
use crate::replay::Replay;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("save file I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("save file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("save file holds an unusable snapshot: {0}")]
    Snapshot(#[from] SnapshotError),
}

fn state_path(dir: &Path, slot: &str) -> PathBuf {
    dir.join(format!("{slot}.json"))
}

fn replay_path(dir: &Path, slot: &str) -> PathBuf {
    dir.join(format!("{slot}.replay.json"))
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), PersistenceError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, serde_json::to_string_pretty(value)?)?;
    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, PersistenceError> {
    let json = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&json)?)
}

pub fn save_state(dir: &Path, slot: &str, state: &FullState) -> Result<(), PersistenceError> {
    write_json(&state_path(dir, slot), state)
}

pub fn load_state(dir: &Path, slot: &str) -> Result<FullState, PersistenceError> {
    read_json(&state_path(dir, slot))
}

pub fn save_replay(dir: &Path, slot: &str, replay: &Replay) -> Result<(), PersistenceError> {
    write_json(&replay_path(dir, slot), replay)
}

pub fn load_replay(dir: &Path, slot: &str) -> Result<Replay, PersistenceError> {
    read_json(&replay_path(dir, slot))
}

/// Load a saved snapshot straight into a new engine.
pub fn load_engine(dir: &Path, slot: &str, config: SimConfig) -> Result<SimulationEngine, PersistenceError> {
    let state = load_state(dir, slot)?;
    Ok(SimulationEngine::from_state(&state, config)?)
}
