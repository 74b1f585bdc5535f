//! Replay recording: one full snapshot per tick with an observable change.

use serde::{Deserialize, Serialize};

use rescue_core::state::FullState;

/// Frames in tick order, starting with the state the run began from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Replay {
    pub frames: Vec<FullState>,
}

impl Replay {
    pub fn new(initial: FullState) -> Self {
        Self {
            frames: vec![initial],
        }
    }

    pub fn push(&mut self, frame: FullState) {
        self.frames.push(frame);
    }

    /// Latest frame at or before `tick`.
    pub fn frame_at(&self, tick: u64) -> Option<&FullState> {
        self.frames.iter().rev().find(|f| f.tick <= tick)
    }

    /// Drop every frame recorded after `tick`.
    pub fn truncate_after(&mut self, tick: u64) {
        self.frames.retain(|f| f.tick <= tick);
    }

    /// Ticks that have a frame, in order.
    pub fn ticks(&self) -> impl Iterator<Item = u64> + '_ {
        self.frames.iter().map(|f| f.tick)
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}
