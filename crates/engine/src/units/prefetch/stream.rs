//! Stream Buffer.
//!
//! A fixed-width window of the blocks following the latest access. Each
//! update rewrites the whole window rather than shifting it, so the buffer
//! always describes exactly one step.

use serde::{Deserialize, Serialize};

use super::Predictor;

/// One slot of the stream window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamBufferEntry {
    /// Block number held by the slot.
    pub address: u64,
    /// Whether the slot has been filled.
    pub valid: bool,
    /// Whether a demand access has consumed the slot.
    pub accessed: bool,
}

/// Stream window state.
#[derive(Debug, Clone)]
pub struct StreamBuffer {
    entries: Vec<StreamBufferEntry>,
}

impl StreamBuffer {
    /// Creates a window of `width` empty slots.
    pub fn new(width: usize) -> Self {
        Self {
            entries: vec![StreamBufferEntry::default(); width],
        }
    }

    /// Current window, nearest block first.
    pub fn entries(&self) -> &[StreamBufferEntry] {
        &self.entries
    }

    /// Window width.
    pub fn width(&self) -> usize {
        self.entries.len()
    }
}

impl Predictor for StreamBuffer {
    fn update(&mut self, current_block: u64) {
        for (offset, entry) in self.entries.iter_mut().enumerate() {
            *entry = StreamBufferEntry {
                address: current_block.saturating_add(offset as u64),
                valid: true,
                accessed: false,
            };
        }
    }
}
