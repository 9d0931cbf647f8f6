//! Core types for playback management

use melody_core::Song;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Play mode
///
/// Governs how next/previous resolve to a queue position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayMode {
    /// Play in queue order, stop at either end
    #[default]
    Sequential,

    /// Play in queue order, wrap around at either end
    Repeat,

    /// Pick a uniformly random position on every step
    Shuffle,
}

impl PlayMode {
    /// All modes in cycle order
    pub const CYCLE: [PlayMode; 3] = [PlayMode::Sequential, PlayMode::Repeat, PlayMode::Shuffle];

    /// The mode that follows this one in the fixed cycle
    ///
    /// sequential -> repeat -> shuffle -> sequential
    pub fn next(self) -> Self {
        match self {
            PlayMode::Sequential => PlayMode::Repeat,
            PlayMode::Repeat => PlayMode::Shuffle,
            PlayMode::Shuffle => PlayMode::Sequential,
        }
    }
}

/// Navigation direction through the queue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Towards the end of the queue
    Forward,

    /// Towards the start of the queue
    Backward,
}

/// Configuration for the playback controller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Initial volume (0.0-1.0, default: 0.8)
    #[serde(default = "default_volume")]
    pub volume: f32,

    /// Initial play mode (default: Sequential)
    #[serde(default)]
    pub mode: PlayMode,
}

fn default_volume() -> f32 {
    0.8
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            volume: default_volume(),
            mode: PlayMode::default(),
        }
    }
}

/// Read-only view of the controller, for presentation layers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackSnapshot {
    /// Song under the cursor
    pub current_song: Option<Song>,

    /// Queue cursor (`None` means no current song)
    pub current_index: Option<usize>,

    /// Number of songs in the queue
    pub queue_len: usize,

    /// Whether playback is running
    pub is_playing: bool,

    /// Volume (0.0-1.0)
    pub volume: f32,

    /// Elapsed time in the current song
    pub elapsed: Duration,

    /// Total length of the current song, once known
    pub duration: Duration,

    /// Active play mode
    pub mode: PlayMode,

    /// Whether `next` can move the cursor
    pub has_next: bool,

    /// Whether `previous` can move the cursor
    pub has_previous: bool,
}
