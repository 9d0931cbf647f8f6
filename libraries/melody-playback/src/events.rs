//! Playback Events
//!
//! Event-based communication for UI synchronization. The controller queues
//! one event per observable change; the presentation layer drains them after
//! each call and re-renders what changed.

use crate::types::PlayMode;
use serde::{Deserialize, Serialize};

/// Events emitted by the playback controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlaybackEvent {
    /// Cursor moved or the song under it changed
    SongChanged {
        /// ID of the new current song, if any
        song_id: Option<String>,
        /// New cursor position
        index: Option<usize>,
    },

    /// Playing flag flipped or was forced on
    PlayStateChanged {
        /// Whether playback is running
        is_playing: bool,
    },

    /// Volume changed
    VolumeChanged {
        /// New level (0.0-1.0)
        volume: f32,
    },

    /// Play mode changed
    ModeChanged {
        /// The new mode
        mode: PlayMode,
    },

    /// Queue contents changed (append or replacement)
    QueueChanged {
        /// New queue length
        length: usize,
    },

    /// Elapsed time reported or sought
    PositionChanged {
        /// Elapsed time in milliseconds
        elapsed_ms: u64,
    },

    /// Total length of the current song became known
    DurationChanged {
        /// Total length in milliseconds
        duration_ms: u64,
    },
}
