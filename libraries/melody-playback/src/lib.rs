//! MelodyFlow - Playback Management
//!
//! Platform-agnostic playback state for MelodyFlow.
//!
//! This crate provides:
//! - Playback queue (play order, cursor, one entry per song id)
//! - Play-mode policy (sequential, repeat, shuffle)
//! - Volume control (linear, clamped to 0.0-1.0)
//! - Transport state (playing flag, elapsed, duration)
//! - Events for UI synchronization
//!
//! # Architecture
//!
//! `melody-playback` does no I/O:
//! - No audio decoding or output
//! - No network access (stream references are resolved by the UI layer
//!   through a `CatalogService`)
//!
//! # Example: Basic Playback
//!
//! ```rust
//! use melody_core::Song;
//! use melody_playback::{PlaybackConfig, PlaybackController, PlayMode};
//!
//! let mut controller = PlaybackController::new(PlaybackConfig::default());
//!
//! let album = vec![
//!     Song::new("1", "So What").with_duration_secs(562),
//!     Song::new("2", "Freddie Freeloader").with_duration_secs(589),
//!     Song::new("3", "Blue in Green").with_duration_secs(337),
//! ];
//!
//! // Play the second track with the album as queue
//! controller.play_song(album[1].clone(), Some(album.clone()));
//! assert_eq!(controller.current_index(), Some(1));
//!
//! controller.next();
//! assert_eq!(controller.current_song().unwrap().title, "Blue in Green");
//!
//! // Sequential mode stops at the end
//! controller.next();
//! assert_eq!(controller.current_index(), Some(2));
//!
//! // Repeat mode wraps
//! controller.cycle_play_mode();
//! assert_eq!(controller.mode(), PlayMode::Repeat);
//! controller.next();
//! assert_eq!(controller.current_index(), Some(0));
//! ```

mod controller;
mod events;
mod policy;
mod queue;
pub mod types;
mod volume;

// Public exports
pub use controller::PlaybackController;
pub use events::PlaybackEvent;
pub use policy::resolve_index;
pub use queue::PlaybackQueue;
pub use types::{Direction, PlayMode, PlaybackConfig, PlaybackSnapshot};
pub use volume::Volume;
