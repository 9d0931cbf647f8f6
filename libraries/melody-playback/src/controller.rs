//! Playback controller - core orchestration
//!
//! Owns the queue, the play mode and transport state. Every mutation from
//! the presentation layer enters through here so the queue invariants hold.

use crate::{
    events::PlaybackEvent,
    policy::resolve_index,
    queue::PlaybackQueue,
    types::{Direction, PlayMode, PlaybackConfig, PlaybackSnapshot},
    volume::Volume,
};
use melody_core::Song;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use std::time::Duration;
use tracing::debug;

/// Undrained events kept before the oldest are discarded
const MAX_PENDING_EVENTS: usize = 256;

/// Central playback management
///
/// Orchestrates:
/// - Queue and cursor (one entry per song id)
/// - Play mode (sequential, repeat, shuffle)
/// - Transport state (playing flag, volume, elapsed, duration)
///
/// Transport fields are written by an external timer or media-event source;
/// the controller keeps the last reported value.
pub struct PlaybackController {
    queue: PlaybackQueue,
    is_playing: bool,
    volume: Volume,
    mode: PlayMode,
    elapsed: Duration,
    duration: Duration,

    // Shuffle source; injectable for deterministic tests
    rng: Box<dyn RngCore + Send>,

    pending_events: Vec<PlaybackEvent>,
}

impl PlaybackController {
    /// Create new playback controller
    pub fn new(config: PlaybackConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Create a controller that shuffles with the given random source
    pub fn with_rng(config: PlaybackConfig, rng: impl RngCore + Send + 'static) -> Self {
        Self {
            queue: PlaybackQueue::new(),
            is_playing: false,
            volume: Volume::new(config.volume),
            mode: config.mode,
            elapsed: Duration::ZERO,
            duration: Duration::ZERO,
            rng: Box::new(rng),
            pending_events: Vec::new(),
        }
    }

    // ===== Playback Control =====

    /// Start playing `song`
    ///
    /// With `queue_override`, the queue is replaced and the cursor moves to
    /// `song` within it; if `song` is not in the override the cursor is
    /// cleared and no song is current. Without an override, `song` is
    /// selected if already queued, otherwise appended and selected.
    ///
    /// Either way the playing flag is set.
    pub fn play_song(&mut self, song: Song, queue_override: Option<Vec<Song>>) {
        let index = match queue_override {
            Some(songs) => {
                let index = self.queue.replace(songs, &song.id);
                if index.is_none() {
                    debug!(song_id = %song.id, "Song not found in replacement queue");
                }
                self.emit(PlaybackEvent::QueueChanged {
                    length: self.queue.len(),
                });
                index
            }
            None => {
                let before = self.queue.len();
                let index = self.queue.select_or_append(song);
                if self.queue.len() != before {
                    self.emit(PlaybackEvent::QueueChanged {
                        length: self.queue.len(),
                    });
                }
                Some(index)
            }
        };

        debug!(index = ?index, queue_len = self.queue.len(), "Play song");
        self.emit_song_changed();
        self.set_playing(true);
    }

    /// Flip the playing flag
    ///
    /// Flips even when no song is current.
    pub fn toggle_play(&mut self) {
        self.set_playing(!self.is_playing);
    }

    /// Skip to the next song according to the play mode
    pub fn next(&mut self) {
        self.step(Direction::Forward);
    }

    /// Go back to the previous song according to the play mode
    pub fn previous(&mut self) {
        self.step(Direction::Backward);
    }

    fn step(&mut self, direction: Direction) {
        if self.queue.is_empty() {
            return;
        }

        let target = resolve_index(
            self.mode,
            self.queue.len(),
            self.queue.current_index(),
            direction,
            &mut self.rng,
        );

        let Some(index) = target else {
            debug!(?direction, mode = ?self.mode, "Navigation at boundary, ignored");
            return;
        };

        if self.queue.select(index).is_some() {
            debug!(?direction, index, "Cursor moved");
            self.emit_song_changed();
            self.set_playing(true);
        }
    }

    // ===== Settings =====

    /// Set volume, clamped into `[0.0, 1.0]`
    pub fn set_volume(&mut self, volume: f32) {
        self.volume.set_level(volume);
        self.emit(PlaybackEvent::VolumeChanged {
            volume: self.volume.level(),
        });
    }

    /// Advance sequential -> repeat -> shuffle -> sequential
    pub fn cycle_play_mode(&mut self) {
        self.set_play_mode(self.mode.next());
    }

    /// Set the play mode directly
    pub fn set_play_mode(&mut self, mode: PlayMode) {
        self.mode = mode;
        debug!(?mode, "Play mode set");
        self.emit(PlaybackEvent::ModeChanged { mode });
    }

    // ===== Transport =====

    /// Record elapsed time reported by the media source
    ///
    /// Not validated against `duration`.
    pub fn update_elapsed(&mut self, elapsed: Duration) {
        self.elapsed = elapsed;
        self.emit_position();
    }

    /// Record the authoritative length of the current song
    pub fn set_duration(&mut self, duration: Duration) {
        self.duration = duration;
        self.emit(PlaybackEvent::DurationChanged {
            duration_ms: duration.as_millis() as u64,
        });
    }

    /// Jump to a position in the current song
    ///
    /// Not validated against `duration`.
    pub fn seek(&mut self, position: Duration) {
        self.elapsed = position;
        self.emit_position();
    }

    // ===== State Queries =====

    /// Song under the queue cursor
    pub fn current_song(&self) -> Option<&Song> {
        self.queue.current()
    }

    /// Queue cursor (`None` means no current song)
    pub fn current_index(&self) -> Option<usize> {
        self.queue.current_index()
    }

    /// Songs in play order
    pub fn queue(&self) -> &[Song] {
        self.queue.songs()
    }

    /// Number of queued songs
    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    /// Whether playback is running
    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    /// Current volume (0.0-1.0)
    pub fn volume(&self) -> f32 {
        self.volume.level()
    }

    /// Active play mode
    pub fn mode(&self) -> PlayMode {
        self.mode
    }

    /// Elapsed time in the current song
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Total length of the current song
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Whether `next` would move the cursor
    ///
    /// Always true in repeat mode, even for an empty queue.
    pub fn has_next(&self) -> bool {
        if self.mode == PlayMode::Repeat {
            return true;
        }
        match self.queue.current_index() {
            Some(i) => i + 1 < self.queue.len(),
            None => !self.queue.is_empty(),
        }
    }

    /// Whether `previous` would move the cursor
    ///
    /// Always true in repeat mode, even for an empty queue.
    pub fn has_previous(&self) -> bool {
        if self.mode == PlayMode::Repeat {
            return true;
        }
        matches!(self.queue.current_index(), Some(i) if i > 0)
    }

    /// Capture the observable state in one value
    pub fn snapshot(&self) -> PlaybackSnapshot {
        PlaybackSnapshot {
            current_song: self.current_song().cloned(),
            current_index: self.current_index(),
            queue_len: self.queue.len(),
            is_playing: self.is_playing,
            volume: self.volume(),
            elapsed: self.elapsed,
            duration: self.duration,
            mode: self.mode,
            has_next: self.has_next(),
            has_previous: self.has_previous(),
        }
    }

    // ===== Events =====

    /// Take all events queued since the last drain
    ///
    /// Callers should drain regularly. Consecutive position updates collapse
    /// into the latest, and past `MAX_PENDING_EVENTS` the oldest event is
    /// dropped.
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Check if there are pending events
    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    fn set_playing(&mut self, is_playing: bool) {
        self.is_playing = is_playing;
        self.emit(PlaybackEvent::PlayStateChanged { is_playing });
    }

    fn emit_song_changed(&mut self) {
        let song_id = self.queue.current().map(|s| s.id.to_string());
        let index = self.queue.current_index();
        self.emit(PlaybackEvent::SongChanged { song_id, index });
    }

    fn emit_position(&mut self) {
        self.emit(PlaybackEvent::PositionChanged {
            elapsed_ms: self.elapsed.as_millis() as u64,
        });
    }

    fn emit(&mut self, event: PlaybackEvent) {
        if matches!(event, PlaybackEvent::PositionChanged { .. })
            && matches!(
                self.pending_events.last(),
                Some(PlaybackEvent::PositionChanged { .. })
            )
        {
            self.pending_events.pop();
        }
        if self.pending_events.len() >= MAX_PENDING_EVENTS {
            self.pending_events.remove(0);
        }
        self.pending_events.push(event);
    }
}

impl Default for PlaybackController {
    fn default() -> Self {
        Self::new(PlaybackConfig::default())
    }
}

impl std::fmt::Debug for PlaybackController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackController")
            .field("queue", &self.queue)
            .field("is_playing", &self.is_playing)
            .field("volume", &self.volume)
            .field("mode", &self.mode)
            .field("elapsed", &self.elapsed)
            .field("duration", &self.duration)
            .finish_non_exhaustive()
    }
}
