//! Playback queue
//!
//! An ordered list of songs in play order plus a cursor. Holds each song id
//! at most once and never leaves a cursor on an empty queue.

use melody_core::{Song, SongId};

/// Songs in play order with a cursor on the active one
///
/// ```text
///   0: Song A
/// > 1: Song B   <- current
///   2: Song C
/// ```
#[derive(Debug, Clone, Default)]
pub struct PlaybackQueue {
    songs: Vec<Song>,

    /// `None` means no current song
    current: Option<usize>,
}

impl PlaybackQueue {
    /// Create new empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of songs in the queue
    pub fn len(&self) -> usize {
        self.songs.len()
    }

    /// Whether the queue is empty
    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    /// Songs in play order
    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    /// Cursor position
    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    /// Song under the cursor
    pub fn current(&self) -> Option<&Song> {
        self.current.and_then(|i| self.songs.get(i))
    }

    /// Position of a song id in the queue
    pub fn position_of(&self, id: &SongId) -> Option<usize> {
        self.songs.iter().position(|s| &s.id == id)
    }

    /// Replace the whole queue and put the cursor on `target`
    ///
    /// Later duplicates of an id already seen are dropped so the queue keeps
    /// one entry per id. If `target` is not in the new queue the cursor is
    /// cleared and `None` is returned.
    pub fn replace(&mut self, songs: Vec<Song>, target: &SongId) -> Option<usize> {
        let mut deduped: Vec<Song> = Vec::with_capacity(songs.len());
        for song in songs {
            if !deduped.iter().any(|s| s.id == song.id) {
                deduped.push(song);
            }
        }

        self.songs = deduped;
        self.current = self.position_of(target);
        self.current
    }

    /// Put the cursor on `song`, appending it first if the queue lacks it
    ///
    /// Returns the new cursor position.
    pub fn select_or_append(&mut self, song: Song) -> usize {
        let index = match self.position_of(&song.id) {
            Some(existing) => existing,
            None => {
                self.songs.push(song);
                self.songs.len() - 1
            }
        };

        self.current = Some(index);
        index
    }

    /// Move the cursor to `index`
    ///
    /// Out-of-range positions leave the cursor untouched.
    pub fn select(&mut self, index: usize) -> Option<&Song> {
        if index < self.songs.len() {
            self.current = Some(index);
            self.songs.get(index)
        } else {
            None
        }
    }
}
