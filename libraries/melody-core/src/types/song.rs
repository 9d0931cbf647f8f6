/// Song domain type
use crate::types::SongId;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};
use std::time::Duration;

/// A track in the remote catalog
///
/// Produced by the catalog service and read-only to the engine. Two songs
/// are the same song when their ids match; every other field is descriptive.
///
/// The serde shape follows the Subsonic `child` object, so a song can be
/// deserialized straight out of a server response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    /// Unique song identifier
    pub id: SongId,

    /// Song title
    pub title: String,

    /// Artist name
    #[serde(default)]
    pub artist: String,

    /// Artist identifier on the server
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist_id: Option<String>,

    /// Album name
    #[serde(default)]
    pub album: String,

    /// Album identifier on the server
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album_id: Option<String>,

    /// Track length in whole seconds
    #[serde(rename = "duration", default)]
    pub duration_secs: u32,

    /// Cover art reference
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_art: Option<String>,

    /// Track number in album
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track: Option<u32>,

    /// Release year
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<u32>,

    /// Genre
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,

    /// Bit rate in kbps
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bit_rate: Option<u32>,

    /// File size in bytes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,

    /// File extension of the stored media (e.g. "flac")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,

    /// Media container MIME type
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,

    /// Storage path on the server
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl Song {
    /// Create a new song with minimal metadata
    pub fn new(id: impl Into<SongId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            artist: String::new(),
            artist_id: None,
            album: String::new(),
            album_id: None,
            duration_secs: 0,
            cover_art: None,
            track: None,
            year: None,
            genre: None,
            bit_rate: None,
            size: None,
            suffix: None,
            content_type: None,
            path: None,
        }
    }

    /// Set the artist name
    #[must_use]
    pub fn with_artist(mut self, artist: impl Into<String>) -> Self {
        self.artist = artist.into();
        self
    }

    /// Set the album name
    #[must_use]
    pub fn with_album(mut self, album: impl Into<String>) -> Self {
        self.album = album.into();
        self
    }

    /// Set the track length in seconds
    #[must_use]
    pub fn with_duration_secs(mut self, secs: u32) -> Self {
        self.duration_secs = secs;
        self
    }

    /// Get the track length as a Duration
    pub fn duration(&self) -> Duration {
        Duration::from_secs(u64::from(self.duration_secs))
    }
}

impl PartialEq for Song {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Song {}

impl Hash for Song {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
