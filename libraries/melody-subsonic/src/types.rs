//! Types for Subsonic API requests and responses.

use melody_core::Song;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for connecting to a Subsonic server.
#[derive(Debug, Clone)]
pub struct SubsonicConfig {
    /// Base URL of the server (e.g., "https://music.example.com")
    pub url: String,
    /// Client name sent as the `c` parameter
    pub client_name: String,
    /// API version sent as the `v` parameter
    pub api_version: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl SubsonicConfig {
    /// Create a config with default client identity and timeout.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client_name: "MelodyFlow".to_string(),
            api_version: "1.16.1".to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

/// Token credentials for an established session.
///
/// The password itself is never kept; only `md5(password + salt)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub token: String,
    pub salt: String,
    /// Server URL without trailing slash
    pub server_url: String,
}

/// Album ordering for `getAlbumList2`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlbumListType {
    #[default]
    Newest,
    Recent,
    Frequent,
    Random,
}

impl AlbumListType {
    /// Wire value of the `type` parameter
    pub fn as_str(self) -> &'static str {
        match self {
            AlbumListType::Newest => "newest",
            AlbumListType::Recent => "recent",
            AlbumListType::Frequent => "frequent",
            AlbumListType::Random => "random",
        }
    }
}

/// Album summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Album {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub artist: String,
    #[serde(default)]
    pub artist_id: Option<String>,
    #[serde(default)]
    pub cover_art: Option<String>,
    #[serde(default)]
    pub song_count: u32,
    /// Total length in seconds
    #[serde(default)]
    pub duration: u32,
    #[serde(default)]
    pub created: Option<String>,
    #[serde(default)]
    pub year: Option<u32>,
    #[serde(default)]
    pub genre: Option<String>,
}

/// Artist summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub album_count: u32,
    #[serde(default)]
    pub starred: Option<String>,
}

/// Result of a free-text search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResult {
    pub artists: Vec<Artist>,
    pub albums: Vec<Album>,
    pub songs: Vec<Song>,
}

// =============================================================================
// Wire Envelope
// =============================================================================

/// `{"subsonic-response": {...}}`
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    #[serde(rename = "subsonic-response")]
    pub response: ResponseBody<T>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ResponseBody<T> {
    pub status: String,
    #[serde(default)]
    pub error: Option<ApiError>,
    #[serde(flatten)]
    pub payload: T,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiError {
    pub code: u32,
    #[serde(default)]
    pub message: String,
}

/// Payload of responses that carry nothing but status (e.g. `ping`)
#[derive(Debug, Default, Deserialize)]
pub(crate) struct Empty {}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct SearchPayload {
    #[serde(rename = "searchResult3", default)]
    pub search_result: Option<SearchResult3>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct SearchResult3 {
    #[serde(default)]
    pub artist: Vec<Artist>,
    #[serde(default)]
    pub album: Vec<Album>,
    #[serde(default)]
    pub song: Vec<Song>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct AlbumListPayload {
    #[serde(rename = "albumList2", default)]
    pub album_list: Option<AlbumList>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct AlbumList {
    #[serde(default)]
    pub album: Vec<Album>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct AlbumPayload {
    #[serde(default)]
    pub album: Option<AlbumWithSongs>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AlbumWithSongs {
    #[serde(flatten)]
    pub album: Album,
    #[serde(default)]
    pub song: Vec<Song>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct SongPayload {
    #[serde(default)]
    pub song: Option<Song>,
}
