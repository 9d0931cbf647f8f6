/// Catalog page and stream reference types
use crate::types::Song;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One bounded batch of songs returned by the catalog service
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogPage {
    /// Songs in catalog order
    pub songs: Vec<Song>,

    /// Whether the server has songs past this page
    pub has_more: bool,
}

impl CatalogPage {
    /// Create a page
    pub fn new(songs: Vec<Song>, has_more: bool) -> Self {
        Self { songs, has_more }
    }

    /// Number of songs in the page
    pub fn len(&self) -> usize {
        self.songs.len()
    }

    /// Whether the page carries no songs
    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }
}

/// Opaque playable reference for a song (usually a stream URL)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StreamReference(String);

impl StreamReference {
    /// Wrap a playable reference
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into the inner string
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for StreamReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
