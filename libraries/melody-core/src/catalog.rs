//! Catalog service trait
//!
//! The engine's only collaborator. Authentication, transport, timeouts and
//! retry policy all live behind this seam; the engine just asks for pages
//! and stream references.

use crate::error::Result;
use crate::types::{CatalogPage, SongId, StreamReference};
use async_trait::async_trait;
use std::sync::Arc;

/// Remote music catalog
///
/// Implementations are constructed explicitly and passed into the
/// components that need them, so tests can substitute a fake.
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Fetch one page of the full song listing
    ///
    /// `page` is 1-based. Fails with `CatalogUnavailable` on network,
    /// authentication or parse failure.
    async fn fetch_songs_page(&self, page: u32, page_size: u32) -> Result<CatalogPage>;

    /// Resolve a song to something the audio layer can play
    ///
    /// Fails with `NotAuthenticated` when no session exists, or
    /// `InvalidReference` when the id is unknown to the service.
    async fn resolve_stream_reference(&self, song_id: &SongId) -> Result<StreamReference>;
}

#[async_trait]
impl<T: CatalogService + ?Sized> CatalogService for Arc<T> {
    async fn fetch_songs_page(&self, page: u32, page_size: u32) -> Result<CatalogPage> {
        (**self).fetch_songs_page(page, page_size).await
    }

    async fn resolve_stream_reference(&self, song_id: &SongId) -> Result<StreamReference> {
        (**self).resolve_stream_reference(song_id).await
    }
}
