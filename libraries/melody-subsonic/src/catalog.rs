//! `CatalogService` implementation backed by a Subsonic server.

use crate::client::SubsonicClient;
use async_trait::async_trait;
use melody_core::{CatalogError, CatalogPage, CatalogService, SongId, StreamReference};
use tracing::debug;

#[async_trait]
impl CatalogService for SubsonicClient {
    async fn fetch_songs_page(
        &self,
        page: u32,
        page_size: u32,
    ) -> melody_core::Result<CatalogPage> {
        self.songs_page(page, page_size).await.map_err(Into::into)
    }

    async fn resolve_stream_reference(
        &self,
        song_id: &SongId,
    ) -> melody_core::Result<StreamReference> {
        if song_id.is_empty() {
            return Err(CatalogError::invalid_reference(song_id.as_str()));
        }

        // Unknown ids come back as API error 70
        let song = self.song(song_id.as_str()).await?;
        debug!(song_id = %song.id, "Resolved stream reference");

        let url = self.stream_url(song_id.as_str()).await?;
        Ok(StreamReference::new(url))
    }
}
