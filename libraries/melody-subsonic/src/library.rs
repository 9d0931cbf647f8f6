//! Catalog browsing operations for Subsonic servers.

use crate::client::SubsonicClient;
use crate::error::{Result, SubsonicError};
use crate::types::{
    Album, AlbumListPayload, AlbumListType, AlbumPayload, SearchPayload, SearchResult,
    SongPayload,
};
use melody_core::{CatalogPage, Song};
use tracing::debug;

const SEARCH_ARTIST_COUNT: u32 = 10;
const SEARCH_ALBUM_COUNT: u32 = 20;
const SEARCH_SONG_COUNT: u32 = 50;

impl SubsonicClient {
    /// Get one page of the full song listing.
    ///
    /// Uses `search3` with an empty query, which servers answer with every
    /// song. A page shorter than `page_size` is the last one.
    pub async fn songs_page(&self, page: u32, page_size: u32) -> Result<CatalogPage> {
        let page = page.max(1);
        let offset = (page - 1).saturating_mul(page_size);

        let payload: SearchPayload = self
            .get(
                "search3.view",
                &[
                    ("query", String::new()),
                    ("artistCount", "0".to_string()),
                    ("albumCount", "0".to_string()),
                    ("songCount", page_size.to_string()),
                    ("songOffset", offset.to_string()),
                ],
            )
            .await?;

        let songs = payload.search_result.map(|r| r.song).unwrap_or_default();
        let has_more = page_size > 0 && songs.len() >= page_size as usize;

        debug!(page, page_size, received = songs.len(), has_more, "Fetched songs page");

        Ok(CatalogPage::new(songs, has_more))
    }

    /// Get a list of albums.
    pub async fn album_list(
        &self,
        kind: AlbumListType,
        size: u32,
        offset: u32,
    ) -> Result<Vec<Album>> {
        let payload: AlbumListPayload = self
            .get(
                "getAlbumList2.view",
                &[
                    ("type", kind.as_str().to_string()),
                    ("size", size.to_string()),
                    ("offset", offset.to_string()),
                ],
            )
            .await?;

        let albums = payload.album_list.map(|l| l.album).unwrap_or_default();
        debug!(kind = kind.as_str(), albums = albums.len(), "Fetched album list");
        Ok(albums)
    }

    /// Get an album with its songs.
    pub async fn album(&self, album_id: &str) -> Result<(Album, Vec<Song>)> {
        let payload: AlbumPayload = self
            .get("getAlbum.view", &[("id", album_id.to_string())])
            .await?;

        let album = payload
            .album
            .ok_or_else(|| SubsonicError::NotFound(format!("album {}", album_id)))?;

        debug!(album_id = %album_id, songs = album.song.len(), "Fetched album");
        Ok((album.album, album.song))
    }

    /// Get a single song.
    pub async fn song(&self, song_id: &str) -> Result<Song> {
        let payload: SongPayload = self
            .get("getSong.view", &[("id", song_id.to_string())])
            .await?;

        payload
            .song
            .ok_or_else(|| SubsonicError::NotFound(format!("song {}", song_id)))
    }

    /// Search artists, albums and songs.
    pub async fn search(&self, query: &str) -> Result<SearchResult> {
        let payload: SearchPayload = self
            .get(
                "search3.view",
                &[
                    ("query", query.to_string()),
                    ("artistCount", SEARCH_ARTIST_COUNT.to_string()),
                    ("albumCount", SEARCH_ALBUM_COUNT.to_string()),
                    ("songCount", SEARCH_SONG_COUNT.to_string()),
                ],
            )
            .await?;

        let result = payload.search_result.unwrap_or_default();
        debug!(
            query = %query,
            artists = result.artist.len(),
            albums = result.album.len(),
            songs = result.song.len(),
            "Search complete"
        );

        Ok(SearchResult {
            artists: result.artist,
            albums: result.album,
            songs: result.song,
        })
    }

    /// URL of a cover image, or `None` without a session or cover id.
    pub async fn cover_art_url(&self, cover_art_id: &str, size: u32) -> Option<String> {
        if cover_art_id.is_empty() {
            return None;
        }
        self.build_url(
            "getCoverArt.view",
            &[("id", cover_art_id.to_string()), ("size", size.to_string())],
        )
        .await
        .ok()
        .map(String::from)
    }

    /// Authenticated audio stream URL for a song.
    pub async fn stream_url(&self, song_id: &str) -> Result<String> {
        let url = self
            .build_url("stream.view", &[("id", song_id.to_string())])
            .await?;
        Ok(url.into())
    }
}
