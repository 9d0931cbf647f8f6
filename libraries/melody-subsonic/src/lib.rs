//! MelodyFlow Subsonic Client
//!
//! HTTP client for Subsonic-compatible servers (Navidrome, Airsonic,
//! Gonic, ...), and the `CatalogService` the engine pages through.
//!
//! # Features
//!
//! - **Authentication**: salted token login, session restore, logout
//! - **Catalog**: paged song listing, album lists, album details, search
//! - **Media**: stream and cover art URLs
//!
//! # Example
//!
//! ```ignore
//! use melody_subsonic::{SubsonicClient, SubsonicConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = SubsonicClient::new(SubsonicConfig::new("https://music.example.com"))?;
//!     client.login("alice", "sesame").await?;
//!
//!     let result = client.search("blue").await?;
//!     println!("Found {} songs", result.songs.len());
//!
//!     Ok(())
//! }
//! ```

mod auth;
mod catalog;
mod client;
mod error;
mod library;
mod types;

// Re-export main types
pub use auth::token_for;
pub use client::SubsonicClient;
pub use error::{Result, SubsonicError};
pub use types::{Album, AlbumListType, Artist, Credentials, SearchResult, SubsonicConfig};
