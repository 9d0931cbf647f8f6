//! MelodyFlow Core
//!
//! Platform-agnostic core types, the catalog service seam, and error
//! handling shared by every MelodyFlow crate.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Song`, `SongId`, `CatalogPage`, `StreamReference`
//! - **Core Traits**: `CatalogService`, the only way the engine reaches a
//!   remote music server
//! - **Error Handling**: `CatalogError` and `Result`
//!
//! # Example
//!
//! ```rust
//! use melody_core::{Song, SongId};
//!
//! let song = Song::new("tr-1", "Blue in Green")
//!     .with_artist("Miles Davis")
//!     .with_album("Kind of Blue")
//!     .with_duration_secs(337);
//!
//! assert_eq!(song.id, SongId::new("tr-1"));
//! assert_eq!(song.duration().as_secs(), 337);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod catalog;
pub mod error;
pub mod types;

pub use catalog::CatalogService;
pub use error::{CatalogError, Result};
pub use types::{CatalogPage, Song, SongId, StreamReference};
