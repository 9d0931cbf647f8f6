//! MelodyFlow Catalog
//!
//! Incremental loading of a large remote song catalog.
//!
//! # Features
//!
//! - **Pagination**: fixed-size pages accumulated in catalog order
//! - **Refresh**: start over from page 1
//! - **In-flight suppression**: overlapping fetches are dropped, never queued
//! - **Failure isolation**: a failed fetch is logged and changes nothing
//!
//! # Example
//!
//! ```ignore
//! use melody_catalog::{CatalogPager, PagerConfig};
//!
//! let pager = CatalogPager::new(client, PagerConfig::default());
//! pager.refresh().await;
//!
//! while pager.has_more() {
//!     pager.load_more().await;
//! }
//! println!("Loaded {} songs", pager.len());
//! ```

mod pager;

pub use pager::{CatalogPager, FetchOutcome, PagerConfig};
