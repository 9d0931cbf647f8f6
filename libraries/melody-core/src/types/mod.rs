//! Domain types shared across MelodyFlow crates

mod catalog;
mod ids;
mod song;

pub use catalog::{CatalogPage, StreamReference};
pub use ids::SongId;
pub use song::Song;
