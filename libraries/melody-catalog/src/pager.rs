//! Catalog pager
//!
//! Accumulates the remote song listing page by page. At most one fetch is
//! in flight: a call that finds one running is dropped, not queued.

use melody_core::{CatalogError, CatalogService, Song};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};

/// Configuration for the catalog pager
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagerConfig {
    /// Songs requested per page (default: 10)
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_page_size() -> u32 {
    10
}

impl Default for PagerConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
        }
    }
}

/// What a fetch request ended up doing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// A page was fetched and merged
    Loaded {
        /// Page that was fetched
        page: u32,
        /// Songs in that page
        received: usize,
    },

    /// Dropped: another fetch was in flight, or nothing left to load
    Skipped,

    /// The service failed; pager state is unchanged
    Failed(CatalogError),
}

#[derive(Debug)]
struct PagerState {
    songs: Vec<Song>,
    current_page: u32,
    has_more: bool,
}

/// Page-by-page loader for the full catalog
///
/// State lives behind `&self` so overlapping calls from the same task
/// (e.g. a scroll handler firing twice) hit the in-flight guard rather
/// than the borrow checker.
pub struct CatalogPager<S> {
    service: S,
    page_size: u32,
    is_loading: AtomicBool,
    state: Mutex<PagerState>,
}

/// Holds the in-flight flag; clears it on drop, including when the
/// fetch future is cancelled.
struct LoadingGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> LoadingGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

impl<S: CatalogService> CatalogPager<S> {
    /// Create a pager over `service`
    ///
    /// A zero page size is raised to one.
    pub fn new(service: S, config: PagerConfig) -> Self {
        if config.page_size == 0 {
            warn!("Page size 0 is not allowed, using 1");
        }

        Self {
            service,
            page_size: config.page_size.max(1),
            is_loading: AtomicBool::new(false),
            state: Mutex::new(PagerState {
                songs: Vec::new(),
                current_page: 1,
                has_more: true,
            }),
        }
    }

    /// Fetch `page` (or the current page) and merge it
    ///
    /// Page 1 or `reset` replaces the accumulated songs; any other page is
    /// appended. Dropped if a fetch is already in flight. On failure the
    /// error is logged and nothing changes.
    pub async fn fetch_page(&self, page: Option<u32>, reset: bool) -> FetchOutcome {
        let Some(_loading) = LoadingGuard::acquire(&self.is_loading) else {
            debug!(?page, "Fetch already in flight, dropping request");
            return FetchOutcome::Skipped;
        };

        let target = page
            .filter(|&p| p > 0)
            .unwrap_or_else(|| self.state().current_page);

        debug!(page = target, page_size = self.page_size, reset, "Fetching catalog page");

        match self.service.fetch_songs_page(target, self.page_size).await {
            Ok(result) => {
                let received = result.songs.len();
                let mut state = self.state();

                if reset || target == 1 {
                    state.songs = result.songs;
                } else {
                    state.songs.extend(result.songs);
                }
                state.current_page = target;
                state.has_more = result.has_more;

                debug!(
                    page = target,
                    received,
                    total = state.songs.len(),
                    has_more = state.has_more,
                    "Fetched catalog page"
                );

                FetchOutcome::Loaded {
                    page: target,
                    received,
                }
            }
            Err(e) => {
                warn!(page = target, error = %e, "Failed to fetch catalog page");
                FetchOutcome::Failed(e)
            }
        }
    }

    /// Fetch the page after the current one, if there is one
    pub async fn load_more(&self) -> FetchOutcome {
        let next_page = {
            let state = self.state();
            if !state.has_more || self.is_loading() {
                return FetchOutcome::Skipped;
            }
            state.current_page + 1
        };

        self.fetch_page(Some(next_page), false).await
    }

    /// Start over from page 1, replacing the accumulated songs
    ///
    /// The page counter and `has_more` are reset before the fetch is
    /// attempted, so they change even if an in-flight fetch causes this
    /// one to be dropped.
    pub async fn refresh(&self) -> FetchOutcome {
        {
            let mut state = self.state();
            state.current_page = 1;
            state.has_more = true;
        }

        info!("Refreshing catalog");
        self.fetch_page(Some(1), true).await
    }

    /// Snapshot of the accumulated songs, in page order
    pub fn songs(&self) -> Vec<Song> {
        self.state().songs.clone()
    }

    /// Run `f` over the accumulated songs without cloning them
    pub fn with_songs<R>(&self, f: impl FnOnce(&[Song]) -> R) -> R {
        f(&self.state().songs)
    }

    /// Number of songs loaded so far
    pub fn len(&self) -> usize {
        self.state().songs.len()
    }

    /// Whether nothing has been loaded
    pub fn is_empty(&self) -> bool {
        self.state().songs.is_empty()
    }

    /// Last page merged (1-based)
    pub fn current_page(&self) -> u32 {
        self.state().current_page
    }

    /// Songs requested per page
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Whether the server reported more pages
    pub fn has_more(&self) -> bool {
        self.state().has_more
    }

    /// Whether a fetch is in flight
    pub fn is_loading(&self) -> bool {
        self.is_loading.load(Ordering::Acquire)
    }

    /// The underlying catalog service
    pub fn service(&self) -> &S {
        &self.service
    }

    fn state(&self) -> MutexGuard<'_, PagerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<S> std::fmt::Debug for CatalogPager<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogPager")
            .field("page_size", &self.page_size)
            .field("is_loading", &self.is_loading)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
