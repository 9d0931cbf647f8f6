//! Catalog pager tests against mocked catalog services.
//!
//! These tests drive the pager through a mock `CatalogService` to verify
//! request parameters, accumulation, and in-flight suppression without a
//! real server.

use async_trait::async_trait;
use melody_catalog::{CatalogPager, FetchOutcome, PagerConfig};
use melody_core::{CatalogError, CatalogPage, CatalogService, Song, SongId, StreamReference};
use mockall::mock;
use mockall::predicate::eq;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Once;
use tokio::sync::Notify;

static INIT: Once = Once::new();

fn init_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing::Level::DEBUG)
            .try_init();
    });
}

mock! {
    pub Catalog {}

    #[async_trait]
    impl CatalogService for Catalog {
        async fn fetch_songs_page(&self, page: u32, page_size: u32) -> melody_core::Result<CatalogPage>;
        async fn resolve_stream_reference(&self, song_id: &SongId) -> melody_core::Result<StreamReference>;
    }
}

fn songs(prefix: &str, count: usize) -> Vec<Song> {
    (0..count)
        .map(|n| Song::new(format!("{prefix}-{n}"), format!("{prefix} song {n}")))
        .collect()
}

// =============================================================================
// Accumulation Tests
// =============================================================================

mod accumulation {
    use super::*;

    #[tokio::test]
    async fn test_two_pages_accumulate_in_page_order() {
        init_tracing();

        let mut catalog = MockCatalog::new();
        catalog
            .expect_fetch_songs_page()
            .with(eq(1), eq(10))
            .times(1)
            .returning(|_, _| Ok(CatalogPage::new(songs("p1", 10), true)));
        catalog
            .expect_fetch_songs_page()
            .with(eq(2), eq(10))
            .times(1)
            .returning(|_, _| Ok(CatalogPage::new(songs("p2", 5), false)));

        let pager = CatalogPager::new(catalog, PagerConfig::default());

        pager.fetch_page(Some(1), false).await;
        pager.fetch_page(Some(2), false).await;

        let loaded = pager.songs();
        assert_eq!(loaded.len(), 15);
        assert_eq!(loaded[0].id.as_str(), "p1-0");
        assert_eq!(loaded[9].id.as_str(), "p1-9");
        assert_eq!(loaded[10].id.as_str(), "p2-0");
        assert_eq!(loaded[14].id.as_str(), "p2-4");
        assert!(!pager.has_more());
        assert_eq!(pager.current_page(), 2);
    }

    #[tokio::test]
    async fn test_page_one_replaces_even_without_reset() {
        init_tracing();

        let mut catalog = MockCatalog::new();
        catalog
            .expect_fetch_songs_page()
            .with(eq(1), eq(4))
            .times(2)
            .returning(|_, _| Ok(CatalogPage::new(songs("p1", 4), true)));
        catalog
            .expect_fetch_songs_page()
            .with(eq(2), eq(4))
            .times(1)
            .returning(|_, _| Ok(CatalogPage::new(songs("p2", 4), true)));

        let pager = CatalogPager::new(catalog, PagerConfig { page_size: 4 });
        pager.fetch_page(Some(1), false).await;
        pager.load_more().await;
        assert_eq!(pager.len(), 8);

        pager.fetch_page(Some(1), false).await;
        assert_eq!(pager.len(), 4);
        assert_eq!(pager.current_page(), 1);
    }

    #[tokio::test]
    async fn test_reset_replaces_any_page() {
        init_tracing();

        let mut catalog = MockCatalog::new();
        catalog
            .expect_fetch_songs_page()
            .with(eq(1), eq(10))
            .returning(|_, _| Ok(CatalogPage::new(songs("p1", 10), true)));
        catalog
            .expect_fetch_songs_page()
            .with(eq(3), eq(10))
            .returning(|_, _| Ok(CatalogPage::new(songs("p3", 10), true)));

        let pager = CatalogPager::new(catalog, PagerConfig::default());
        pager.fetch_page(Some(1), false).await;
        pager.fetch_page(Some(3), true).await;

        assert_eq!(pager.len(), 10);
        assert_eq!(pager.songs()[0].id.as_str(), "p3-0");
        assert_eq!(pager.current_page(), 3);
    }

    #[tokio::test]
    async fn test_refresh_requests_first_page() {
        init_tracing();

        let mut catalog = MockCatalog::new();
        catalog
            .expect_fetch_songs_page()
            .with(eq(1), eq(25))
            .times(1)
            .returning(|_, _| Ok(CatalogPage::new(songs("fresh", 25), true)));

        let pager = CatalogPager::new(catalog, PagerConfig { page_size: 25 });
        let outcome = pager.refresh().await;

        assert_eq!(
            outcome,
            FetchOutcome::Loaded {
                page: 1,
                received: 25
            }
        );
        assert!(pager.has_more());
    }
}

// =============================================================================
// Failure Tests
// =============================================================================

mod failures {
    use super::*;

    #[tokio::test]
    async fn test_failed_fetch_changes_nothing() {
        init_tracing();

        let mut catalog = MockCatalog::new();
        catalog
            .expect_fetch_songs_page()
            .with(eq(1), eq(10))
            .times(1)
            .returning(|_, _| Ok(CatalogPage::new(songs("p1", 10), true)));
        catalog
            .expect_fetch_songs_page()
            .with(eq(2), eq(10))
            .times(1)
            .returning(|_, _| Err(CatalogError::unavailable("connection reset")));

        let pager = CatalogPager::new(catalog, PagerConfig::default());
        pager.refresh().await;

        let outcome = pager.load_more().await;
        assert!(matches!(
            outcome,
            FetchOutcome::Failed(CatalogError::CatalogUnavailable(_))
        ));
        assert_eq!(pager.len(), 10);
        assert_eq!(pager.current_page(), 1);
        assert!(pager.has_more());
        assert!(!pager.is_loading());
    }

    #[tokio::test]
    async fn test_retry_after_failure_succeeds() {
        init_tracing();

        let attempts = AtomicUsize::new(0);
        let mut catalog = MockCatalog::new();
        catalog
            .expect_fetch_songs_page()
            .with(eq(1), eq(10))
            .times(2)
            .returning(move |_, _| {
                if attempts.fetch_add(1, Ordering::SeqCst) == 0 {
                    Err(CatalogError::NotAuthenticated)
                } else {
                    Ok(CatalogPage::new(songs("p1", 3), false))
                }
            });

        let pager = CatalogPager::new(catalog, PagerConfig::default());
        assert!(matches!(pager.refresh().await, FetchOutcome::Failed(_)));
        assert!(pager.is_empty());

        assert!(matches!(
            pager.refresh().await,
            FetchOutcome::Loaded { received: 3, .. }
        ));
        assert_eq!(pager.len(), 3);
    }

    #[tokio::test]
    async fn test_load_more_skips_when_exhausted() {
        init_tracing();

        let mut catalog = MockCatalog::new();
        catalog
            .expect_fetch_songs_page()
            .times(1)
            .returning(|_, _| Ok(CatalogPage::new(songs("only", 2), false)));

        let pager = CatalogPager::new(catalog, PagerConfig::default());
        pager.refresh().await;

        assert_eq!(pager.load_more().await, FetchOutcome::Skipped);
    }
}

// =============================================================================
// In-flight Suppression Tests
// =============================================================================

mod in_flight {
    use super::*;

    /// Catalog whose responses wait until the test opens the gate
    struct GatedCatalog {
        gate: Notify,
        calls: AtomicUsize,
    }

    impl GatedCatalog {
        fn new() -> Self {
            Self {
                gate: Notify::new(),
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl CatalogService for GatedCatalog {
        async fn fetch_songs_page(
            &self,
            page: u32,
            page_size: u32,
        ) -> melody_core::Result<CatalogPage> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.gate.notified().await;
            Ok(CatalogPage::new(
                songs(&format!("p{page}"), page_size as usize),
                true,
            ))
        }

        async fn resolve_stream_reference(
            &self,
            song_id: &SongId,
        ) -> melody_core::Result<StreamReference> {
            Err(CatalogError::invalid_reference(song_id.as_str()))
        }
    }

    #[tokio::test]
    async fn test_overlapping_fetch_is_dropped() {
        init_tracing();

        let pager = CatalogPager::new(GatedCatalog::new(), PagerConfig { page_size: 3 });

        let first = pager.fetch_page(Some(1), false);
        let second = async {
            // Let the first fetch reach the service
            tokio::task::yield_now().await;

            assert!(pager.is_loading());
            let before = (pager.len(), pager.current_page(), pager.has_more());

            let outcome = pager.fetch_page(Some(2), false).await;

            assert_eq!(before, (pager.len(), pager.current_page(), pager.has_more()));
            pager.service().gate.notify_one();
            outcome
        };

        let (first, second) = tokio::join!(first, second);

        assert_eq!(
            first,
            FetchOutcome::Loaded {
                page: 1,
                received: 3
            }
        );
        assert_eq!(second, FetchOutcome::Skipped);
        assert_eq!(pager.service().calls.load(Ordering::SeqCst), 1);
        assert_eq!(pager.len(), 3);
        assert!(!pager.is_loading());
    }

    #[tokio::test]
    async fn test_load_more_while_loading_is_dropped() {
        init_tracing();

        let pager = CatalogPager::new(GatedCatalog::new(), PagerConfig { page_size: 2 });

        let first = pager.refresh();
        let second = async {
            tokio::task::yield_now().await;
            let outcome = pager.load_more().await;
            pager.service().gate.notify_one();
            outcome
        };

        let (_, second) = tokio::join!(first, second);
        assert_eq!(second, FetchOutcome::Skipped);
        assert_eq!(pager.service().calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_refresh_while_loading_resets_counters_but_is_dropped() {
        init_tracing();

        let pager = CatalogPager::new(GatedCatalog::new(), PagerConfig { page_size: 2 });

        let first = pager.fetch_page(Some(4), false);
        let second = async {
            tokio::task::yield_now().await;
            let outcome = pager.refresh().await;
            assert_eq!(pager.current_page(), 1);
            pager.service().gate.notify_one();
            outcome
        };

        let (first, second) = tokio::join!(first, second);
        assert_eq!(second, FetchOutcome::Skipped);
        assert!(matches!(first, FetchOutcome::Loaded { page: 4, .. }));

        // The in-flight fetch lands after the reset and wins
        assert_eq!(pager.current_page(), 4);
        assert_eq!(pager.service().calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_cancelled_fetch_releases_flag() {
        init_tracing();

        let pager = CatalogPager::new(GatedCatalog::new(), PagerConfig { page_size: 2 });

        // Poll the fetch once so it claims the flag, then drop it
        let timed_out = tokio::time::timeout(
            std::time::Duration::from_millis(10),
            pager.fetch_page(Some(1), false),
        )
        .await;
        assert!(timed_out.is_err());
        assert!(!pager.is_loading());

        pager.service().gate.notify_one();
        assert!(matches!(
            pager.fetch_page(Some(1), false).await,
            FetchOutcome::Loaded { page: 1, .. }
        ));
    }
}
