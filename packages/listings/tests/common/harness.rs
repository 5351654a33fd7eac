//! Test harness wiring a `ListingFeed` to an in-memory store.

use std::sync::Arc;

use listings_core::testing::SpyNotifier;
use listings_core::{FeedSettings, InMemoryStore, ListingFeed};
use test_context::AsyncTestContext;

use super::fixtures::seed_listings;

/// Listings seeded per category: enough for one full page plus a short
/// second page of rent, one extra sale listing, and an exact single page
/// of "land".
pub const RENT_COUNT: usize = 8;
pub const SALE_COUNT: usize = 7;
pub const LAND_COUNT: usize = 6;

/// Each test gets its own store, notifier and feed.
///
/// # Example using test-context
///
/// ```ignore
/// #[test_context(FeedHarness)]
/// #[tokio::test]
/// async fn my_test(ctx: &FeedHarness) {
///     ctx.feed.show_category("rent").await;
/// }
/// ```
pub struct FeedHarness {
    pub store: Arc<InMemoryStore>,
    pub notifier: Arc<SpyNotifier>,
    pub feed: ListingFeed,
}

impl AsyncTestContext for FeedHarness {
    async fn setup() -> Self {
        // Run tests with: RUST_LOG=debug cargo test -- --nocapture
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        let store = Arc::new(InMemoryStore::new());
        seed_listings(&store, "rent", RENT_COUNT);
        seed_listings(&store, "sale", SALE_COUNT);
        seed_listings(&store, "land", LAND_COUNT);

        let notifier = Arc::new(SpyNotifier::new());
        let feed = ListingFeed::new(store.clone(), notifier.clone(), FeedSettings::default());

        Self { store, notifier, feed }
    }
}

impl FeedHarness {
    /// Ids currently in the feed, in display order.
    pub fn ids(&self) -> Vec<String> {
        self.feed
            .snapshot()
            .listings()
            .iter()
            .map(|listing| listing.id.clone())
            .collect()
    }
}
