//! Behaviour of a category page driven through `ListingFeed`.

mod common;

use std::sync::Arc;

use common::*;
use listings_core::testing::{listing_document, MockDocumentStore, SpyNotifier};
use listings_core::{
    ApplyOutcome, FeedSettings, ListingFeed, LoadMore, LoadStatus, StoreDocument, ViewBody,
    FETCH_FAILED_MESSAGE,
};
use test_context::test_context;

fn mock_docs(category: &str, count: usize) -> Vec<StoreDocument> {
    (0..count)
        .map(|i| {
            listing_document(
                COLLECTION,
                &format!("{category}-{i}"),
                category,
                &format!("2024-06-{:02}T12:00:00Z", 30 - i),
            )
        })
        .collect()
}

fn mock_feed(store: &Arc<MockDocumentStore>, notifier: &Arc<SpyNotifier>) -> ListingFeed {
    ListingFeed::new(store.clone(), notifier.clone(), FeedSettings::default())
}

/// Yield until the store has seen `n` queries.
async fn wait_for_calls(store: &MockDocumentStore, n: usize) {
    while store.call_count() < n {
        tokio::task::yield_now().await;
    }
}

// ============================================================================
// Headings
// ============================================================================

#[test_context(FeedHarness)]
#[tokio::test]
async fn heading_is_rent_only_for_exact_rent(ctx: &FeedHarness) {
    for (category, expected) in [
        ("rent", "Places for rent"),
        ("sale", "Places for sale"),
        ("", "Places for sale"),
        ("Rent", "Places for sale"),
    ] {
        ctx.feed.show_category(category).await;
        assert_eq!(ctx.feed.view().heading, expected, "category {category:?}");
    }
}

// ============================================================================
// Initial fetch
// ============================================================================

#[test_context(FeedHarness)]
#[tokio::test]
async fn initial_fetch_loads_first_six_newest_first(ctx: &FeedHarness) {
    let outcome = ctx.feed.show_category("rent").await;

    assert_eq!(outcome, ApplyOutcome::Applied { added: 6 });
    assert_eq!(ctx.ids(), expected_ids("rent", 0..6));
    assert_eq!(ctx.feed.snapshot().status(), LoadStatus::Loaded);
    assert_eq!(ctx.notifier.count(), 0);
}

#[test_context(FeedHarness)]
#[tokio::test]
async fn initial_fetch_with_fewer_than_six(ctx: &FeedHarness) {
    seed_listings(&ctx.store, "lease", 2);

    ctx.feed.show_category("lease").await;

    let state = ctx.feed.snapshot();
    assert_eq!(ctx.ids(), expected_ids("lease", 0..2));
    assert_eq!(state.status(), LoadStatus::Loaded);
    assert!(!state.has_more());
}

#[test_context(FeedHarness)]
#[tokio::test]
async fn empty_category_never_offers_load_more(ctx: &FeedHarness) {
    ctx.feed.show_category("castles").await;

    assert!(!ctx.feed.snapshot().has_more());
    assert_eq!(
        ctx.feed.view().body,
        ViewBody::Empty {
            message: "No Available Listings for castles".to_string()
        }
    );
    assert_eq!(ctx.feed.load_more().await, ApplyOutcome::Skipped);
}

// ============================================================================
// Load more
// ============================================================================

#[test_context(FeedHarness)]
#[tokio::test]
async fn load_more_appends_after_first_page(ctx: &FeedHarness) {
    ctx.feed.show_category("rent").await;
    let outcome = ctx.feed.load_more().await;

    // 8 rent listings: 6 on the first page, a short page of 2 after it
    assert_eq!(outcome, ApplyOutcome::Applied { added: 2 });
    assert_eq!(ctx.ids(), expected_ids("rent", 0..RENT_COUNT));

    assert!(!ctx.feed.snapshot().has_more(), "short page ends pagination");
    assert_eq!(ctx.feed.load_more().await, ApplyOutcome::Skipped);
}

#[test_context(FeedHarness)]
#[tokio::test]
async fn load_more_view_follows_cursor(ctx: &FeedHarness) {
    ctx.feed.show_category("sale").await;
    let ViewBody::Populated { entries, load_more } = ctx.feed.view().body else {
        panic!("expected populated view");
    };
    assert_eq!(entries.len(), 6);
    assert_eq!(load_more, LoadMore::Ready);

    ctx.feed.load_more().await;
    let ViewBody::Populated { entries, load_more } = ctx.feed.view().body else {
        panic!("expected populated view");
    };
    assert_eq!(entries.len(), SALE_COUNT);
    assert_eq!(entries.last().map(|e| e.key.as_str()), Some("sale-6"));
    assert_eq!(load_more, LoadMore::Hidden);
}

#[test_context(FeedHarness)]
#[tokio::test]
async fn exact_page_offers_one_empty_load_more(ctx: &FeedHarness) {
    ctx.feed.show_category("land").await;
    assert!(ctx.feed.snapshot().has_more());

    let outcome = ctx.feed.load_more().await;

    assert_eq!(outcome, ApplyOutcome::Applied { added: 0 });
    assert_eq!(ctx.ids().len(), LAND_COUNT);
    assert!(!ctx.feed.snapshot().has_more());
}

#[tokio::test]
async fn six_then_three_preserves_both_orders() {
    let store = Arc::new(
        MockDocumentStore::new()
            .with_documents(mock_docs("sale", 6))
            .with_documents(
                (6..9)
                    .map(|i| {
                        listing_document(
                            COLLECTION,
                            &format!("sale-{i}"),
                            "sale",
                            &format!("2024-05-{:02}T12:00:00Z", 30 - i),
                        )
                    })
                    .collect(),
            ),
    );
    let notifier = Arc::new(SpyNotifier::new());
    let feed = mock_feed(&store, &notifier);

    feed.show_category("sale").await;
    assert_eq!(feed.load_more().await, ApplyOutcome::Applied { added: 3 });

    let ids: Vec<String> = feed
        .snapshot()
        .listings()
        .iter()
        .map(|l| l.id.clone())
        .collect();
    assert_eq!(ids, expected_ids("sale", 0..9));

    let calls = store.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].limit, 6);
    assert!(calls[0].start_after.is_none());
    assert_eq!(calls[1].limit, 3);
    assert_eq!(
        calls[1].start_after.as_ref().map(|c| c.document_name.as_str()),
        Some("listings/sale-5")
    );
}

// ============================================================================
// Failures
// ============================================================================

#[tokio::test]
async fn failed_initial_fetch_notifies_once_and_fails() {
    let store = Arc::new(MockDocumentStore::new().with_failure("permission denied"));
    let notifier = Arc::new(SpyNotifier::new());
    let feed = mock_feed(&store, &notifier);

    let outcome = feed.show_category("rent").await;

    assert_eq!(outcome, ApplyOutcome::Failed);
    assert_eq!(notifier.messages(), vec![FETCH_FAILED_MESSAGE.to_string()]);
    assert_eq!(feed.snapshot().status(), LoadStatus::Failed);
    assert_eq!(
        feed.view().body,
        ViewBody::Failed {
            message: "Could not fetch listings"
        }
    );
    // never reaches Loaded on its own, and load more stays unavailable
    assert_eq!(feed.load_more().await, ApplyOutcome::Skipped);
    assert_eq!(feed.snapshot().status(), LoadStatus::Failed);
    assert_eq!(notifier.count(), 1);
}

#[tokio::test]
async fn retry_recovers_from_failed_initial_fetch() {
    let store = Arc::new(
        MockDocumentStore::new()
            .with_failure("timeout")
            .with_documents(mock_docs("rent", 6)),
    );
    let notifier = Arc::new(SpyNotifier::new());
    let feed = mock_feed(&store, &notifier);

    feed.show_category("rent").await;
    assert_eq!(feed.retry().await, ApplyOutcome::Applied { added: 6 });
    assert_eq!(feed.snapshot().status(), LoadStatus::Loaded);
    assert_eq!(notifier.count(), 1);
}

#[tokio::test]
async fn failed_load_more_keeps_collection() {
    let store = Arc::new(
        MockDocumentStore::new()
            .with_documents(mock_docs("rent", 6))
            .with_failure("network"),
    );
    let notifier = Arc::new(SpyNotifier::new());
    let feed = mock_feed(&store, &notifier);

    feed.show_category("rent").await;
    let cursor = feed.snapshot().cursor().cloned();

    assert_eq!(feed.load_more().await, ApplyOutcome::Failed);

    let state = feed.snapshot();
    assert_eq!(state.listings().len(), 6);
    assert_eq!(state.cursor().cloned(), cursor);
    assert_eq!(state.status(), LoadStatus::Loaded);
    assert_eq!(notifier.count(), 1);
}

// ============================================================================
// Overlapping fetches
// ============================================================================

#[tokio::test]
async fn category_change_discards_in_flight_response() {
    let store = Arc::new(MockDocumentStore::new());
    let rent_gate = store.push_gate();
    store.push_documents(mock_docs("sale", 4));

    let notifier = Arc::new(SpyNotifier::new());
    let feed = mock_feed(&store, &notifier);

    let stale = tokio::spawn({
        let feed = feed.clone();
        async move { feed.show_category("rent").await }
    });
    wait_for_calls(&store, 1).await;

    // category changes while the rent page is still in flight
    assert_eq!(feed.show_category("sale").await, ApplyOutcome::Applied { added: 4 });

    rent_gate.send(Ok(mock_docs("rent", 6))).unwrap();
    assert_eq!(stale.await.unwrap(), ApplyOutcome::Discarded);

    let state = feed.snapshot();
    assert_eq!(state.category(), "sale");
    assert_eq!(
        state.listings().iter().map(|l| l.id.clone()).collect::<Vec<_>>(),
        expected_ids("sale", 0..4)
    );
    assert_eq!(feed.view().heading, "Places for sale");
    assert_eq!(notifier.count(), 0);
}

#[tokio::test]
async fn category_change_resets_collection_and_cursor() {
    let store = Arc::new(MockDocumentStore::new().with_documents(mock_docs("rent", 6)));
    let gate = store.push_gate();
    let notifier = Arc::new(SpyNotifier::new());
    let feed = mock_feed(&store, &notifier);

    feed.show_category("rent").await;
    assert!(feed.snapshot().has_more());

    let pending = tokio::spawn({
        let feed = feed.clone();
        async move { feed.show_category("sale").await }
    });
    wait_for_calls(&store, 2).await;

    let state = feed.snapshot();
    assert!(state.listings().is_empty());
    assert!(state.cursor().is_none());
    assert_eq!(state.status(), LoadStatus::Loading);
    assert_eq!(feed.view().body, ViewBody::Loading);

    gate.send(Ok(mock_docs("sale", 1))).unwrap();
    assert_eq!(pending.await.unwrap(), ApplyOutcome::Applied { added: 1 });
}

#[tokio::test]
async fn second_load_more_is_refused_while_first_is_in_flight() {
    let store = Arc::new(MockDocumentStore::new().with_documents(mock_docs("rent", 6)));
    let gate = store.push_gate();
    let notifier = Arc::new(SpyNotifier::new());
    let feed = mock_feed(&store, &notifier);

    feed.show_category("rent").await;

    let first = tokio::spawn({
        let feed = feed.clone();
        async move { feed.load_more().await }
    });
    wait_for_calls(&store, 2).await;

    assert_eq!(feed.load_more().await, ApplyOutcome::Skipped);
    assert_eq!(store.call_count(), 2);

    let ViewBody::Populated { load_more, .. } = feed.view().body else {
        panic!("expected populated view");
    };
    assert_eq!(load_more, LoadMore::Busy);

    let more: Vec<StoreDocument> = (6..9)
        .map(|i| {
            listing_document(
                COLLECTION,
                &format!("rent-{i}"),
                "rent",
                &format!("2024-05-{:02}T12:00:00Z", 30 - i),
            )
        })
        .collect();
    gate.send(Ok(more)).unwrap();

    assert_eq!(first.await.unwrap(), ApplyOutcome::Applied { added: 3 });
    let ids: Vec<String> = feed.snapshot().listings().iter().map(|l| l.id.clone()).collect();
    assert_eq!(ids, expected_ids("rent", 0..9));
}

#[tokio::test]
async fn category_change_discards_in_flight_load_more() {
    let store = Arc::new(MockDocumentStore::new().with_documents(mock_docs("rent", 6)));
    let more_gate = store.push_gate();
    store.push_documents(mock_docs("sale", 2));
    let notifier = Arc::new(SpyNotifier::new());
    let feed = mock_feed(&store, &notifier);

    feed.show_category("rent").await;
    let stale = tokio::spawn({
        let feed = feed.clone();
        async move { feed.load_more().await }
    });
    wait_for_calls(&store, 2).await;

    feed.show_category("sale").await;
    more_gate.send(Err("late failure".to_string())).unwrap();

    assert_eq!(stale.await.unwrap(), ApplyOutcome::Discarded);
    assert_eq!(feed.snapshot().listings().len(), 2);
    assert_eq!(notifier.count(), 0, "stale failures do not notify");
}
