//! Page fetching and the view state it feeds.
//!
//! [`FeedState`] is a plain state machine: `begin_*` hands out a
//! [`PageRequest`], the caller runs it with [`fetch_page`] (no lock held),
//! and `apply` folds the response back in. Every request carries the
//! generation it was issued under; a category change bumps the generation,
//! so responses that arrive late for an old category are dropped.
//!
//! [`ListingFeed`] wires the state machine to an injected store and notifier
//! for callers that just want `show_category` / `load_more`.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};

use crate::category::CategoryPolicy;
use crate::listing::Listing;
use crate::notify::{BaseNotifier, FETCH_FAILED_MESSAGE};
use crate::query::{Cursor, ListingQuery};
use crate::store::{BaseDocumentStore, StoreDocument, StoreError};
use crate::view::{render, CategoryView};

pub const DEFAULT_COLLECTION: &str = "listings";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSizes {
    /// Limit for the first page of a category.
    pub initial: usize,
    /// Limit for each "load more" page.
    pub more: usize,
}

impl Default for PageSizes {
    fn default() -> Self {
        Self { initial: 6, more: 3 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedSettings {
    pub collection: String,
    pub sizes: PageSizes,
    pub policy: CategoryPolicy,
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self {
            collection: DEFAULT_COLLECTION.to_string(),
            sizes: PageSizes::default(),
            policy: CategoryPolicy::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoadStatus {
    Loading,
    Loaded,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FetchKind {
    /// First page of a category; replaces the collection.
    Initial,
    /// Next page after the cursor; appends to the collection.
    More,
}

/// A query issued by [`FeedState`], tagged so its response can be matched
/// back to the state it was issued for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageRequest {
    pub generation: u64,
    pub kind: FetchKind,
    pub query: ListingQuery,
}

/// One page of results plus the cursor for the next one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub listings: Vec<Listing>,
    /// `None` once a page comes back shorter than requested.
    pub next_cursor: Option<Cursor>,
}

impl Page {
    pub fn from_documents(documents: Vec<StoreDocument>, requested: usize) -> Self {
        let next_cursor = if documents.len() < requested {
            None
        } else {
            documents.last().map(Cursor::after)
        };

        Page {
            listings: documents.iter().map(Listing::from_document).collect(),
            next_cursor,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// Response merged into the state.
    Applied { added: usize },
    /// Fetch failed; the user was notified.
    Failed,
    /// Response belonged to an older generation and was dropped.
    Discarded,
    /// Nothing was fetched (no cursor, fetch in flight, or category refused).
    Skipped,
}

/// View state of one category page.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedState {
    settings: FeedSettings,
    category: String,
    listings: Vec<Listing>,
    cursor: Option<Cursor>,
    status: LoadStatus,
    generation: u64,
    in_flight: Option<FetchKind>,
}

impl FeedState {
    pub fn new(settings: FeedSettings) -> Self {
        Self {
            settings,
            category: String::new(),
            listings: Vec::new(),
            cursor: None,
            status: LoadStatus::Loading,
            generation: 0,
            in_flight: None,
        }
    }

    pub fn settings(&self) -> &FeedSettings {
        &self.settings
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn listings(&self) -> &[Listing] {
        &self.listings
    }

    pub fn cursor(&self) -> Option<&Cursor> {
        self.cursor.as_ref()
    }

    pub fn status(&self) -> LoadStatus {
        self.status
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn in_flight(&self) -> Option<FetchKind> {
        self.in_flight
    }

    /// Whether "load more" can be offered.
    pub fn has_more(&self) -> bool {
        self.cursor.is_some()
    }

    pub fn is_loading_more(&self) -> bool {
        self.in_flight == Some(FetchKind::More)
    }

    /// Switch to `category` and start over.
    ///
    /// Clears the collection and cursor and invalidates every request issued
    /// before this call. Returns `None` when the category policy refuses the
    /// name; the page then shows as empty without touching the store.
    pub fn begin_initial(&mut self, category: &str) -> Option<PageRequest> {
        self.generation += 1;
        self.category = category.to_string();
        self.listings.clear();
        self.cursor = None;

        if !self.settings.policy.admits(category) {
            tracing::warn!(category, policy = %self.settings.policy, "Category refused by policy");
            self.status = LoadStatus::Loaded;
            self.in_flight = None;
            return None;
        }

        self.status = LoadStatus::Loading;
        self.in_flight = Some(FetchKind::Initial);

        Some(PageRequest {
            generation: self.generation,
            kind: FetchKind::Initial,
            query: ListingQuery::for_category(
                self.settings.collection.clone(),
                category,
                self.settings.sizes.initial,
            ),
        })
    }

    /// Re-run the initial fetch after a failure.
    pub fn retry(&mut self) -> Option<PageRequest> {
        if self.status != LoadStatus::Failed {
            return None;
        }
        let category = self.category.clone();
        self.begin_initial(&category)
    }

    /// Request the page after the cursor.
    ///
    /// Refused while anything is in flight, before the first page has loaded,
    /// and once the cursor is gone.
    pub fn begin_more(&mut self) -> Option<PageRequest> {
        if self.status != LoadStatus::Loaded || self.in_flight.is_some() {
            return None;
        }
        let cursor = self.cursor.clone()?;

        self.in_flight = Some(FetchKind::More);

        Some(PageRequest {
            generation: self.generation,
            kind: FetchKind::More,
            query: ListingQuery::for_category(
                self.settings.collection.clone(),
                &self.category,
                self.settings.sizes.more,
            )
            .start_after(Some(cursor)),
        })
    }

    /// Fold a response into the state.
    ///
    /// The collection and cursor change together or not at all. Failures
    /// notify exactly once; stale responses neither change state nor notify.
    pub fn apply(
        &mut self,
        request: &PageRequest,
        result: Result<Page, StoreError>,
        notifier: &dyn BaseNotifier,
    ) -> ApplyOutcome {
        if request.generation != self.generation {
            tracing::debug!(
                stale = request.generation,
                current = self.generation,
                category = %self.category,
                "Discarding stale listings response"
            );
            return ApplyOutcome::Discarded;
        }

        self.in_flight = None;

        match result {
            Ok(page) => {
                let added = page.listings.len();
                match request.kind {
                    FetchKind::Initial => self.listings = page.listings,
                    FetchKind::More => self.listings.extend(page.listings),
                }
                self.cursor = page.next_cursor;
                self.status = LoadStatus::Loaded;

                tracing::info!(
                    category = %self.category,
                    kind = ?request.kind,
                    added,
                    total = self.listings.len(),
                    has_more = self.cursor.is_some(),
                    "Listings page applied"
                );
                ApplyOutcome::Applied { added }
            }
            Err(e) => {
                tracing::warn!(
                    category = %self.category,
                    kind = ?request.kind,
                    error = %e,
                    "Failed to fetch listings"
                );
                notifier.error(FETCH_FAILED_MESSAGE);
                if request.kind == FetchKind::Initial {
                    self.status = LoadStatus::Failed;
                }
                ApplyOutcome::Failed
            }
        }
    }
}

/// Run a request against the store and cut the result into a [`Page`].
pub async fn fetch_page(
    store: &dyn BaseDocumentStore,
    request: &PageRequest,
) -> Result<Page, StoreError> {
    tracing::debug!(
        collection = %request.query.collection,
        category = ?request.query.category(),
        limit = request.query.limit,
        after = ?request.query.start_after.as_ref().map(|c| &c.document_name),
        "Fetching listings page"
    );

    let documents = store.run_query(&request.query).await?;
    Ok(Page::from_documents(documents, request.query.limit))
}

/// A category page driven against an injected store and notifier.
///
/// Cheap to clone; clones share the same state.
#[derive(Clone)]
pub struct ListingFeed {
    store: Arc<dyn BaseDocumentStore>,
    notifier: Arc<dyn BaseNotifier + Send + Sync>,
    state: Arc<Mutex<FeedState>>,
}

impl ListingFeed {
    pub fn new(
        store: Arc<dyn BaseDocumentStore>,
        notifier: Arc<dyn BaseNotifier + Send + Sync>,
        settings: FeedSettings,
    ) -> Self {
        Self {
            store,
            notifier,
            state: Arc::new(Mutex::new(FeedState::new(settings))),
        }
    }

    fn lock(&self) -> MutexGuard<'_, FeedState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Show `category` from its first page.
    pub async fn show_category(&self, category: &str) -> ApplyOutcome {
        let request = self.lock().begin_initial(category);
        self.run(request).await
    }

    /// Append the next page, if one is on offer and nothing is in flight.
    pub async fn load_more(&self) -> ApplyOutcome {
        let request = self.lock().begin_more();
        self.run(request).await
    }

    /// Retry a failed first page.
    pub async fn retry(&self) -> ApplyOutcome {
        let request = self.lock().retry();
        self.run(request).await
    }

    async fn run(&self, request: Option<PageRequest>) -> ApplyOutcome {
        let Some(request) = request else {
            return ApplyOutcome::Skipped;
        };

        let result = fetch_page(self.store.as_ref(), &request).await;
        self.lock().apply(&request, result, self.notifier.as_ref())
    }

    pub fn snapshot(&self) -> FeedState {
        self.lock().clone()
    }

    pub fn view(&self) -> CategoryView {
        render(&self.lock())
    }
}
