//! Category listings: a paginated, filtered list of real-estate listings
//! backed by a document store.
//!
//! The pieces compose in order:
//!
//! 1. [`query`] builds a filtered, sorted, size-limited read request.
//! 2. [`feed`] runs requests through a [`store::BaseDocumentStore`] and
//!    merges pages into the view state.
//! 3. [`view`] turns the view state into something a UI can render.

pub mod category;
#[cfg(feature = "firestore")]
pub mod config;
pub mod feed;
pub mod listing;
pub mod notify;
pub mod query;
pub mod store;
pub mod testing;
pub mod view;

pub use category::{heading, CategoryPolicy};
#[cfg(feature = "firestore")]
pub use config::Config;
pub use feed::{
    fetch_page, ApplyOutcome, FeedSettings, FeedState, FetchKind, ListingFeed, LoadStatus, Page,
    PageRequest, PageSizes,
};
pub use listing::{Listing, ListingData};
pub use notify::{BaseNotifier, TracingNotifier, FETCH_FAILED_MESSAGE};
pub use query::{Cursor, Direction, FieldFilter, ListingQuery, OrderBy};
#[cfg(feature = "firestore")]
pub use store::FirestoreStore;
pub use store::{BaseDocumentStore, InMemoryStore, StoreDocument, StoreError};
pub use view::{render, CategoryView, ListingEntry, LoadMore, ViewBody};
