// Document store seam.
//
// The page only needs one capability from the store: run a filtered, ordered,
// cursor-paginated query. Everything else about the store stays behind this trait.

#[cfg(feature = "firestore")]
mod firestore;
mod memory;

#[cfg(feature = "firestore")]
pub use self::firestore::{structured_query, FirestoreStore};
pub use self::memory::InMemoryStore;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::query::ListingQuery;

/// One record of a query result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreDocument {
    /// Store-assigned identifier.
    pub id: String,
    /// Fully qualified name; unique across the store and the tiebreaker for ordering.
    pub name: String,
    /// Payload as plain JSON.
    pub data: Map<String, Value>,
    /// Value of the query's sort field, in the store's native encoding.
    pub order_value: Value,
}

/// Error type for store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[cfg(feature = "firestore")]
    #[error("Firestore error: {0}")]
    Firestore(#[from] ::firestore::FirestoreError),

    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),
}

#[async_trait]
pub trait BaseDocumentStore: Send + Sync {
    /// Run `query` and return at most `query.limit` documents in query order.
    async fn run_query(&self, query: &ListingQuery) -> Result<Vec<StoreDocument>, StoreError>;
}
