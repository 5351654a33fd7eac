//! Read requests against the listings collection.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::store::StoreDocument;

/// Field the category filter matches on.
pub const CATEGORY_FIELD: &str = "type";
/// Field pages are ordered by, newest first.
pub const TIMESTAMP_FIELD: &str = "timestamp";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Ascending,
    Descending,
}

/// Equality filter on a single field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldFilter {
    pub field: String,
    pub value: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderBy {
    pub field: String,
    pub direction: Direction,
}

/// Opaque position of the last record of a page.
///
/// `order_value` is whatever the store reported for the sort field, in the
/// store's own encoding; only the store that produced it interprets it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cursor {
    pub document_name: String,
    pub order_value: Value,
}

impl Cursor {
    /// Cursor that resumes strictly after `doc`.
    pub fn after(doc: &StoreDocument) -> Self {
        Cursor {
            document_name: doc.name.clone(),
            order_value: doc.order_value.clone(),
        }
    }
}

/// Filtered, sorted, size-limited read of one collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingQuery {
    pub collection: String,
    pub filter: FieldFilter,
    pub order_by: OrderBy,
    pub limit: usize,
    pub start_after: Option<Cursor>,
}

impl ListingQuery {
    /// Newest-first listings whose `type` equals `category`.
    ///
    /// The category is not checked here; an unknown one just matches nothing.
    pub fn for_category(collection: impl Into<String>, category: &str, limit: usize) -> Self {
        ListingQuery {
            collection: collection.into(),
            filter: FieldFilter {
                field: CATEGORY_FIELD.to_string(),
                value: Value::String(category.to_string()),
            },
            order_by: OrderBy {
                field: TIMESTAMP_FIELD.to_string(),
                direction: Direction::Descending,
            },
            limit,
            start_after: None,
        }
    }

    pub fn start_after(mut self, cursor: Option<Cursor>) -> Self {
        self.start_after = cursor;
        self
    }

    pub fn category(&self) -> Option<&str> {
        self.filter.value.as_str()
    }
}
