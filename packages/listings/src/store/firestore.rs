use async_trait::async_trait;
use serde_json::{json, Value};

use ::firestore::{encode_value, reference_value, Document, FirestoreOptions, FirestoreService};

use super::{BaseDocumentStore, StoreDocument, StoreError};
use crate::query::{Direction, ListingQuery};

/// Listings store backed by Firestore's REST API.
#[derive(Debug, Clone)]
pub struct FirestoreStore {
    service: FirestoreService,
}

impl FirestoreStore {
    pub fn new(options: FirestoreOptions) -> Result<Self, StoreError> {
        Ok(Self::from_service(FirestoreService::new(options)?))
    }

    pub fn from_service(service: FirestoreService) -> Self {
        Self { service }
    }
}

fn direction_name(direction: Direction) -> &'static str {
    match direction {
        Direction::Ascending => "ASCENDING",
        Direction::Descending => "DESCENDING",
    }
}

/// Lower a [`ListingQuery`] to a Firestore `structuredQuery`.
///
/// `__name__` is added as a secondary order so that a cursor of
/// (sort value, document name) identifies exactly one position, and
/// `startAt` with `before: false` resumes strictly after it.
pub fn structured_query(query: &ListingQuery) -> Value {
    let direction = direction_name(query.order_by.direction);

    let mut structured = json!({
        "from": [{ "collectionId": query.collection }],
        "where": {
            "fieldFilter": {
                "field": { "fieldPath": query.filter.field },
                "op": "EQUAL",
                "value": encode_value(&query.filter.value),
            }
        },
        "orderBy": [
            { "field": { "fieldPath": query.order_by.field }, "direction": direction },
            { "field": { "fieldPath": "__name__" }, "direction": direction },
        ],
        "limit": query.limit,
    });

    if let Some(cursor) = &query.start_after {
        structured["startAt"] = json!({
            "values": [cursor.order_value, reference_value(&cursor.document_name)],
            "before": false,
        });
    }

    structured
}

fn to_store_document(doc: Document, order_field: &str) -> StoreDocument {
    let order_value = doc.raw_fields.get(order_field).cloned().unwrap_or(Value::Null);
    StoreDocument {
        id: doc.id,
        name: doc.name,
        data: doc.fields,
        order_value,
    }
}

#[async_trait]
impl BaseDocumentStore for FirestoreStore {
    async fn run_query(&self, query: &ListingQuery) -> Result<Vec<StoreDocument>, StoreError> {
        if query.limit == 0 {
            return Err(StoreError::InvalidQuery("limit must be at least 1".to_string()));
        }

        let documents = self.service.run_query(&structured_query(query)).await?;

        tracing::debug!(
            collection = %query.collection,
            returned = documents.len(),
            "Firestore page fetched"
        );

        Ok(documents
            .into_iter()
            .map(|doc| to_store_document(doc, &query.order_by.field))
            .collect())
    }
}
