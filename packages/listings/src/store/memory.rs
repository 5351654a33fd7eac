use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use serde_json::{Map, Value};

use super::{BaseDocumentStore, StoreDocument, StoreError};
use crate::query::{Direction, ListingQuery};

/// In-process document store with the same query semantics as Firestore:
/// equality filter, order by one field with the document name as tiebreaker,
/// documents lacking the sort field excluded, and exclusive start-after cursors.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    collections: RwLock<HashMap<String, Vec<(String, Map<String, Value>)>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a document.
    pub fn insert(&self, collection: &str, id: &str, data: Value) {
        let data = match data {
            Value::Object(map) => map,
            other => {
                let mut map = Map::new();
                map.insert("value".to_string(), other);
                map
            }
        };

        let mut collections = self.collections.write().unwrap_or_else(PoisonError::into_inner);
        let documents = collections.entry(collection.to_string()).or_default();
        match documents.iter_mut().find(|(existing, _)| existing == id) {
            Some(slot) => slot.1 = data,
            None => documents.push((id.to_string(), data)),
        }
    }

    pub fn with_document(self, collection: &str, id: &str, data: Value) -> Self {
        self.insert(collection, id, data);
        self
    }

    pub fn len(&self, collection: &str) -> usize {
        self.collections
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(collection)
            .map_or(0, Vec::len)
    }

    pub fn is_empty(&self, collection: &str) -> bool {
        self.len(collection) == 0
    }
}

/// Total order over JSON values: null < bool < number < string < array < object.
pub(crate) fn compare_values(a: &Value, b: &Value) -> Ordering {
    fn rank(v: &Value) -> u8 {
        match v {
            Value::Null => 0,
            Value::Bool(_) => 1,
            Value::Number(_) => 2,
            Value::String(_) => 3,
            Value::Array(_) => 4,
            Value::Object(_) => 5,
        }
    }

    match (a, b) {
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Number(x), Value::Number(y)) => {
            let x = x.as_f64().unwrap_or(f64::NAN);
            let y = y.as_f64().unwrap_or(f64::NAN);
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Array(x), Value::Array(y)) => x
            .iter()
            .zip(y.iter())
            .map(|(l, r)| compare_values(l, r))
            .find(|o| *o != Ordering::Equal)
            .unwrap_or_else(|| x.len().cmp(&y.len())),
        _ => rank(a).cmp(&rank(b)),
    }
}

#[async_trait]
impl BaseDocumentStore for InMemoryStore {
    async fn run_query(&self, query: &ListingQuery) -> Result<Vec<StoreDocument>, StoreError> {
        if query.limit == 0 {
            return Err(StoreError::InvalidQuery("limit must be at least 1".to_string()));
        }

        let collections = self.collections.read().unwrap_or_else(PoisonError::into_inner);
        let Some(documents) = collections.get(&query.collection) else {
            return Ok(Vec::new());
        };

        let order_field = &query.order_by.field;
        let mut matched: Vec<StoreDocument> = documents
            .iter()
            .filter(|(_, data)| data.get(&query.filter.field) == Some(&query.filter.value))
            .filter_map(|(id, data)| {
                let order_value = data.get(order_field)?.clone();
                Some(StoreDocument {
                    id: id.clone(),
                    name: format!("{}/{}", query.collection, id),
                    data: data.clone(),
                    order_value,
                })
            })
            .collect();

        let position = |doc: &StoreDocument, value: &Value, name: &str| {
            let ordering = compare_values(&doc.order_value, value)
                .then_with(|| doc.name.as_str().cmp(name));
            match query.order_by.direction {
                Direction::Ascending => ordering,
                Direction::Descending => ordering.reverse(),
            }
        };

        matched.sort_by(|a, b| position(a, &b.order_value, &b.name));

        let page = matched
            .into_iter()
            .filter(|doc| match &query.start_after {
                Some(cursor) => {
                    position(doc, &cursor.order_value, &cursor.document_name) == Ordering::Greater
                }
                None => true,
            })
            .take(query.limit)
            .collect();

        Ok(page)
    }
}
