// Test doubles for the store and notifier seams.
//
// Injected in place of FirestoreStore / toast notifiers in unit and
// integration tests.

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use futures::channel::oneshot;
use serde_json::{json, Value};

use crate::notify::BaseNotifier;
use crate::query::ListingQuery;
use crate::store::{BaseDocumentStore, StoreDocument, StoreError};

/// Store document for a listing in `category` at `timestamp`, named
/// `{collection}/{id}` the way [`crate::InMemoryStore`] names documents.
pub fn listing_document(
    collection: &str,
    id: &str,
    category: &str,
    timestamp: &str,
) -> StoreDocument {
    let data = json!({
        "name": format!("Listing {id}"),
        "type": category,
        "timestamp": timestamp,
    });

    StoreDocument {
        id: id.to_string(),
        name: format!("{collection}/{id}"),
        data: data.as_object().cloned().unwrap_or_default(),
        order_value: Value::String(timestamp.to_string()),
    }
}

type GatedResult = Result<Vec<StoreDocument>, String>;

enum MockResponse {
    Documents(Vec<StoreDocument>),
    Failure(String),
    Gated(oneshot::Receiver<GatedResult>),
}

// =============================================================================
// Mock Document Store
// =============================================================================

/// Store that replays scripted responses in call order and records every
/// query it receives. Once the script runs out it returns empty pages.
#[derive(Default)]
pub struct MockDocumentStore {
    responses: Mutex<VecDeque<MockResponse>>,
    calls: Mutex<Vec<ListingQuery>>,
}

impl MockDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_documents(self, documents: Vec<StoreDocument>) -> Self {
        self.push_documents(documents);
        self
    }

    pub fn with_failure(self, message: &str) -> Self {
        self.push_failure(message);
        self
    }

    pub fn push_documents(&self, documents: Vec<StoreDocument>) {
        self.push(MockResponse::Documents(documents));
    }

    pub fn push_failure(&self, message: &str) {
        self.push(MockResponse::Failure(message.to_string()));
    }

    /// Script a response that is held until the returned sender fires.
    /// Dropping the sender fails the query.
    pub fn push_gate(&self) -> oneshot::Sender<GatedResult> {
        let (tx, rx) = oneshot::channel();
        self.push(MockResponse::Gated(rx));
        tx
    }

    fn push(&self, response: MockResponse) {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(response);
    }

    /// Every query received so far, in order.
    pub fn calls(&self) -> Vec<ListingQuery> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}

#[async_trait]
impl BaseDocumentStore for MockDocumentStore {
    async fn run_query(&self, query: &ListingQuery) -> Result<Vec<StoreDocument>, StoreError> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(query.clone());

        let next = self
            .responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front();

        match next {
            None => Ok(Vec::new()),
            Some(MockResponse::Documents(documents)) => Ok(documents),
            Some(MockResponse::Failure(message)) => Err(StoreError::Unavailable(message)),
            Some(MockResponse::Gated(rx)) => match rx.await {
                Ok(result) => result.map_err(StoreError::Unavailable),
                Err(_) => Err(StoreError::Unavailable("gate dropped".to_string())),
            },
        }
    }
}

// =============================================================================
// Spy Notifier
// =============================================================================

/// Notifier that records every message.
#[derive(Debug, Default)]
pub struct SpyNotifier {
    messages: Mutex<Vec<String>>,
}

impl SpyNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn count(&self) -> usize {
        self.messages.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}

impl BaseNotifier for SpyNotifier {
    fn error(&self, message: &str) {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message.to_string());
    }
}
