//! Minimal Firestore REST client: structured queries over `documents:runQuery`.
//!
//! https://firebase.google.com/docs/firestore/reference/rest/v1/projects.databases.documents/runQuery

pub mod models;

use std::time::Duration;

use reqwest::Client;
use serde_json::Value;

pub use crate::models::{decode_value, encode_value, reference_value, Document, RawDocument};
use crate::models::RunQueryResponseItem;

pub const DEFAULT_BASE_URL: &str = "https://firestore.googleapis.com/v1";
pub const DEFAULT_DATABASE: &str = "(default)";

#[derive(Debug, Clone)]
pub struct FirestoreOptions {
    pub project_id: String,
    pub database: String,
    pub api_key: Option<String>,
    pub base_url: String,
    pub timeout: Duration,
}

impl FirestoreOptions {
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            database: DEFAULT_DATABASE.to_string(),
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FirestoreError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Firestore returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Malformed value: {0}")]
    Malformed(String),
}

#[derive(Debug, Clone)]
pub struct FirestoreService {
    options: FirestoreOptions,
    client: Client,
}

impl FirestoreService {
    pub fn new(options: FirestoreOptions) -> Result<Self, FirestoreError> {
        let client = Client::builder().timeout(options.timeout).build()?;
        Ok(Self { options, client })
    }

    pub fn options(&self) -> &FirestoreOptions {
        &self.options
    }

    /// `projects/{p}/databases/{db}/documents`, the parent of every
    /// top-level collection.
    pub fn documents_path(&self) -> String {
        format!(
            "projects/{}/databases/{}/documents",
            self.options.project_id, self.options.database
        )
    }

    /// Full resource name of a document in a top-level collection.
    pub fn document_name(&self, collection: &str, id: &str) -> String {
        format!("{}/{}/{}", self.documents_path(), collection, id)
    }

    /// Run a `structuredQuery` against the root of the database and return
    /// the matched documents in result order.
    pub async fn run_query(
        &self,
        structured_query: &Value,
    ) -> Result<Vec<Document>, FirestoreError> {
        let url = format!(
            "{}/{}:runQuery",
            self.options.base_url.trim_end_matches('/'),
            self.documents_path()
        );

        let mut request = self
            .client
            .post(&url)
            .json(&serde_json::json!({ "structuredQuery": structured_query }));

        if let Some(key) = &self.options.api_key {
            request = request.query(&[("key", key)]);
        }

        tracing::debug!(url = %url, query = %structured_query, "Running Firestore query");

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), body = %body, "Firestore query failed");
            return Err(FirestoreError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        let items: Vec<RunQueryResponseItem> = serde_json::from_slice(&bytes)?;

        items
            .into_iter()
            .filter_map(|item| item.document)
            .map(Document::try_from)
            .collect()
    }
}
