//! Server functions for listing pages
//!
//! Queries run on the server against Firestore. The server owns the
//! collection name, page sizes and category policy; the client only says
//! which page it wants.

use dioxus::prelude::*;
use listings_core::{Page, PageRequest};

/// Fetch one page of a category
#[server]
pub async fn fetch_listing_page(request: PageRequest) -> Result<Page, ServerFnError> {
    let backend = backend::shared().map_err(|e| {
        tracing::error!(error = %e, "Listings backend unavailable");
        ServerFnError::new(e.to_string())
    })?;

    let Some(request) = backend.scope(request) else {
        return Ok(Page {
            listings: Vec::new(),
            next_cursor: None,
        });
    };

    listings_core::fetch_page(&backend.store, &request)
        .await
        .map_err(|e| {
            tracing::warn!(error = %e, "Listings query failed");
            ServerFnError::new(e.to_string())
        })
}

#[cfg(feature = "server")]
mod backend {
    use std::sync::OnceLock;

    use anyhow::Result;
    use listings_core::{Config, FeedSettings, FetchKind, FirestoreStore, PageRequest};

    pub struct Backend {
        pub store: FirestoreStore,
        pub settings: FeedSettings,
    }

    impl Backend {
        /// Rewrite a client request with the server's collection and page
        /// sizes. `None` when the category policy refuses the category.
        pub fn scope(&self, mut request: PageRequest) -> Option<PageRequest> {
            let category = request.query.category().unwrap_or_default();
            if !self.settings.policy.admits(category) {
                tracing::warn!(category, "Refusing category");
                return None;
            }

            request.query.collection = self.settings.collection.clone();
            request.query.limit = match request.kind {
                FetchKind::Initial => self.settings.sizes.initial,
                FetchKind::More => self.settings.sizes.more,
            };
            Some(request)
        }
    }

    static BACKEND: OnceLock<Backend> = OnceLock::new();

    pub fn shared() -> Result<&'static Backend> {
        if let Some(backend) = BACKEND.get() {
            return Ok(backend);
        }

        let config = Config::from_env()?;
        let store = FirestoreStore::new(config.firestore_options())?;
        tracing::info!(
            project = %config.firestore_project_id,
            collection = %config.listings_collection,
            "Listings backend ready"
        );

        Ok(BACKEND.get_or_init(|| Backend {
            store,
            settings: config.feed_settings(),
        }))
    }
}
