use anyhow::{bail, Context, Result};
use dotenvy::dotenv;
use std::env;
use std::time::Duration;

use firestore::{FirestoreOptions, DEFAULT_BASE_URL, DEFAULT_DATABASE};

use crate::category::CategoryPolicy;
use crate::feed::{FeedSettings, PageSizes, DEFAULT_COLLECTION};

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub firestore_project_id: String,
    pub firestore_api_key: Option<String>,
    pub firestore_database: String,
    pub firestore_base_url: String,
    pub firestore_timeout: Duration,
    pub listings_collection: String,
    pub initial_page_size: usize,
    pub more_page_size: usize,
    pub category_policy: CategoryPolicy,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let timeout_secs: u64 = lookup("FIRESTORE_TIMEOUT_SECS")
            .unwrap_or_else(|| "10".to_string())
            .parse()
            .context("FIRESTORE_TIMEOUT_SECS must be a whole number of seconds")?;
        if timeout_secs == 0 {
            bail!("FIRESTORE_TIMEOUT_SECS must be at least 1");
        }

        let category_policy = match lookup("LISTINGS_CATEGORY_POLICY") {
            Some(raw) => raw.parse::<CategoryPolicy>().map_err(anyhow::Error::msg)?,
            None => CategoryPolicy::default(),
        };

        Ok(Self {
            firestore_project_id: lookup("FIRESTORE_PROJECT_ID")
                .context("FIRESTORE_PROJECT_ID must be set")?,
            firestore_api_key: lookup("FIRESTORE_API_KEY"),
            firestore_database: lookup("FIRESTORE_DATABASE")
                .unwrap_or_else(|| DEFAULT_DATABASE.to_string()),
            firestore_base_url: lookup("FIRESTORE_BASE_URL")
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            firestore_timeout: Duration::from_secs(timeout_secs),
            listings_collection: lookup("LISTINGS_COLLECTION")
                .unwrap_or_else(|| DEFAULT_COLLECTION.to_string()),
            initial_page_size: page_size(
                &lookup,
                "LISTINGS_INITIAL_PAGE_SIZE",
                PageSizes::default().initial,
            )?,
            more_page_size: page_size(
                &lookup,
                "LISTINGS_MORE_PAGE_SIZE",
                PageSizes::default().more,
            )?,
            category_policy,
        })
    }

    pub fn firestore_options(&self) -> FirestoreOptions {
        FirestoreOptions {
            project_id: self.firestore_project_id.clone(),
            database: self.firestore_database.clone(),
            api_key: self.firestore_api_key.clone(),
            base_url: self.firestore_base_url.clone(),
            timeout: self.firestore_timeout,
        }
    }

    pub fn feed_settings(&self) -> FeedSettings {
        FeedSettings {
            collection: self.listings_collection.clone(),
            sizes: PageSizes {
                initial: self.initial_page_size,
                more: self.more_page_size,
            },
            policy: self.category_policy,
        }
    }
}

fn page_size(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: usize) -> Result<usize> {
    let Some(raw) = lookup(key) else {
        return Ok(default);
    };

    let size: usize = raw
        .trim()
        .parse()
        .with_context(|| format!("{key} must be a positive integer"))?;
    if size == 0 {
        bail!("{key} must be at least 1");
    }
    Ok(size)
}
