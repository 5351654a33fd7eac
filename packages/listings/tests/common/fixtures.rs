//! Seed data for listing feed tests.

use listings_core::InMemoryStore;
use serde_json::json;

pub const COLLECTION: &str = "listings";

/// Insert `count` listings in `category`, newest first as `{category}-0`,
/// `{category}-1`, ... One day apart, all in 2024.
pub fn seed_listings(store: &InMemoryStore, category: &str, count: usize) {
    for i in 0..count {
        let id = format!("{category}-{i}");
        store.insert(
            COLLECTION,
            &id,
            json!({
                "name": format!("{category} listing {i}"),
                "type": category,
                "timestamp": format!("2024-06-{:02}T12:00:00Z", 30 - i),
                "location": format!("{} Main St", 100 + i),
                "offer": i % 2 == 0,
                "regularPrice": 1000 + i * 100,
                "discountedPrice": 900 + i * 100,
                "bedrooms": 1 + i % 3,
                "bathrooms": 1,
                "imgUrls": [format!("https://images.example/{id}.jpg")]
            }),
        );
    }
}

/// Ids the store should return for `category`, newest first.
pub fn expected_ids(category: &str, range: std::ops::Range<usize>) -> Vec<String> {
    range.map(|i| format!("{category}-{i}")).collect()
}
