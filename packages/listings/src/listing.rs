//! Listing records as the page sees them.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::store::StoreDocument;

/// A fetched listing: store-assigned id plus its payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: String,
    pub data: ListingData,
}

/// Listing payload.
///
/// Only the fields the list entry renders are typed; everything else is
/// carried untouched in `extra`. A typed field holding a value of the wrong
/// shape decodes to its default, so a payload never fails to decode and
/// re-encoding never repeats a key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingData {
    #[serde(default, deserialize_with = "lenient")]
    pub name: String,
    #[serde(rename = "type", default, deserialize_with = "lenient")]
    pub category: String,
    #[serde(default)]
    pub timestamp: Option<Value>,
    #[serde(default, deserialize_with = "lenient")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub offer: bool,
    #[serde(default, deserialize_with = "lenient")]
    pub regular_price: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub discounted_price: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub bedrooms: Option<u32>,
    #[serde(default, deserialize_with = "lenient")]
    pub bathrooms: Option<u32>,
    #[serde(rename = "imgUrls", default, deserialize_with = "lenient")]
    pub image_urls: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Decode a field, falling back to its default when the value has the
/// wrong shape.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).unwrap_or_default())
}

impl ListingData {
    /// Price to show: the discounted price while on offer, else the regular one.
    pub fn display_price(&self) -> Option<f64> {
        if self.offer {
            self.discounted_price.or(self.regular_price)
        } else {
            self.regular_price
        }
    }
}

impl Listing {
    /// Build a listing from a store document.
    ///
    /// Payloads are not validated; mistyped fields take their defaults. A
    /// payload that still fails to decode keeps just its category.
    pub fn from_document(doc: &StoreDocument) -> Self {
        let payload = Value::Object(doc.data.clone());
        let data = match serde_json::from_value::<ListingData>(payload) {
            Ok(data) => data,
            Err(e) => {
                tracing::warn!(id = %doc.id, error = %e, "Listing payload could not be decoded");
                ListingData {
                    category: doc
                        .data
                        .get("type")
                        .and_then(Value::as_str)
                        .unwrap_or_default()
                        .to_string(),
                    ..Default::default()
                }
            }
        };

        Listing {
            id: doc.id.clone(),
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(data: Value) -> StoreDocument {
        StoreDocument {
            id: "l1".to_string(),
            name: "listings/l1".to_string(),
            data: data.as_object().cloned().unwrap(),
            order_value: Value::Null,
        }
    }

    #[test]
    fn parses_rendered_fields() {
        let listing = Listing::from_document(&doc(json!({
            "name": "Beachside Cottage",
            "type": "rent",
            "timestamp": "2024-05-01T10:00:00Z",
            "location": "12 Shore Rd",
            "offer": true,
            "regularPrice": 2500,
            "discountedPrice": 2100,
            "bedrooms": 2,
            "bathrooms": 1,
            "imgUrls": ["https://img/1.jpg"],
            "parking": true
        })));

        assert_eq!(listing.id, "l1");
        assert_eq!(listing.data.name, "Beachside Cottage");
        assert_eq!(listing.data.category, "rent");
        assert_eq!(listing.data.display_price(), Some(2100.0));
        assert_eq!(listing.data.image_urls.len(), 1);
        assert_eq!(listing.data.extra.get("parking"), Some(&json!(true)));
    }

    #[test]
    fn regular_price_when_not_on_offer() {
        let listing = Listing::from_document(&doc(json!({
            "type": "sale",
            "regularPrice": 350000,
            "discountedPrice": 300000
        })));
        assert_eq!(listing.data.display_price(), Some(350000.0));
    }

    #[test]
    fn mismatched_fields_fall_back_to_defaults() {
        let listing = Listing::from_document(&doc(json!({
            "type": "sale",
            "name": "Old Mill",
            "bedrooms": "lots",
            "bathrooms": 2.5,
            "offer": "yes",
            "imgUrls": "https://img/1.jpg",
            "parking": true
        })));

        assert_eq!(listing.data.category, "sale");
        assert_eq!(listing.data.name, "Old Mill");
        assert_eq!(listing.data.bedrooms, None);
        assert_eq!(listing.data.bathrooms, None);
        assert!(!listing.data.offer);
        assert!(listing.data.image_urls.is_empty());
        assert_eq!(listing.data.extra.get("parking"), Some(&json!(true)));
        assert!(!listing.data.extra.contains_key("bedrooms"));
    }

    #[test]
    fn mismatched_listing_survives_the_wire() {
        let listing = Listing::from_document(&doc(json!({
            "type": "rent",
            "bedrooms": "lots",
            "regularPrice": "call us",
            "parking": true
        })));

        let wire = serde_json::to_string(&listing).unwrap();
        let decoded: Listing = serde_json::from_str(&wire).unwrap();

        assert_eq!(decoded, listing);
    }
}
