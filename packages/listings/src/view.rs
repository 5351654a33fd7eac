//! What the category page shows, as data.
//!
//! [`render`] is a pure function of [`FeedState`]; UI components only map
//! the result to markup.

use serde::{Deserialize, Serialize};

use crate::category::{heading, RENT};
use crate::feed::{FeedState, LoadStatus};
use crate::listing::Listing;
use crate::notify::FETCH_FAILED_MESSAGE;

pub const LOAD_MORE_LABEL: &str = "Load More...";

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryView {
    pub category: String,
    pub heading: &'static str,
    pub body: ViewBody,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViewBody {
    /// Spinner only.
    Loading,
    /// First page failed; offer a retry.
    Failed { message: &'static str },
    Empty { message: String },
    Populated {
        entries: Vec<ListingEntry>,
        load_more: LoadMore,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadMore {
    Hidden,
    Ready,
    /// A "load more" fetch is in flight.
    Busy,
}

/// One row of the listing list, keyed by listing id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingEntry {
    pub key: String,
    pub id: String,
    pub category: String,
    pub name: String,
    pub location: Option<String>,
    pub image_url: Option<String>,
    pub price: Option<String>,
    pub per_month: bool,
    pub on_offer: bool,
    pub bedrooms: Option<String>,
    pub bathrooms: Option<String>,
}

impl From<&Listing> for ListingEntry {
    fn from(listing: &Listing) -> Self {
        let data = &listing.data;
        ListingEntry {
            key: listing.id.clone(),
            id: listing.id.clone(),
            category: data.category.clone(),
            name: data.name.clone(),
            location: data.location.clone(),
            image_url: data.image_urls.first().cloned(),
            price: data.display_price().map(format_price),
            per_month: data.category == RENT,
            on_offer: data.offer,
            bedrooms: data.bedrooms.map(|n| count_label(n, "Bedroom")),
            bathrooms: data.bathrooms.map(|n| count_label(n, "Bathroom")),
        }
    }
}

pub fn empty_message(category: &str) -> String {
    format!("No Available Listings for {category}")
}

fn count_label(n: u32, noun: &str) -> String {
    if n == 1 {
        format!("1 {noun}")
    } else {
        format!("{n} {noun}s")
    }
}

/// `$1,234,567`, rounded to whole units.
pub fn format_price(price: f64) -> String {
    let whole = price.round() as i64;
    let digits = whole.unsigned_abs().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if whole < 0 {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

pub fn render(state: &FeedState) -> CategoryView {
    let body = match state.status() {
        LoadStatus::Loading => ViewBody::Loading,
        LoadStatus::Failed => ViewBody::Failed {
            message: FETCH_FAILED_MESSAGE,
        },
        LoadStatus::Loaded if state.listings().is_empty() => ViewBody::Empty {
            message: empty_message(state.category()),
        },
        LoadStatus::Loaded => {
            let load_more = if !state.has_more() {
                LoadMore::Hidden
            } else if state.is_loading_more() {
                LoadMore::Busy
            } else {
                LoadMore::Ready
            };

            ViewBody::Populated {
                entries: state.listings().iter().map(ListingEntry::from).collect(),
                load_more,
            }
        }
    };

    CategoryView {
        category: state.category().to_string(),
        heading: heading(state.category()),
        body,
    }
}
