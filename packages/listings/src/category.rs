//! Category names and how they map to page headings.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub const RENT: &str = "rent";
pub const SALE: &str = "sale";

/// Page heading for a category.
///
/// Only an exact `"rent"` reads as rent; every other value, typos included,
/// is headed as a sale page.
pub fn heading(category: &str) -> &'static str {
    if category == RENT {
        "Places for rent"
    } else {
        "Places for sale"
    }
}

/// What to do with category names outside `rent`/`sale`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryPolicy {
    /// Query the store with whatever the route supplied.
    #[default]
    Lenient,
    /// Only `rent` and `sale` reach the store; anything else renders empty.
    Strict,
}

impl CategoryPolicy {
    pub fn admits(&self, category: &str) -> bool {
        match self {
            CategoryPolicy::Lenient => true,
            CategoryPolicy::Strict => category == RENT || category == SALE,
        }
    }
}

impl FromStr for CategoryPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lenient" => Ok(CategoryPolicy::Lenient),
            "strict" => Ok(CategoryPolicy::Strict),
            other => Err(format!("unknown category policy '{other}' (expected lenient or strict)")),
        }
    }
}

impl fmt::Display for CategoryPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryPolicy::Lenient => f.write_str("lenient"),
            CategoryPolicy::Strict => f.write_str("strict"),
        }
    }
}
