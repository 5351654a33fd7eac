//! Reusable UI components

mod listing_item;
mod loading;
mod toast;

pub use listing_item::*;
pub use loading::*;
pub use toast::*;
