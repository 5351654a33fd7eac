//! Route definitions for the application

use dioxus::prelude::*;

use crate::pages::{Category, Explore};

#[derive(Clone, Debug, PartialEq, Routable)]
#[rustfmt::skip]
pub enum Route {
    #[route("/")]
    Explore {},

    #[route("/category/:category_name")]
    Category { category_name: String },
}
