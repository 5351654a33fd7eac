//! Landing page linking to each category

use dioxus::prelude::*;
use listings_core::category::{heading, RENT, SALE};

use crate::routes::Route;

#[component]
pub fn Explore() -> Element {
    rsx! {
        div {
            class: "fade-in max-w-5xl mx-auto px-4 py-8",
            header {
                class: "mb-6",
                h1 { class: "text-3xl font-bold text-gray-900", "Explore" }
            }
            div {
                class: "grid gap-4 sm:grid-cols-2",
                for category in [RENT, SALE] {
                    Link {
                        key: "{category}",
                        to: Route::Category { category_name: category.to_string() },
                        class: "block p-6 bg-white rounded-2xl shadow-sm hover:shadow-md text-lg font-semibold text-gray-900",
                        "{heading(category)}"
                    }
                }
            }
        }
    }
}
