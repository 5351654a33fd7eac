//! Listing entry in a category list

use dioxus::prelude::*;
use listings_core::ListingEntry;

/// Props for ListingItem
#[derive(Props, Clone, PartialEq)]
pub struct ListingItemProps {
    pub entry: ListingEntry,
}

#[component]
pub fn ListingItem(props: ListingItemProps) -> Element {
    let entry = &props.entry;

    rsx! {
        li {
            class: "flex gap-4 bg-white rounded-2xl shadow-sm hover:shadow-md transition-shadow overflow-hidden",

            if let Some(image_url) = &entry.image_url {
                img {
                    class: "w-40 h-32 object-cover flex-shrink-0",
                    src: "{image_url}",
                    alt: "{entry.name}",
                }
            }

            div {
                class: "flex flex-col justify-center py-3 pr-4 min-w-0",

                if let Some(location) = &entry.location {
                    p { class: "text-xs text-gray-500 truncate", "{location}" }
                }

                p { class: "text-lg font-semibold text-gray-900 truncate", "{entry.name}" }

                if let Some(price) = &entry.price {
                    p {
                        class: if entry.on_offer { "text-emerald-600 font-semibold" } else { "text-gray-800 font-semibold" },
                        "{price}"
                        if entry.per_month { " / Month" }
                    }
                }

                div {
                    class: "flex gap-3 mt-1 text-xs text-gray-600",
                    if let Some(bedrooms) = &entry.bedrooms {
                        span { "{bedrooms}" }
                    }
                    if let Some(bathrooms) = &entry.bathrooms {
                        span { "{bathrooms}" }
                    }
                }
            }
        }
    }
}
