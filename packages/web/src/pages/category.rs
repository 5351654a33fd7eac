//! Category listing page
//!
//! The feed state lives in a signal. Fetches run as spawned tasks that call
//! the `fetch_listing_page` server function and fold the response back in
//! with `FeedState::apply`, which drops responses for a category the user
//! has already navigated away from.

use dioxus::prelude::*;
use listings_core::view::LOAD_MORE_LABEL;
use listings_core::{render, FeedSettings, FeedState, LoadMore, PageRequest, StoreError, ViewBody};

use crate::components::{use_toasts, ListingItem, LoadingDots, Spinner, ToastContext};
use crate::server_fns::fetch_listing_page;

#[component]
pub fn Category(category_name: String) -> Element {
    let toasts = use_toasts();
    let mut feed = use_signal(|| FeedState::new(FeedSettings::default()));

    // First page, again whenever the route's category changes
    use_effect(use_reactive!(|(category_name,)| {
        if let Some(request) = feed.write().begin_initial(&category_name) {
            spawn(run_request(feed, request, toasts));
        }
    }));

    let view = render(&feed.read());

    rsx! {
        div {
            class: "fade-in max-w-5xl mx-auto px-4 py-8",

            header {
                class: "mb-6",
                h4 { class: "text-2xl font-bold text-gray-900", "{view.heading}" }
            }

            match view.body {
                ViewBody::Loading => rsx! {
                    Spinner {}
                },
                ViewBody::Failed { message } => rsx! {
                    div {
                        class: "text-center py-12",
                        p { class: "text-gray-500 mb-4", "{message}" }
                        button {
                            class: "px-4 py-2 bg-gray-100 text-gray-700 rounded-lg hover:bg-gray-200 transition-colors",
                            onclick: move |_| {
                                if let Some(request) = feed.write().retry() {
                                    spawn(run_request(feed, request, toasts));
                                }
                            },
                            "Try again"
                        }
                    }
                },
                ViewBody::Empty { message } => rsx! {
                    p { class: "text-gray-500 py-12 text-center", "{message}" }
                },
                ViewBody::Populated { entries, load_more } => rsx! {
                    main {
                        ul {
                            class: "flex flex-col gap-4",
                            for entry in entries {
                                ListingItem { key: "{entry.key}", entry: entry.clone() }
                            }
                        }

                        match load_more {
                            LoadMore::Hidden => rsx! {},
                            LoadMore::Ready => rsx! {
                                div {
                                    class: "flex justify-center mt-8",
                                    button {
                                        class: "px-6 py-2 bg-emerald-600 text-white rounded-xl hover:bg-emerald-700 transition-colors font-medium",
                                        onclick: move |_| {
                                            if let Some(request) = feed.write().begin_more() {
                                                spawn(run_request(feed, request, toasts));
                                            }
                                        },
                                        "{LOAD_MORE_LABEL}"
                                    }
                                }
                            },
                            LoadMore::Busy => rsx! {
                                div {
                                    class: "flex justify-center mt-8",
                                    button {
                                        class: "px-6 py-2 bg-emerald-400 text-white rounded-xl cursor-wait",
                                        disabled: true,
                                        LoadingDots {}
                                    }
                                }
                            },
                        }
                    }
                },
            }
        }
    }
}

async fn run_request(mut feed: Signal<FeedState>, request: PageRequest, toasts: ToastContext) {
    let result = fetch_listing_page(request.clone())
        .await
        .map_err(|e| StoreError::Unavailable(e.to_string()));

    feed.write().apply(&request, result, &toasts);
}
