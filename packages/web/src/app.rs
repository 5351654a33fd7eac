//! Root application component

use dioxus::prelude::*;

use crate::components::ToastProvider;
use crate::routes::Route;

/// Root application component
#[component]
pub fn App() -> Element {
    rsx! {
        document::Stylesheet { href: asset!("/assets/main.css") }

        // Toasts are available to every page
        ToastProvider {
            Router::<Route> {}
        }
    }
}
