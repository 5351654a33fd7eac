//! House Market - category listing pages (Dioxus fullstack)
//!
//! ## Running
//!
//! Development (with hot reload):
//! ```bash
//! dx serve --features web,server
//! ```
//!
//! Production build:
//! ```bash
//! dx build --release --features web,server
//! ```
//!
//! The server side reads its Firestore settings from the environment
//! (`FIRESTORE_PROJECT_ID`, `FIRESTORE_API_KEY`, ...; see
//! `listings_core::Config`).

#![allow(non_snake_case)]

mod app;
mod components;
mod pages;
mod routes;
mod server_fns;

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // In fullstack mode, this handles both server and client
    dioxus::launch(app::App);
}
