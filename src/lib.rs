//! # catalog-client
//!
//! Leptos + WASM front-end for the product catalog.
//!
//! This crate contains the session store and its durable mirror, the shared
//! HTTP client that authorizes every request from the session it is given,
//! the route table and navigation guard, and thin route pages.
//!
//! Build for the browser with `--features csr`; native builds compile the
//! same logic against in-memory storage and an offline transport.

pub mod app;
pub mod config;
pub mod net;
pub mod pages;
pub mod router;
pub mod state;

/// Browser entry point.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    let config = config::AppConfig::from_build_env();
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(config.log_level) {
        leptos::logging::warn!("logger already initialized: {e}");
    }
    log::info!("catalog client starting against {}", config.api_base_url);
    leptos::mount::mount_to_body(move || leptos::view! { <app::App config=config.clone()/> });
}
