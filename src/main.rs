#![allow(non_snake_case)]

use dioxus::prelude::*;

// Modules
mod components;
mod config;
mod context;
mod error;
mod models;
mod routes;
mod services;
mod stores;
mod utils;

use config::AppConfig;
use context::{AppContext, SessionRevision};

fn main() {
    // Initialize panic hook for better error messages in browser console
    #[cfg(target_arch = "wasm32")]
    {
        console_error_panic_hook::set_once();
        wasm_logger::init(wasm_logger::Config::new(log::Level::Info));
    }

    log::info!("Starting CoinWave web client");

    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    // Built once; rehydrates the session from storage
    let ctx = use_hook(|| AppContext::from_config(&AppConfig::default()));

    match ctx {
        Ok(ctx) => rsx! {
            AppShell { ctx }
        },
        Err(e) => {
            log::error!("Failed to initialize client: {}", e);
            rsx! {
                div {
                    class: "flex items-center justify-center h-screen text-red-600",
                    "Could not start the client: {e}"
                }
            }
        }
    }
}

#[component]
fn AppShell(ctx: AppContext) -> Element {
    use_context_provider(|| ctx);
    use_context_provider(SessionRevision::new);

    rsx! {
        Router::<routes::Route> {}
    }
}
