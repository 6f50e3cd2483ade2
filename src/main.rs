//! ProjectFlow Frontend Entry Point

mod api;
mod app;
mod components;
mod config;
mod error;
mod filters;
mod format;
mod forms;
mod jwt;
mod kanban;
mod logging;
mod markdown;
mod models;
mod router;
mod session;
mod storage;
mod store;

use app::App;
use config::Config;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    let config = Config::load();
    logging::init(&config);
    config.report();
    mount_to_body(move || view! { <App config=config /> });
}
