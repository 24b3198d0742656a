//! Rangyul Hotels Frontend Entry Point

mod app;
mod components;
mod context;
mod controllers;
mod dom;
mod leaflet;
mod store;

use components::NotificationHost;
use context::SiteContext;
use leptos::prelude::*;
use reactive_stores::Store;
use store::PageState;

fn main() {
    console_error_panic_hook::set_once();
    let _ = console_logger::init_logger("Rangyul", log::LevelFilter::Info);

    let config = app::load_site_config();
    let store = Store::new(PageState::new());
    mount_to_body(move || view! { <NotificationHost store=store /> });

    let ctx = SiteContext::new(config, store);
    if let Err(e) = app::start(ctx) {
        log::error!("Could not start the site runtime: {}", e);
    }
}
