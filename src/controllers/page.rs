//! Page Chrome
//!
//! Footer year, broken image fallback and the `loaded` body class.

use chrono::Datelike;
use web_sys::{Document, Element, HtmlImageElement};

use crate::context::SiteContext;
use crate::dom::{self, Listener};

pub struct PageChrome {
    _listeners: Vec<Listener>,
}

impl PageChrome {
    pub fn bind(ctx: &SiteContext, document: &Document) -> Self {
        if let Some(year) = dom::find_id::<Element>(document, "current-year") {
            year.set_text_content(Some(&ctx.today().year().to_string()));
        }

        let listeners = dom::find_all::<HtmlImageElement>(document, "img")
            .into_iter()
            .map(|img| {
                let el = img.clone();
                Listener::new(&img, "error", move |_| {
                    log::warn!("Image failed to load: {}", el.src());
                    dom::set_style(&el, "display", "none");
                })
            })
            .collect();

        Self { _listeners: listeners }
    }

    /// Runs once the window `load` event has fired
    pub fn mark_loaded(&self) {
        if let Ok(body) = dom::body() {
            dom::add_class(&body, "loaded");
        }
    }
}
