//! Scroll-Reactive Effects
//!
//! Progress bar, header state, back-to-top button, reveal-on-scroll and
//! smooth same-page anchors.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use rangyul_core::{back_to_top_visible, header_scrolled, progress_percent, ScrollSettings};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

use crate::context::SiteContext;
use crate::dom::{self, DomResult, Listener, ViewportObserver};

const REVEAL_SELECTOR: &str = ".feature-item, .property-card, .premium-offer-card, .stat-item, \
     .map-property-card, .content-item, .contact-card";
const REVEAL_THRESHOLD: f64 = 0.1;
const REVEAL_ROOT_MARGIN: &str = "0px 0px -50px 0px";
const BACK_TO_TOP_SHOW_MS: u32 = 10;
const BACK_TO_TOP_HIDE_MS: u32 = 300;

struct ScrollTargets {
    progress: Option<HtmlElement>,
    header: Option<Element>,
    back_to_top: Option<HtmlElement>,
}

/// Shows and hides the back-to-top button with a short fade
struct BackToTop {
    button: HtmlElement,
    visible: bool,
    timer: Option<Timeout>,
}

impl BackToTop {
    fn set_visible(&mut self, visible: bool) {
        if self.visible == visible {
            return;
        }
        self.visible = visible;
        let button = self.button.clone();
        if visible {
            dom::set_style(&self.button, "display", "flex");
            self.timer = Some(Timeout::new(BACK_TO_TOP_SHOW_MS, move || {
                dom::set_style(&button, "opacity", "1");
                dom::add_class(&button, "visible");
            }));
        } else {
            dom::set_style(&self.button, "opacity", "0");
            dom::remove_class(&self.button, "visible");
            self.timer = Some(Timeout::new(BACK_TO_TOP_HIDE_MS, move || {
                dom::set_style(&button, "display", "none");
            }));
        }
    }
}

pub struct ScrollEffects {
    back_to_top: Option<Rc<RefCell<BackToTop>>>,
    _observer: Option<ViewportObserver>,
    _listeners: Vec<Listener>,
}

impl ScrollEffects {
    pub fn bind(ctx: &SiteContext, document: &Document) -> DomResult<Self> {
        let window = dom::window()?;
        let settings = ctx.config.scroll.clone();
        let targets = ScrollTargets {
            progress: dom::find(document, ".scroll-progress"),
            header: dom::find(document, ".header"),
            back_to_top: dom::find_id(document, "backToTop"),
        };
        let back_to_top = targets.back_to_top.clone().map(|button| {
            Rc::new(RefCell::new(BackToTop {
                button,
                visible: false,
                timer: None,
            }))
        });

        let mut listeners = Vec::new();

        let scroll_document = document.clone();
        let scroll_button = back_to_top.clone();
        let on_scroll = move || {
            update_on_scroll(&scroll_document, &targets, scroll_button.as_ref(), &settings);
        };
        on_scroll();
        listeners.push(Listener::new(&window, "scroll", move |_| on_scroll()));

        if let Some(button) = &back_to_top {
            let el = button.borrow().button.clone();
            listeners.push(Listener::new(&el, "click", |ev| {
                ev.prevent_default();
                dom::smooth_scroll_to(0.0);
            }));
        }

        let anchor_offset = ctx.config.scroll.anchor_offset_px;
        for anchor in dom::find_all::<Element>(document, r##"a[href^="#"]"##) {
            let target_document = document.clone();
            let el = anchor.clone();
            listeners.push(Listener::new(&anchor, "click", move |ev| {
                let href = el.get_attribute("href").unwrap_or_default();
                if href == "#" || href == "#!" {
                    return;
                }
                if let Some(target) = dom::find::<Element>(&target_document, &href) {
                    ev.prevent_default();
                    dom::smooth_scroll_to_element(&target, anchor_offset);
                }
            }));
        }

        let observer = bind_reveal(document)?;
        log::info!("Scroll effects bound");
        Ok(Self {
            back_to_top,
            _observer: observer,
            _listeners: listeners,
        })
    }

    pub fn teardown(&self) {
        if let Some(button) = &self.back_to_top {
            button.borrow_mut().timer = None;
        }
    }
}

fn update_on_scroll(
    document: &Document,
    targets: &ScrollTargets,
    back_to_top: Option<&Rc<RefCell<BackToTop>>>,
    settings: &ScrollSettings,
) {
    let y = dom::scroll_y();
    if let Some(bar) = &targets.progress {
        let height = document
            .document_element()
            .map(|root| root.scroll_height() as f64)
            .unwrap_or(0.0);
        let percent = progress_percent(y, height, dom::inner_height());
        dom::set_style(bar, "width", &format!("{}%", percent));
    }
    if let Some(header) = &targets.header {
        dom::set_class(header, "scrolled", header_scrolled(y, settings.header_threshold_px));
    }
    if let Some(button) = back_to_top {
        button
            .borrow_mut()
            .set_visible(back_to_top_visible(y, settings.back_to_top_threshold_px));
    }
}

/// Hide the animated blocks and reveal each once it scrolls into view.
/// With reduced motion everything is shown right away.
fn bind_reveal(document: &Document) -> DomResult<Option<ViewportObserver>> {
    let elements = dom::find_all::<HtmlElement>(document, REVEAL_SELECTOR);
    if elements.is_empty() {
        return Ok(None);
    }
    if dom::prefers_reduced_motion() {
        for el in &elements {
            dom::set_style(el, "opacity", "1");
        }
        return Ok(None);
    }

    let observer = ViewportObserver::new(REVEAL_THRESHOLD, REVEAL_ROOT_MARGIN, true, |target| {
        if let Some(el) = target.dyn_ref::<HtmlElement>() {
            dom::set_style(el, "opacity", "1");
            dom::set_style(el, "transform", "translateY(0)");
        }
    })?;
    for el in &elements {
        dom::set_style(el, "opacity", "0");
        dom::set_style(el, "transform", "translateY(30px)");
        dom::set_style(
            el,
            "transition",
            "opacity 0.6s var(--transition-smooth), transform 0.6s var(--transition-smooth)",
        );
        observer.observe(el);
    }
    log::debug!("Reveal observer watching {} elements", elements.len());
    Ok(Some(observer))
}
