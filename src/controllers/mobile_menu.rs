//! Mobile Menu
//!
//! Hamburger toggle for the primary navigation. Shares the page scroll lock
//! with the modals.

use std::cell::Cell;
use std::rc::Rc;

use rangyul_core::menu_should_collapse;
use web_sys::{Document, Element};

use crate::context::{BodyScrollLock, SiteContext};
use crate::dom::{self, DomResult, Listener};

#[derive(Clone)]
struct MenuView {
    toggle: Element,
    menu: Element,
}

#[derive(Clone)]
struct MenuHandle {
    view: MenuView,
    open: Rc<Cell<bool>>,
    lock: BodyScrollLock,
}

impl MenuHandle {
    /// Only real transitions touch classes and the lock
    fn set_open(&self, open: bool) {
        if self.open.replace(open) == open {
            return;
        }
        dom::set_class(&self.view.toggle, "active", open);
        dom::set_class(&self.view.menu, "active", open);
        if open {
            self.lock.acquire();
        } else {
            self.lock.release();
        }
    }
}

pub struct MobileMenu {
    handle: MenuHandle,
    _listeners: Vec<Listener>,
}

impl MobileMenu {
    pub fn bind(ctx: &SiteContext, document: &Document) -> DomResult<Self> {
        let view = MenuView {
            toggle: dom::require(document, ".mobile-menu-toggle")?,
            menu: dom::require(document, ".nav-menu")?,
        };
        let handle = MenuHandle {
            view: view.clone(),
            open: Rc::new(Cell::new(false)),
            lock: ctx.scroll_lock.clone(),
        };
        let mut listeners = Vec::new();

        let h = handle.clone();
        listeners.push(Listener::new(&view.toggle, "click", move |ev| {
            ev.stop_propagation();
            h.set_open(!h.open.get());
        }));

        for link in dom::find_all::<Element>(document, ".nav-link") {
            let h = handle.clone();
            listeners.push(Listener::new(&link, "click", move |_| h.set_open(false)));
        }

        let h = handle.clone();
        listeners.push(Listener::new(document, "click", move |ev| {
            if !h.open.get() {
                return;
            }
            let target = ev.target();
            if !dom::contains_target(&h.view.menu, target.clone())
                && !dom::contains_target(&h.view.toggle, target)
            {
                h.set_open(false);
            }
        }));

        let h = handle.clone();
        let breakpoint = ctx.config.menu_breakpoint_px;
        let window = dom::window()?;
        listeners.push(Listener::new(&window, "resize", move |_| {
            if menu_should_collapse(dom::inner_width(), breakpoint) {
                h.set_open(false);
            }
        }));

        log::info!("Mobile menu bound");
        Ok(Self {
            handle,
            _listeners: listeners,
        })
    }

    pub fn teardown(&self) {
        self.handle.set_open(false);
    }
}
