//! Modal Controller
//!
//! Drives one overlay element through Closed -> Opening -> Open -> Closing.
//! Holds the page scroll lock while visible and owns its transition timers.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use gloo_timers::callback::Timeout;
use rangyul_core::{ModalDelays, ModalPhase, ModalState};
use web_sys::{Element, HtmlElement, KeyboardEvent};

use crate::context::{BodyScrollLock, SiteContext};
use crate::dom::{self, Listener};

/// How visibility is expressed in the markup
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Presentation {
    /// `active` class only; CSS handles the rest
    Class,
    /// `display: flex` first, then opacity and `active` once settled
    DisplayFlex,
}

/// Extras applied when opening
#[derive(Default)]
pub struct OpenOptions {
    /// Focused after the focus delay
    pub focus: Option<HtmlElement>,
    /// Element id scrolled into view once the modal has fully closed
    pub return_anchor: Option<String>,
}

/// Cheap-to-clone handle to one modal
#[derive(Clone)]
pub struct Modal {
    inner: Rc<ModalInner>,
}

struct ModalInner {
    name: &'static str,
    root: HtmlElement,
    presentation: Presentation,
    delays: ModalDelays,
    anchor_offset: f64,
    lock: BodyScrollLock,
    holds_lock: Cell<bool>,
    state: RefCell<ModalState>,
    phase_timer: RefCell<Option<Timeout>>,
    focus_timer: RefCell<Option<Timeout>>,
}

impl Modal {
    pub fn new(
        name: &'static str,
        root: HtmlElement,
        presentation: Presentation,
        ctx: &SiteContext,
    ) -> Self {
        Self {
            inner: Rc::new(ModalInner {
                name,
                root,
                presentation,
                delays: ctx.config.modal.clone(),
                anchor_offset: ctx.config.scroll.anchor_offset_px,
                lock: ctx.scroll_lock.clone(),
                holds_lock: Cell::new(false),
                state: RefCell::new(ModalState::new()),
                phase_timer: RefCell::new(None),
                focus_timer: RefCell::new(None),
            }),
        }
    }

    pub fn root(&self) -> &HtmlElement {
        &self.inner.root
    }

    pub fn phase(&self) -> ModalPhase {
        self.inner.state.borrow().phase()
    }

    pub fn is_visible(&self) -> bool {
        self.inner.state.borrow().is_visible()
    }

    /// Show the modal. Returns false if it was already visible.
    pub fn open(&self, options: OpenOptions) -> bool {
        let inner = &self.inner;

        // reopened during the close transition: the page stays locked and
        // the previous session's return scroll is dropped
        if inner.state.borrow_mut().interrupt_close().is_ok() {
            inner.phase_timer.borrow_mut().take();
            log::debug!("[{}] close interrupted", inner.name);
        }

        if let Err(e) = inner.state.borrow_mut().begin_open(options.return_anchor) {
            log::debug!("[{}] open ignored: {}", inner.name, e);
            return false;
        }
        log::debug!("[{}] opening", inner.name);

        match inner.presentation {
            Presentation::Class => dom::add_class(&inner.root, "active"),
            Presentation::DisplayFlex => dom::set_style(&inner.root, "display", "flex"),
        }
        if !inner.holds_lock.replace(true) {
            inner.lock.acquire();
        }

        let weak = Rc::downgrade(inner);
        *inner.phase_timer.borrow_mut() = Some(Timeout::new(inner.delays.settle_ms, move || {
            if let Some(inner) = weak.upgrade() {
                if inner.state.borrow_mut().finish_open().is_ok()
                    && inner.presentation == Presentation::DisplayFlex
                {
                    dom::set_style(&inner.root, "opacity", "1");
                    dom::add_class(&inner.root, "active");
                }
            }
        }));

        *inner.focus_timer.borrow_mut() = options.focus.map(|field| {
            Timeout::new(inner.delays.focus_ms, move || {
                let _ = field.focus();
            })
        });
        true
    }

    /// Hide the modal. The scroll lock is released after the close delay.
    pub fn close(&self) -> bool {
        let inner = &self.inner;
        // closed while still settling: skip straight to Open
        if inner.state.borrow_mut().finish_open().is_ok() {
            inner.phase_timer.borrow_mut().take();
        }
        if let Err(e) = inner.state.borrow_mut().begin_close() {
            log::debug!("[{}] close ignored: {}", inner.name, e);
            return false;
        }
        log::debug!("[{}] closing", inner.name);

        inner.focus_timer.borrow_mut().take();
        dom::remove_class(&inner.root, "active");
        if inner.presentation == Presentation::DisplayFlex {
            dom::set_style(&inner.root, "opacity", "0");
        }

        let weak: Weak<ModalInner> = Rc::downgrade(inner);
        *inner.phase_timer.borrow_mut() = Some(Timeout::new(inner.delays.close_ms, move || {
            if let Some(inner) = weak.upgrade() {
                Modal { inner }.finish_close();
            }
        }));
        true
    }

    fn finish_close(&self) {
        let inner = &self.inner;
        let Ok(anchor) = inner.state.borrow_mut().finish_close() else {
            return;
        };
        if inner.presentation == Presentation::DisplayFlex {
            dom::set_style(&inner.root, "display", "none");
        }
        if inner.holds_lock.replace(false) {
            inner.lock.release();
        }
        if let Some(id) = anchor {
            if let Some(target) = dom::document().ok().and_then(|d| d.get_element_by_id(&id)) {
                dom::smooth_scroll_to_element(&target, inner.anchor_offset);
            }
        }
        log::debug!("[{}] closed", inner.name);
    }

    /// Wire the close triggers: explicit controls, a click whose target is
    /// exactly `backdrop`, and Escape while the modal is open.
    pub fn bind_dismiss(
        &self,
        close_controls: &[Element],
        backdrop: Option<&Element>,
    ) -> Vec<Listener> {
        let mut listeners = Vec::new();

        for control in close_controls {
            let modal = self.clone();
            listeners.push(Listener::new(control, "click", move |ev| {
                ev.prevent_default();
                modal.close();
            }));
        }

        if let Some(backdrop) = backdrop {
            let modal = self.clone();
            let backdrop_el = backdrop.clone();
            listeners.push(Listener::new(backdrop, "click", move |ev| {
                if dom::is_same_node(ev.target(), &backdrop_el) {
                    modal.close();
                }
            }));
        }

        if let Ok(document) = dom::document() {
            let modal = self.clone();
            listeners.push(Listener::typed::<KeyboardEvent, _>(&document, "keydown", move |ev| {
                if ev.key() == "Escape" && modal.inner.state.borrow().accepts_escape() {
                    modal.close();
                }
            }));
        }

        listeners
    }

    /// Drop pending timers and give back the scroll lock
    pub fn teardown(&self) {
        let inner = &self.inner;
        inner.phase_timer.borrow_mut().take();
        inner.focus_timer.borrow_mut().take();
        *inner.state.borrow_mut() = ModalState::new();
        dom::remove_class(&inner.root, "active");
        if inner.holds_lock.replace(false) {
            inner.lock.release();
        }
    }
}
