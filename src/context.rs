//! Site Context
//!
//! Shared handles every controller receives at construction.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use rangyul_core::{ScrollLock, SiteConfig};

use crate::dom;
use crate::store::{
    store_clear_notifications, store_has_notification, store_push_notification,
    store_remove_notification, NotificationKind, PageStore,
};

/// Handles shared by all controllers on a page
#[derive(Clone)]
pub struct SiteContext {
    pub config: Rc<SiteConfig>,
    pub scroll_lock: BodyScrollLock,
    pub notifier: Notifier,
}

impl SiteContext {
    pub fn new(config: SiteConfig, store: PageStore) -> Self {
        let toast_ms = config.handoff.toast_ms;
        Self {
            config: Rc::new(config),
            scroll_lock: BodyScrollLock::default(),
            notifier: Notifier {
                store,
                toast_ms,
                timers: Rc::new(RefCell::new(PendingToasts::default())),
            },
        }
    }

    /// Today's date in the visitor's time zone, read at call time
    pub fn today(&self) -> chrono::NaiveDate {
        chrono::Local::now().date_naive()
    }
}

/// Page scroll lock shared by every overlay surface.
///
/// Only the 0->1 and 1->0 edges touch `body.style.overflow`.
#[derive(Clone, Default)]
pub struct BodyScrollLock {
    lock: Rc<RefCell<ScrollLock>>,
}

impl BodyScrollLock {
    pub fn acquire(&self) {
        if self.lock.borrow_mut().acquire() {
            apply_overflow(true);
        }
    }

    pub fn release(&self) {
        if self.lock.borrow_mut().release() {
            apply_overflow(false);
        }
    }

    pub fn is_locked(&self) -> bool {
        self.lock.borrow().is_locked()
    }
}

fn apply_overflow(locked: bool) {
    if let Ok(body) = dom::body() {
        if locked {
            dom::set_style(&body, "overflow", "hidden");
        } else {
            dom::clear_style(&body, "overflow");
        }
    }
}

/// Removal timers for toasts still on screen, keyed by toast id.
///
/// A timer never drops its own handle. Entries whose toast is gone are
/// pruned on the next push instead.
struct PendingToasts<H> {
    entries: Vec<(u32, H)>,
}

impl<H> Default for PendingToasts<H> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<H> PendingToasts<H> {
    fn push(&mut self, id: u32, handle: H, is_live: impl Fn(u32) -> bool) {
        self.entries.retain(|(toast, _)| is_live(*toast));
        self.entries.push((id, handle));
    }

    fn clear(&mut self) {
        self.entries.clear();
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Pushes toasts into the page store and removes them after a while
#[derive(Clone)]
pub struct Notifier {
    store: PageStore,
    toast_ms: u32,
    timers: Rc<RefCell<PendingToasts<Timeout>>>,
}

impl Notifier {
    pub fn notify(&self, message: &str, kind: NotificationKind) {
        let id = store_push_notification(&self.store, message, kind);
        let store = self.store;
        let timer = Timeout::new(self.toast_ms, move || store_remove_notification(&store, id));
        self.timers
            .borrow_mut()
            .push(id, timer, |toast| store_has_notification(&self.store, toast));
    }

    /// Cancel pending removals and take every toast off the screen
    pub fn clear(&self) {
        self.timers.borrow_mut().clear();
        store_clear_notifications(&self.store);
    }

    pub fn success(&self, message: &str) {
        self.notify(message, NotificationKind::Success);
    }

    pub fn error(&self, message: &str) {
        self.notify(message, NotificationKind::Error);
    }

    pub fn info(&self, message: &str) {
        self.notify(message, NotificationKind::Info);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    /// Stand-in timer handle that counts live instances
    struct Handle(Rc<Cell<u32>>);

    impl Handle {
        fn new(live: &Rc<Cell<u32>>) -> Self {
            live.set(live.get() + 1);
            Handle(live.clone())
        }
    }

    impl Drop for Handle {
        fn drop(&mut self) {
            self.0.set(self.0.get() - 1);
        }
    }

    #[test]
    fn test_expired_toast_handles_are_pruned_on_push() {
        let live = Rc::new(Cell::new(0));
        let mut pending = PendingToasts::default();
        pending.push(1, Handle::new(&live), |_| true);
        pending.push(2, Handle::new(&live), |_| true);
        assert_eq!(live.get(), 2);

        // toast 1 has been removed from the screen by its timer
        pending.push(3, Handle::new(&live), |id| id != 1);
        assert_eq!(pending.len(), 2);
        assert_eq!(live.get(), 2);
    }

    #[test]
    fn test_clear_drops_every_handle() {
        let live = Rc::new(Cell::new(0));
        let mut pending = PendingToasts::default();
        for id in 0..5 {
            pending.push(id, Handle::new(&live), |_| true);
        }
        pending.clear();
        assert_eq!(live.get(), 0);
        assert_eq!(pending.len(), 0);
    }
}
