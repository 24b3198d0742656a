//! Page State Store
//!
//! Uses Leptos reactive_stores for the little state that is rendered by
//! Leptos rather than by the server markup.

use leptos::prelude::*;
use reactive_stores::Store;

/// Toast severity, also the CSS modifier class
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
    Info,
}

impl NotificationKind {
    pub fn class(&self) -> &'static str {
        match self {
            NotificationKind::Success => "success",
            NotificationKind::Error => "error",
            NotificationKind::Info => "info",
        }
    }

    /// Font Awesome icon name
    pub fn icon(&self) -> &'static str {
        match self {
            NotificationKind::Success => "check-circle",
            NotificationKind::Error => "exclamation-circle",
            NotificationKind::Info => "info-circle",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Notification {
    pub id: u32,
    pub message: String,
    pub kind: NotificationKind,
}

/// Page-level state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct PageState {
    /// Toasts currently on screen, oldest first
    pub notifications: Vec<Notification>,
    /// Id for the next toast
    pub next_notification_id: u32,
}

impl PageState {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Type alias for the store
pub type PageStore = Store<PageState>;

// ========================
// Store Helper Functions
// ========================

/// Push a toast and return its id
pub fn store_push_notification(store: &PageStore, message: &str, kind: NotificationKind) -> u32 {
    let id = store.next_notification_id().get_untracked();
    store.next_notification_id().set(id.wrapping_add(1));
    store.notifications().write().push(Notification {
        id,
        message: message.to_string(),
        kind,
    });
    id
}

/// Remove a toast by id
pub fn store_remove_notification(store: &PageStore, id: u32) {
    store.notifications().write().retain(|n| n.id != id);
}

/// Whether a toast is still on screen
pub fn store_has_notification(store: &PageStore, id: u32) -> bool {
    store
        .notifications()
        .with_untracked(|list| list.iter().any(|n| n.id == id))
}

/// Remove every toast
pub fn store_clear_notifications(store: &PageStore) {
    store.notifications().write().clear();
}
