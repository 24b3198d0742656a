//! UI Components
//!
//! Leptos components mounted next to the server-rendered markup.

mod notification_host;

pub use notification_host::NotificationHost;
