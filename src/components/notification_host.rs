//! Notification Host Component
//!
//! Fixed-position stack of toasts rendered from the page store.

use leptos::prelude::*;

use crate::store::{store_remove_notification, PageStateStoreFields, PageStore};

/// Renders every toast in the store; each can be dismissed early
#[component]
pub fn NotificationHost(store: PageStore) -> impl IntoView {
    view! {
        <div class="booking-notifications" aria-live="polite">
            <For
                each=move || store.notifications().get()
                key=|notification| notification.id
                children=move |notification| {
                    let id = notification.id;
                    view! {
                        <div
                            class=format!("booking-notification {}", notification.kind.class())
                            role="status"
                        >
                            <i class=format!("fas fa-{}", notification.kind.icon())></i>
                            <span>{notification.message}</span>
                            <button
                                class="notification-dismiss"
                                aria-label="Dismiss"
                                on:click=move |_| store_remove_notification(&store, id)
                            >
                                "×"
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}
