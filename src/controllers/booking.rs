//! Booking Handoff
//!
//! Shared by both booking forms: turns a validated draft into a messaging
//! deep link, runs the submit button through its busy labels and opens the
//! link in a new browsing context. There is no delivery confirmation.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use chrono::{Days, NaiveDate};
use gloo_timers::callback::Timeout;
use rangyul_core::{whatsapp_url, BookingMessage, FieldId, HandoffDelays, MessagingEndpoint};
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlButtonElement, HtmlInputElement};

use crate::dom;

const BUSY_LABEL: &str = r#"<i class="fas fa-spinner fa-spin"></i> Redirecting..."#;
const DONE_LABEL: &str = r#"<i class="fas fa-check"></i> Redirected Successfully!"#;

/// Runs one handoff at a time for a single submit button
#[derive(Clone)]
pub struct BookingDispatcher {
    inner: Rc<DispatcherInner>,
}

struct DispatcherInner {
    endpoint: MessagingEndpoint,
    delays: HandoffDelays,
    submit: HtmlButtonElement,
    original_label: String,
    busy: Cell<bool>,
    redirect_timer: RefCell<Option<Timeout>>,
    restore_timer: RefCell<Option<Timeout>>,
}

impl BookingDispatcher {
    pub fn new(
        endpoint: &MessagingEndpoint,
        delays: &HandoffDelays,
        submit: HtmlButtonElement,
    ) -> Self {
        let original_label = submit.inner_html();
        Self {
            inner: Rc::new(DispatcherInner {
                endpoint: endpoint.clone(),
                delays: delays.clone(),
                submit,
                original_label,
                busy: Cell::new(false),
                redirect_timer: RefCell::new(None),
                restore_timer: RefCell::new(None),
            }),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.inner.busy.get()
    }

    /// Start the handoff. `finish` runs once the button is restored, whether
    /// or not the new window actually opened. Returns false while a previous
    /// handoff is still running.
    pub fn dispatch<F>(&self, message: &BookingMessage, finish: F) -> bool
    where
        F: FnOnce() + 'static,
    {
        let inner = &self.inner;
        if inner.busy.replace(true) {
            return false;
        }
        let url = whatsapp_url(&inner.endpoint.host, &inner.endpoint.recipient, message);
        log::info!("Handing booking off to {}", inner.endpoint.host);

        inner.submit.set_disabled(true);
        inner.submit.set_inner_html(BUSY_LABEL);

        let weak = Rc::downgrade(inner);
        *inner.redirect_timer.borrow_mut() = Some(Timeout::new(inner.delays.redirect_ms, move || {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            open_new_context(&url);
            inner.submit.set_inner_html(DONE_LABEL);

            let weak = Rc::downgrade(&inner);
            *inner.restore_timer.borrow_mut() = Some(Timeout::new(inner.delays.restore_ms, move || {
                if let Some(inner) = weak.upgrade() {
                    inner.restore();
                    finish();
                }
            }));
        }));
        true
    }

    /// Cancel a pending handoff and put the button back
    pub fn teardown(&self) {
        let inner = &self.inner;
        inner.redirect_timer.borrow_mut().take();
        inner.restore_timer.borrow_mut().take();
        if inner.busy.get() {
            inner.restore();
        }
    }
}

impl DispatcherInner {
    fn restore(&self) {
        self.submit.set_inner_html(&self.original_label);
        self.submit.set_disabled(false);
        self.busy.set(false);
    }
}

fn open_new_context(url: &str) {
    let opened = dom::window().and_then(|w| Ok(w.open_with_url_and_target(url, "_blank")?));
    match opened {
        Ok(Some(_)) => log::debug!("Messaging link opened"),
        Ok(None) => log::warn!("Messaging link was blocked by the browser"),
        Err(e) => log::warn!("Could not open messaging link: {}", e),
    }
}

// ========================
// Form helpers
// ========================

/// Current value of every listed field
pub fn read_fields(fields: &[(FieldId, Element)]) -> Vec<(FieldId, String)> {
    fields
        .iter()
        .map(|(id, el)| (id.clone(), dom::field_value(el)))
        .collect()
}

pub fn value_of<'a>(values: &'a [(FieldId, String)], id: &FieldId) -> &'a str {
    values
        .iter()
        .find(|(field, _)| field == id)
        .map(|(_, v)| v.as_str())
        .unwrap_or("")
}

pub fn input_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn next_day(date: NaiveDate) -> NaiveDate {
    date.checked_add_days(Days::new(1)).unwrap_or(date)
}

/// Set the `min` attribute of a date input
pub fn set_min_date(field: &Element, date: NaiveDate) {
    if let Some(input) = field.dyn_ref::<HtmlInputElement>() {
        input.set_min(&input_date(date));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_date_format() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 5).unwrap();
        assert_eq!(input_date(date), "2024-02-05");
    }

    #[test]
    fn test_next_day_crosses_month() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(next_day(date), NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    }

    #[test]
    fn test_value_of_missing_field_is_empty() {
        let values = vec![(FieldId::Name, "Asha".to_string())];
        assert_eq!(value_of(&values, &FieldId::Name), "Asha");
        assert_eq!(value_of(&values, &FieldId::Phone), "");
    }
}
