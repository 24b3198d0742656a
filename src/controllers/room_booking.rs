//! Room Booking
//!
//! Single-hotel booking modal opened from a room card's "Book now" button.
//! Uses the plain ten-digit phone rule and a message with nights and price.

use std::cell::RefCell;
use std::rc::Rc;

use rangyul_core::{
    parse_input_date, validate_booking, BookingFormDraft, DateRangeReason, FieldId,
    MessageTemplate, PhonePolicy, ValidationError, ValidationResult,
};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlButtonElement, HtmlElement, HtmlFormElement};

use super::booking::{self, BookingDispatcher};
use super::field_errors::{FieldErrorSink, InlineMessage};
use super::modal::{Modal, OpenOptions, Presentation};
use crate::context::SiteContext;
use crate::dom::{self, DomResult, Listener};

struct RoomBookingView {
    root: HtmlElement,
    form: HtmlFormElement,
    close: Vec<Element>,
    fields: Vec<(FieldId, Element)>,
    room_name: Option<Element>,
    summary_room: Option<Element>,
    summary_price: Option<Element>,
    submit: HtmlButtonElement,
}

impl RoomBookingView {
    fn resolve(document: &Document) -> DomResult<Self> {
        let root: HtmlElement = dom::require_id(document, "bookingModal")?;
        let form: HtmlFormElement = dom::require_id(document, "bookingForm")?;

        let mut fields = vec![
            (FieldId::Name, dom::require_id(document, "guestName")?),
            (FieldId::Phone, dom::require_id(document, "guestPhone")?),
            (FieldId::CheckIn, dom::require_id(document, "checkInDate")?),
            (FieldId::CheckOut, dom::require_id(document, "checkOutDate")?),
            (FieldId::Guests, dom::require_id(document, "guestCount")?),
        ];
        if let Some(email) = dom::find_id::<Element>(document, "guestEmail") {
            fields.push((FieldId::Email, email));
        }

        let close = ["closeModal", "cancelBooking"]
            .iter()
            .filter_map(|id| dom::find_id::<Element>(document, id))
            .collect();

        Ok(Self {
            close,
            room_name: dom::find_id(document, "selectedRoomName"),
            summary_room: dom::find_id(document, "summaryRoom"),
            summary_price: dom::find_id(document, "summaryPrice"),
            submit: dom::require(&form, "[type=submit]")?,
            root,
            form,
            fields,
        })
    }

    fn field(&self, id: &FieldId) -> Option<&Element> {
        self.fields.iter().find(|(f, _)| f == id).map(|(_, el)| el)
    }
}

/// Room and price of the card that opened the modal
#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct SelectedRoom {
    name: String,
    price: String,
}

impl SelectedRoom {
    /// From a button's `data-room` and `data-price`. A button without a room
    /// name cannot produce a bookable request.
    fn from_attributes(room: Option<String>, price: Option<String>) -> Option<Self> {
        let name = room.map(|r| r.trim().to_string()).filter(|r| !r.is_empty())?;
        Some(Self {
            name,
            price: price.map(|p| p.trim().to_string()).unwrap_or_default(),
        })
    }
}

struct RoomBookingInner {
    ctx: SiteContext,
    view: RoomBookingView,
    modal: Modal,
    dispatcher: BookingDispatcher,
    errors: InlineMessage,
    room: RefCell<SelectedRoom>,
}

impl RoomBookingInner {
    fn open(&self, room: SelectedRoom) {
        for slot in [&self.view.room_name, &self.view.summary_room].into_iter().flatten() {
            slot.set_text_content(Some(&room.name));
        }
        if let Some(slot) = &self.view.summary_price {
            slot.set_text_content(Some(&room.price));
        }
        log::info!("Room booking opened for {}", room.name);
        *self.room.borrow_mut() = room;

        self.clear_errors();
        self.view.form.reset();
        self.seed_min_dates();

        let focus = self
            .view
            .field(&FieldId::Name)
            .and_then(|el| el.dyn_ref::<HtmlElement>().cloned());
        self.modal.open(OpenOptions {
            focus,
            return_anchor: None,
        });
    }

    fn seed_min_dates(&self) {
        let today = self.ctx.today();
        if let Some(check_in) = self.view.field(&FieldId::CheckIn) {
            booking::set_min_date(check_in, today);
        }
        if let Some(check_out) = self.view.field(&FieldId::CheckOut) {
            booking::set_min_date(check_out, booking::next_day(today));
        }
    }

    fn clear_errors(&self) {
        for (_, field) in &self.view.fields {
            self.errors.clear(field);
        }
    }

    fn close(&self) {
        self.clear_errors();
        self.modal.close();
    }

    fn draft(&self) -> BookingFormDraft {
        let values = booking::read_fields(&self.view.fields);
        let v = |id| booking::value_of(&values, &id);
        let room = self.room.borrow();
        BookingFormDraft::from_raw(
            v(FieldId::Name),
            v(FieldId::Phone),
            v(FieldId::Email),
            v(FieldId::CheckIn),
            v(FieldId::CheckOut),
            v(FieldId::Guests),
            &room.name,
            "",
            "",
        )
    }

    fn validate(&self) -> (BookingFormDraft, ValidationResult) {
        let draft = self.draft();
        let result = validate_booking(&draft, PhonePolicy::TenDigit, self.ctx.today());
        (draft, result)
    }

    fn submit(self: &Rc<Self>) {
        if self.dispatcher.is_busy() {
            return;
        }
        let (draft, result) = self.validate();
        self.errors.apply(&self.view.fields, &result);
        if !result.is_valid() {
            log::debug!("Room booking rejected: {} field errors", result.errors().len());
            // errors with no input on the page would otherwise go unseen
            let unshown = result.errors().iter().find(|e| self.view.field(e.field()).is_none());
            if let Some(error) = unshown {
                self.ctx.notifier.error(&error.to_string());
            }
            return;
        }

        let template = MessageTemplate::RoomBooking {
            hotel: self.ctx.config.hotel_name.clone(),
            price: self.room.borrow().price.clone(),
        };
        let message = template.compose(&draft);
        let this = Rc::downgrade(self);
        self.dispatcher.dispatch(&message, move || {
            if let Some(this) = this.upgrade() {
                this.close();
                this.ctx
                    .notifier
                    .success("Booking request sent. Please complete it in WhatsApp.");
            }
        });
    }

    /// Check-in moved: push the check-out minimum and drop a check-out that
    /// is no longer after it
    fn on_check_in_change(&self) {
        let (Some(check_in_el), Some(check_out_el)) =
            (self.view.field(&FieldId::CheckIn), self.view.field(&FieldId::CheckOut))
        else {
            return;
        };
        let Some(check_in) = parse_input_date(&dom::field_value(check_in_el)) else {
            return;
        };
        booking::set_min_date(check_out_el, booking::next_day(check_in));
        if let Some(check_out) = parse_input_date(&dom::field_value(check_out_el)) {
            if check_out <= check_in {
                dom::set_field_value(check_out_el, "");
            }
        }
    }

    /// Check-out moved: only the ordering is re-checked here
    fn on_check_out_change(&self) {
        let (Some(check_in_el), Some(check_out_el)) =
            (self.view.field(&FieldId::CheckIn), self.view.field(&FieldId::CheckOut))
        else {
            return;
        };
        let check_in = parse_input_date(&dom::field_value(check_in_el));
        let check_out = parse_input_date(&dom::field_value(check_out_el));
        match (check_in, check_out) {
            (Some(a), Some(b)) if b <= a => {
                let error = ValidationError::DateRangeInvalid {
                    field: FieldId::CheckOut,
                    reason: DateRangeReason::CheckOutNotAfterCheckIn,
                };
                self.errors.show(check_out_el, &error.to_string());
            }
            _ => self.errors.clear(check_out_el),
        }
    }
}

pub struct RoomBooking {
    inner: Rc<RoomBookingInner>,
    _listeners: Vec<Listener>,
}

impl RoomBooking {
    pub fn bind(ctx: &SiteContext, document: &Document) -> DomResult<Self> {
        let view = RoomBookingView::resolve(document)?;
        let modal = Modal::new("room-booking", view.root.clone(), Presentation::DisplayFlex, ctx);
        let dispatcher =
            BookingDispatcher::new(&ctx.config.messaging, &ctx.config.handoff, view.submit.clone());
        let inner = Rc::new(RoomBookingInner {
            ctx: ctx.clone(),
            errors: InlineMessage::new(document),
            room: RefCell::new(SelectedRoom::default()),
            view,
            modal,
            dispatcher,
        });

        // close controls also clear errors, so they bypass bind_dismiss
        let root: Element = inner.view.root.clone().into();
        let mut listeners = inner.modal.bind_dismiss(&[], None);
        for control in &inner.view.close {
            let this = inner.clone();
            listeners.push(Listener::new(control, "click", move |ev| {
                ev.prevent_default();
                this.close();
            }));
        }
        let this = inner.clone();
        let backdrop = root.clone();
        listeners.push(Listener::new(&root, "click", move |ev| {
            if dom::is_same_node(ev.target(), &backdrop) {
                this.close();
            }
        }));

        for button in dom::find_all::<Element>(document, ".book-now-btn") {
            let Some(room) = SelectedRoom::from_attributes(
                button.get_attribute("data-room"),
                button.get_attribute("data-price"),
            ) else {
                log::warn!("Book button without data-room skipped");
                continue;
            };
            let this = inner.clone();
            listeners.push(Listener::new(&button, "click", move |ev| {
                ev.prevent_default();
                ev.stop_propagation();
                this.open(room.clone());
            }));
        }

        let this = inner.clone();
        listeners.push(Listener::new(&inner.view.form, "submit", move |ev| {
            ev.prevent_default();
            this.submit();
        }));

        if let Some(check_in) = inner.view.field(&FieldId::CheckIn) {
            let this = inner.clone();
            listeners.push(Listener::new(check_in, "change", move |_| this.on_check_in_change()));
        }
        if let Some(check_out) = inner.view.field(&FieldId::CheckOut) {
            let this = inner.clone();
            listeners.push(Listener::new(check_out, "change", move |_| this.on_check_out_change()));
        }

        for (id, field) in &inner.view.fields {
            let this = inner.clone();
            let blur_id = id.clone();
            let blur_field = field.clone();
            listeners.push(Listener::new(field, "blur", move |_| {
                let (_, result) = this.validate();
                this.errors.apply_one(&blur_id, &blur_field, &result);
            }));

            let this = inner.clone();
            let focus_field = field.clone();
            listeners.push(Listener::new(field, "focus", move |_| {
                this.errors.clear(&focus_field);
            }));
        }

        inner.seed_min_dates();
        log::info!("Room booking bound");
        Ok(Self {
            inner,
            _listeners: listeners,
        })
    }

    pub fn teardown(&self) {
        self.inner.dispatcher.teardown();
        self.inner.modal.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_from_button_attributes() {
        let room =
            SelectedRoom::from_attributes(Some(" Deluxe Room ".into()), Some("₹4,500".into()));
        assert_eq!(
            room,
            Some(SelectedRoom {
                name: "Deluxe Room".into(),
                price: "₹4,500".into(),
            })
        );
    }

    #[test]
    fn test_button_without_room_is_not_bookable() {
        assert_eq!(SelectedRoom::from_attributes(None, Some("₹4,500".into())), None);
        assert_eq!(SelectedRoom::from_attributes(Some("  ".into()), None), None);
    }

    #[test]
    fn test_missing_price_is_empty() {
        let room = SelectedRoom::from_attributes(Some("Suite".into()), None);
        assert_eq!(room.map(|r| r.price), Some(String::new()));
    }
}
