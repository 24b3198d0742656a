//! Quick Booking
//!
//! The group site's booking modal: opened from generic and offer-specific
//! triggers, validated with the India mobile policy, handed off as a
//! messaging deep link.

use std::rc::Rc;

use rangyul_core::{
    validate_booking, BookingFormDraft, FieldId, MessageTemplate, PhonePolicy, ValidationResult,
};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlButtonElement, HtmlElement, HtmlFormElement, KeyboardEvent};

use super::booking::{self, BookingDispatcher};
use super::field_errors::{FieldErrorSink, InlineMessage};
use super::modal::{Modal, OpenOptions, Presentation};
use crate::context::SiteContext;
use crate::dom::{self, DomResult, Listener};

/// Elements the quick booking flow needs, resolved once
struct QuickBookingView {
    root: HtmlElement,
    form: HtmlFormElement,
    overlay: Option<Element>,
    close: Vec<Element>,
    fields: Vec<(FieldId, Element)>,
    offer: Element,
    submit: HtmlButtonElement,
}

impl QuickBookingView {
    fn resolve(document: &Document) -> DomResult<Self> {
        let root: HtmlElement = dom::require_id(document, "bookingModal")?;
        let form: HtmlFormElement = dom::require_id(document, "quickBookingForm")?;
        let field = |id: FieldId, dom_id: &str| -> DomResult<(FieldId, Element)> {
            Ok((id, dom::require_id(document, dom_id)?))
        };
        let fields = vec![
            field(FieldId::Name, "booking-name")?,
            field(FieldId::Phone, "booking-phone")?,
            field(FieldId::Email, "booking-email")?,
            field(FieldId::CheckIn, "booking-checkin")?,
            field(FieldId::CheckOut, "booking-checkout")?,
            field(FieldId::Guests, "booking-guests")?,
            field(FieldId::Property, "booking-property")?,
            field(FieldId::Message, "booking-message")?,
        ];
        Ok(Self {
            overlay: dom::find(&root, ".modal-overlay"),
            close: dom::find_all(&root, ".modal-close"),
            offer: dom::require_id(document, "selected-offer")?,
            submit: dom::require(&form, ".booking-submit-btn")?,
            root,
            form,
            fields,
        })
    }

    fn field(&self, id: &FieldId) -> Option<&Element> {
        self.fields.iter().find(|(f, _)| f == id).map(|(_, el)| el)
    }

    fn draft(&self) -> BookingFormDraft {
        let values = booking::read_fields(&self.fields);
        let v = |id| booking::value_of(&values, &id);
        BookingFormDraft::from_raw(
            v(FieldId::Name),
            v(FieldId::Phone),
            v(FieldId::Email),
            v(FieldId::CheckIn),
            v(FieldId::CheckOut),
            v(FieldId::Guests),
            v(FieldId::Property),
            v(FieldId::Message),
            &dom::field_value(&self.offer),
        )
    }
}

struct QuickBookingInner {
    ctx: SiteContext,
    view: QuickBookingView,
    modal: Modal,
    dispatcher: BookingDispatcher,
    errors: InlineMessage,
}

impl QuickBookingInner {
    fn open(&self, trigger: &Element, offer: Option<String>) {
        dom::set_field_value(&self.view.offer, offer.as_deref().unwrap_or(""));

        // check-in today, check-out tomorrow; the min attribute is only a hint
        let today = self.ctx.today();
        let tomorrow = booking::next_day(today);
        if let Some(check_in) = self.view.field(&FieldId::CheckIn) {
            dom::set_field_value(check_in, &booking::input_date(today));
            booking::set_min_date(check_in, today);
        }
        if let Some(check_out) = self.view.field(&FieldId::CheckOut) {
            dom::set_field_value(check_out, &booking::input_date(tomorrow));
            booking::set_min_date(check_out, tomorrow);
        }

        let return_anchor = trigger
            .closest(".property-card[id]")
            .ok()
            .flatten()
            .map(|card| card.id());
        let focus = self
            .view
            .field(&FieldId::Name)
            .and_then(|el| el.dyn_ref::<HtmlElement>().cloned());

        if self.modal.open(OpenOptions { focus, return_anchor }) {
            log::info!("Quick booking opened (offer: {})", offer.as_deref().unwrap_or("none"));
        }
    }

    fn validate(&self) -> (BookingFormDraft, ValidationResult) {
        let draft = self.view.draft();
        let result = validate_booking(&draft, PhonePolicy::IndiaMobile, self.ctx.today());
        (draft, result)
    }

    fn submit(self: &Rc<Self>) {
        if self.dispatcher.is_busy() {
            return;
        }
        let (draft, result) = self.validate();
        self.errors.apply(&self.view.fields, &result);
        if !result.is_valid() {
            log::debug!("Quick booking rejected: {} field errors", result.errors().len());
            if let Some(summary) = result.summary() {
                self.ctx.notifier.error(summary);
            }
            return;
        }

        let template = MessageTemplate::QuickBooking {
            brand: self.ctx.config.brand.clone(),
            footer: self.ctx.config.quick_booking_footer.clone(),
        };
        let message = template.compose(&draft);
        let this = Rc::downgrade(self);
        self.dispatcher.dispatch(&message, move || {
            if let Some(this) = this.upgrade() {
                this.view.form.reset();
                dom::set_field_value(&this.view.offer, "");
                this.modal.close();
                this.ctx.notifier.success(
                    "Redirecting to WhatsApp. Our team will confirm your booking shortly.",
                );
            }
        });
    }
}

pub struct QuickBooking {
    inner: Rc<QuickBookingInner>,
    _listeners: Vec<Listener>,
}

impl QuickBooking {
    pub fn bind(ctx: &SiteContext, document: &Document) -> DomResult<Self> {
        let view = QuickBookingView::resolve(document)?;
        let modal = Modal::new("quick-booking", view.root.clone(), Presentation::Class, ctx);
        let dispatcher =
            BookingDispatcher::new(&ctx.config.messaging, &ctx.config.handoff, view.submit.clone());
        let inner = Rc::new(QuickBookingInner {
            ctx: ctx.clone(),
            errors: InlineMessage::new(document),
            view,
            modal,
            dispatcher,
        });

        let mut listeners = inner
            .modal
            .bind_dismiss(&inner.view.close, inner.view.overlay.as_ref());

        let triggers =
            dom::find_all::<Element>(document, ".quick-book-trigger, .hero-quick-book-btn");
        for trigger in triggers {
            let this = inner.clone();
            let el = trigger.clone();
            listeners.push(Listener::new(&trigger, "click", move |ev| {
                ev.prevent_default();
                ev.stop_propagation();
                this.open(&el, None);
            }));
        }

        for trigger in dom::find_all::<Element>(document, ".offer-book-trigger") {
            let this = inner.clone();
            let el = trigger.clone();
            listeners.push(Listener::new(&trigger, "click", move |ev| {
                ev.prevent_default();
                ev.stop_propagation();
                this.open(&el, el.get_attribute("data-offer"));
            }));
        }

        listeners.extend(bind_offer_cards(document));

        let this = inner.clone();
        listeners.push(Listener::new(&inner.view.form, "submit", move |ev| {
            ev.prevent_default();
            this.submit();
        }));

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

        log::info!("Quick booking bound");
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

/// A click or Enter/Space anywhere on a premium offer card acts as its
/// booking button, except on links and buttons inside the card.
fn bind_offer_cards(document: &Document) -> Vec<Listener> {
    let mut listeners = Vec::new();
    for card in dom::find_all::<Element>(document, ".premium-offer-card") {
        let Some(button) = dom::find::<HtmlElement>(&card, ".offer-book-trigger") else {
            continue;
        };

        let click_button = button.clone();
        listeners.push(Listener::new(&card, "click", move |ev| {
            let on_control = ev
                .target()
                .and_then(|t| t.dyn_into::<Element>().ok())
                .and_then(|t| t.closest("a, button").ok().flatten())
                .is_some();
            if !on_control {
                click_button.click();
            }
        }));

        listeners.push(Listener::typed::<KeyboardEvent, _>(&card, "keydown", move |ev| {
            if ev.key() == "Enter" || ev.key() == " " {
                ev.prevent_default();
                button.click();
            }
        }));
    }
    listeners
}
