//! Contact Page
//!
//! Contact form validation and simulated submission, the success modal with
//! its reference id, the message length meter and the property pins.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use chrono::Datelike;
use gloo_timers::callback::Timeout;
use rangyul_core::{
    reference_id, validate_contact, validate_field, CharCountLevel, ContactDraft, FieldId,
    FieldKind, FieldSpec, PhonePolicy,
};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlButtonElement, HtmlElement, HtmlFormElement};

use super::field_errors::{ErrorSlot, FieldErrorSink};
use super::modal::{Modal, OpenOptions, Presentation};
use crate::context::SiteContext;
use crate::dom::{self, DomResult, Listener};

const STATUS_LINGER_MS: u32 = 5000;
const STATUS_FADE_MS: u32 = 300;

/// One form control and how it is checked
struct ContactField {
    element: Element,
    spec: FieldSpec,
}

impl ContactField {
    /// Rules come from the markup: `type`, `required` and the preceding label
    fn from_element(element: Element) -> Option<Self> {
        let id = element.id();
        if id.is_empty() {
            return None;
        }
        let kind = match element.get_attribute("type").as_deref() {
            Some("email") => FieldKind::Email,
            Some("tel") => FieldKind::Phone(PhonePolicy::IndiaMobile),
            _ => FieldKind::Text,
        };
        let required = element.has_attribute("required");
        let mut spec = FieldSpec::new(FieldId::from_dom_id(&id), kind, required);
        if let Some(label) = element.previous_element_sibling().and_then(|l| l.text_content()) {
            spec = spec.with_label(&label);
        }
        Some(Self { element, spec })
    }

    fn value(&self) -> String {
        dom::field_value(&self.element)
    }
}

/// Status line under the submit button
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum StatusKind {
    Info,
    Success,
    Error,
}

impl StatusKind {
    fn class(&self) -> &'static str {
        match self {
            StatusKind::Info => "info",
            StatusKind::Success => "success",
            StatusKind::Error => "error",
        }
    }
}

struct ContactView {
    form: HtmlFormElement,
    submit: HtmlButtonElement,
    submit_text: Option<Element>,
    fields: Vec<ContactField>,
    message: Option<Element>,
    char_count: Option<HtmlElement>,
    reference: Option<Element>,
}

impl ContactView {
    fn resolve(document: &Document) -> DomResult<Self> {
        let form: HtmlFormElement = dom::require_id(document, "contactForm")?;
        let submit: HtmlButtonElement = dom::require_id(document, "submitBtn")?;
        let fields = dom::find_all::<Element>(&form, "input, textarea, select")
            .into_iter()
            .filter_map(ContactField::from_element)
            .collect();
        Ok(Self {
            submit_text: dom::find(&submit, ".btn-text"),
            message: dom::find_id(document, "message"),
            char_count: dom::find_id(document, "charCount"),
            reference: dom::find_id(document, "referenceId"),
            form,
            submit,
            fields,
        })
    }

    fn field_for(&self, element: &Element) -> Option<&ContactField> {
        self.fields.iter().find(|f| &f.element == element)
    }
}

struct ContactInner {
    ctx: SiteContext,
    document: Document,
    view: ContactView,
    errors: ErrorSlot,
    success: Option<Modal>,
    original_label: String,
    submitting: Cell<bool>,
    submit_timer: RefCell<Option<Timeout>>,
    success_timer: RefCell<Option<Timeout>>,
    status_fade_timer: RefCell<Option<Timeout>>,
    status_remove_timer: Rc<RefCell<Option<Timeout>>>,
}

impl ContactInner {
    /// Check one field and show the outcome
    fn check(&self, field: &ContactField) -> bool {
        match validate_field(&field.spec, &field.value()) {
            Ok(()) => {
                self.errors.mark_valid(&field.element);
                true
            }
            Err(e) => {
                self.errors.show(&field.element, &e.to_string());
                false
            }
        }
    }

    fn submit(self: &Rc<Self>) {
        if self.submitting.get() {
            return;
        }
        log::info!("Contact form submitted");

        let mut draft = ContactDraft::default();
        for field in &self.view.fields {
            draft.push(field.spec.clone(), &field.value());
        }
        let result = validate_contact(&draft);
        for field in &self.view.fields {
            match result.error_for(&field.spec.id) {
                Some(e) => self.errors.show(&field.element, &e.to_string()),
                None => self.errors.clear(&field.element),
            }
        }
        if !result.is_valid() {
            log::debug!("Contact form rejected: {} field errors", result.errors().len());
            self.show_status("Please fix the errors above.", StatusKind::Error);
            return;
        }

        self.set_loading(true);
        let weak = Rc::downgrade(self);
        let timer = Timeout::new(self.ctx.config.handoff.contact_submit_ms, move || {
            if let Some(this) = weak.upgrade() {
                this.on_submitted();
            }
        });
        *self.submit_timer.borrow_mut() = Some(timer);
    }

    fn on_submitted(self: &Rc<Self>) {
        log::info!("Contact form accepted");
        self.view.form.reset();
        for field in &self.view.fields {
            dom::remove_class(&field.element, "valid");
        }
        self.update_char_count();
        self.show_status(
            "Message sent successfully! We'll respond within 24 hours.",
            StatusKind::Success,
        );
        self.set_loading(false);

        let weak = Rc::downgrade(self);
        let timer = Timeout::new(self.ctx.config.handoff.success_modal_ms, move || {
            if let Some(this) = weak.upgrade() {
                this.show_success();
            }
        });
        *self.success_timer.borrow_mut() = Some(timer);
    }

    fn show_success(&self) {
        let Some(modal) = &self.success else {
            self.ctx.notifier.success("Thank you! Your message has been sent.");
            return;
        };
        self.refresh_reference();
        if modal.open(OpenOptions {
            focus: None,
            return_anchor: Some("contact-form-section".to_string()),
        }) {
            log::info!("Success modal displayed");
        }
    }

    fn set_loading(&self, loading: bool) {
        self.submitting.set(loading);
        self.view.submit.set_disabled(loading);
        dom::set_class(&self.view.submit, "loading", loading);
        if loading {
            match &self.view.submit_text {
                Some(text) => text.set_text_content(Some("Sending...")),
                None => self.view.submit.set_inner_html("Sending..."),
            }
            self.show_status("Processing your request...", StatusKind::Info);
        } else {
            match &self.view.submit_text {
                Some(text) => text.set_text_content(Some(&self.original_label)),
                None => self.view.submit.set_inner_html(&self.original_label),
            }
        }
    }

    /// Replace the status line; non-error lines fade out after a while
    fn show_status(&self, message: &str, kind: StatusKind) {
        self.status_fade_timer.borrow_mut().take();
        self.status_remove_timer.borrow_mut().take();
        remove_status(&self.document);

        let Ok(status) = self.document.create_element("div") else {
            return;
        };
        status.set_class_name(&format!("form-status {}", kind.class()));
        status.set_text_content(Some(message));
        if let Some(parent) = self.view.submit.parent_node() {
            let _ = parent.insert_before(&status, self.view.submit.next_sibling().as_ref());
        }
        if kind == StatusKind::Error {
            return;
        }

        let remove_slot = Rc::downgrade(&self.status_remove_timer);
        *self.status_fade_timer.borrow_mut() = Some(Timeout::new(STATUS_LINGER_MS, move || {
            if let Some(el) = status.dyn_ref::<HtmlElement>() {
                dom::set_style(el, "opacity", "0");
                dom::set_style(el, "transform", "translateY(-10px)");
            }
            let target = status.clone();
            if let Some(slot) = remove_slot.upgrade() {
                *slot.borrow_mut() = Some(Timeout::new(STATUS_FADE_MS, move || target.remove()));
            }
        }));
    }

    fn update_char_count(&self) {
        let (Some(message), Some(counter)) = (&self.view.message, &self.view.char_count) else {
            return;
        };
        let count = dom::field_value(message).chars().count();
        counter.set_text_content(Some(&count.to_string()));
        dom::set_style(counter, "color", CharCountLevel::for_count(count).color());
    }

    fn refresh_reference(&self) {
        if let Some(slot) = &self.view.reference {
            let year = self.ctx.today().year();
            let n = (js_sys::Math::random() * 1000.0) as u32;
            slot.set_text_content(Some(&reference_id(year, n)));
        }
    }
}

fn remove_status(document: &Document) {
    for status in dom::find_all::<Element>(document, ".form-status") {
        status.remove();
    }
}

pub struct ContactPage {
    inner: Rc<ContactInner>,
    _listeners: Vec<Listener>,
}

impl ContactPage {
    pub fn bind(ctx: &SiteContext, document: &Document) -> DomResult<Self> {
        let view = ContactView::resolve(document)?;
        let success = dom::find_id::<HtmlElement>(document, "successModal")
            .map(|root| Modal::new("contact-success", root, Presentation::Class, ctx));
        let inner = Rc::new(ContactInner {
            ctx: ctx.clone(),
            document: document.clone(),
            errors: ErrorSlot::new(document),
            original_label: match &view.submit_text {
                Some(text) => text.text_content().unwrap_or_default(),
                None => view.submit.inner_html(),
            },
            view,
            success,
            submitting: Cell::new(false),
            submit_timer: RefCell::new(None),
            success_timer: RefCell::new(None),
            status_fade_timer: RefCell::new(None),
            status_remove_timer: Rc::new(RefCell::new(None)),
        });

        let mut listeners = Vec::new();
        if let Some(modal) = &inner.success {
            let close: Vec<Element> = dom::find(modal.root(), "#closeModal").into_iter().collect();
            let backdrop: Element = modal.root().clone().into();
            listeners.extend(modal.bind_dismiss(&close, Some(&backdrop)));
        }

        let this = inner.clone();
        listeners.push(Listener::new(&inner.view.form, "submit", move |ev| {
            ev.prevent_default();
            this.submit();
        }));

        // live checks for required fields as the visitor types
        let this = inner.clone();
        listeners.push(Listener::new(&inner.view.form, "input", move |ev| {
            let Some(target) = ev.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
                return;
            };
            if let Some(field) = this.view.field_for(&target) {
                if field.spec.required {
                    this.check(field);
                }
            }
        }));

        for (index, field) in inner.view.fields.iter().enumerate() {
            let this = inner.clone();
            listeners.push(Listener::new(&field.element, "blur", move |_| {
                let field = &this.view.fields[index];
                if field.spec.required || !field.value().trim().is_empty() {
                    this.check(field);
                }
            }));

            let this = inner.clone();
            listeners.push(Listener::new(&field.element, "focus", move |_| {
                this.errors.clear(&this.view.fields[index].element);
            }));
        }

        if let Some(message) = &inner.view.message {
            let this = inner.clone();
            listeners.push(Listener::new(message, "input", move |_| this.update_char_count()));
        }
        inner.update_char_count();
        inner.refresh_reference();

        log::info!("Contact form bound with {} fields", inner.view.fields.len());
        Ok(Self {
            inner,
            _listeners: listeners,
        })
    }

    pub fn teardown(&self) {
        let inner = &self.inner;
        inner.submit_timer.borrow_mut().take();
        inner.success_timer.borrow_mut().take();
        inner.status_fade_timer.borrow_mut().take();
        inner.status_remove_timer.borrow_mut().take();
        if inner.submitting.get() {
            inner.set_loading(false);
        }
        if let Some(modal) = &inner.success {
            modal.teardown();
        }
    }
}

/// Contact page map pins: a click shows a short blurb about the property
pub struct PropertyPins {
    _listeners: Vec<Listener>,
}

impl PropertyPins {
    pub fn bind(ctx: &SiteContext, document: &Document) -> Option<Self> {
        let pins = dom::find_all::<Element>(document, ".property-pin[data-property]");
        if pins.is_empty() {
            return None;
        }
        let listeners = pins
            .into_iter()
            .map(|pin| {
                let ctx = ctx.clone();
                let el = pin.clone();
                Listener::new(&pin, "click", move |_| {
                    let name = el.get_attribute("data-property").unwrap_or_default();
                    log::info!("Property pin clicked: {}", name);
                    ctx.notifier.info(&ctx.config.property_blurb(&name));
                })
            })
            .collect::<Vec<_>>();
        log::info!("Bound {} property pins", listeners.len());
        Some(Self {
            _listeners: listeners,
        })
    }
}
