//! Inline Field Errors
//!
//! Two markup conventions for showing a field's validation message.

use rangyul_core::{FieldId, ValidationResult};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

use crate::dom;

const ERROR_BORDER: &str = "#ff6b6b";

/// Where a field's message goes
pub trait FieldErrorSink {
    fn show(&self, field: &Element, message: &str);
    fn clear(&self, field: &Element);

    /// Show or clear every listed field from one validation pass
    fn apply(&self, fields: &[(FieldId, Element)], result: &ValidationResult) {
        for (id, field) in fields {
            match result.error_for(id) {
                Some(error) => self.show(field, &error.to_string()),
                None => self.clear(field),
            }
        }
    }

    /// Update a single field from a validation pass
    fn apply_one(&self, id: &FieldId, field: &Element, result: &ValidationResult) {
        match result.error_for(id) {
            Some(error) => self.show(field, &error.to_string()),
            None => self.clear(field),
        }
    }
}

/// Appends a `.error-message` block to the field's parent (booking forms)
pub struct InlineMessage {
    document: Document,
}

impl InlineMessage {
    pub fn new(document: &Document) -> Self {
        Self {
            document: document.clone(),
        }
    }
}

impl FieldErrorSink for InlineMessage {
    fn show(&self, field: &Element, message: &str) {
        self.clear(field);
        dom::add_class(field, "error");
        if let Some(input) = field.dyn_ref::<HtmlElement>() {
            dom::set_style(input, "border-color", ERROR_BORDER);
        }
        let Some(parent) = field.parent_element() else {
            return;
        };
        let Ok(block) = self.document.create_element("div") else {
            return;
        };
        block.set_class_name("error-message");
        if let Ok(icon) = self.document.create_element("i") {
            icon.set_class_name("fas fa-exclamation-circle");
            let _ = block.append_child(&icon);
        }
        if let Ok(text) = self.document.create_element("span") {
            text.set_text_content(Some(message));
            let _ = block.append_child(&text);
        }
        let _ = parent.append_child(&block);
    }

    fn clear(&self, field: &Element) {
        dom::remove_class(field, "error");
        if let Some(input) = field.dyn_ref::<HtmlElement>() {
            dom::clear_style(input, "border-color");
        }
        if let Some(parent) = field.parent_element() {
            for block in dom::find_all::<Element>(&parent, ".error-message") {
                block.remove();
            }
        }
    }
}

/// Writes into a pre-rendered `#<id>Error` slot (contact form)
pub struct ErrorSlot {
    document: Document,
}

impl ErrorSlot {
    pub fn new(document: &Document) -> Self {
        Self {
            document: document.clone(),
        }
    }

    fn slot(&self, field: &Element) -> Option<Element> {
        let id = field.id();
        if id.is_empty() {
            return None;
        }
        self.document.get_element_by_id(&format!("{}Error", id))
    }

    /// Passed validation with a value in it
    pub fn mark_valid(&self, field: &Element) {
        self.clear(field);
        dom::add_class(field, "valid");
    }
}

impl FieldErrorSink for ErrorSlot {
    fn show(&self, field: &Element, message: &str) {
        dom::add_class(field, "error");
        dom::remove_class(field, "valid");
        if let Some(slot) = self.slot(field) {
            slot.set_text_content(Some(message));
            dom::add_class(&slot, "show");
        }
    }

    fn clear(&self, field: &Element) {
        dom::remove_class(field, "error");
        if let Some(slot) = self.slot(field) {
            slot.set_text_content(Some(""));
            dom::remove_class(&slot, "show");
        }
    }
}
