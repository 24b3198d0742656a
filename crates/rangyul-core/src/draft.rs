//! Form Drafts
//!
//! In-progress, unsubmitted form contents as read from the page.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Logical identity of a form field. The DOM layer maps these onto
/// element ids, which differ between the sites' forms.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldId {
    Name,
    Phone,
    Email,
    CheckIn,
    CheckOut,
    Guests,
    Property,
    Message,
    /// Any other field, keyed by its element id
    Other(String),
}

impl FieldId {
    /// Human label used in "is required" messages
    pub fn label(&self) -> &str {
        match self {
            FieldId::Name => "Name",
            FieldId::Phone => "Phone number",
            FieldId::Email => "Email",
            FieldId::CheckIn => "Check-in date",
            FieldId::CheckOut => "Check-out date",
            FieldId::Guests => "Number of guests",
            FieldId::Property => "Property",
            FieldId::Message => "Message",
            FieldId::Other(id) => id,
        }
    }

    /// Map the contact page's element ids onto logical fields
    pub fn from_dom_id(id: &str) -> Self {
        match id {
            "name" | "fullName" => FieldId::Name,
            "phone" => FieldId::Phone,
            "email" => FieldId::Email,
            "message" => FieldId::Message,
            other => FieldId::Other(other.to_string()),
        }
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Contents of a reservation-request form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookingFormDraft {
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,
    pub guest_count: Option<u32>,
    pub property: String,
    pub message: Option<String>,
    pub selected_offer: Option<String>,
}

impl BookingFormDraft {
    /// Build a draft from raw input values. Text is trimmed, blank optional
    /// fields become `None`, unparseable dates and guest counts become `None`.
    #[allow(clippy::too_many_arguments)]
    pub fn from_raw(
        name: &str,
        phone: &str,
        email: &str,
        check_in: &str,
        check_out: &str,
        guests: &str,
        property: &str,
        message: &str,
        selected_offer: &str,
    ) -> Self {
        Self {
            name: name.trim().to_string(),
            phone: phone.trim().to_string(),
            email: non_empty(email),
            check_in: parse_input_date(check_in),
            check_out: parse_input_date(check_out),
            guest_count: guests.trim().parse().ok(),
            property: property.trim().to_string(),
            message: non_empty(message),
            selected_offer: non_empty(selected_offer),
        }
    }
}

/// Free-form contact form contents, one entry per field in page order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactDraft {
    pub fields: Vec<(crate::FieldSpec, String)>,
}

impl ContactDraft {
    pub fn push(&mut self, spec: crate::FieldSpec, value: &str) {
        self.fields.push((spec, value.trim().to_string()));
    }
}

/// Parse the `YYYY-MM-DD` value of a date input
pub fn parse_input_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_raw_trims_and_drops_blanks() {
        let draft = BookingFormDraft::from_raw(
            "  Tsering  ",
            " 9876543210 ",
            "   ",
            "2024-01-01",
            "2024-01-04",
            "2",
            "Hotel Rangyul",
            "",
            "",
        );
        assert_eq!(draft.name, "Tsering");
        assert_eq!(draft.phone, "9876543210");
        assert_eq!(draft.email, None);
        assert_eq!(draft.check_in, NaiveDate::from_ymd_opt(2024, 1, 1));
        assert_eq!(draft.guest_count, Some(2));
        assert_eq!(draft.message, None);
        assert_eq!(draft.selected_offer, None);
    }

    #[test]
    fn test_bad_date_and_guest_values_become_none() {
        let draft = BookingFormDraft::from_raw("A", "1", "", "01/02/2024", "", "two", "", "", "");
        assert_eq!(draft.check_in, None);
        assert_eq!(draft.check_out, None);
        assert_eq!(draft.guest_count, None);
    }

    #[test]
    fn test_field_id_from_dom_id() {
        assert_eq!(FieldId::from_dom_id("email"), FieldId::Email);
        assert_eq!(FieldId::from_dom_id("subject"), FieldId::Other("subject".into()));
        assert_eq!(FieldId::Other("subject".into()).label(), "subject");
    }
}
