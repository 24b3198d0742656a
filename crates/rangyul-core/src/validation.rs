//! Form Validation
//!
//! Field rules and the aggregate validators for booking and contact forms.
//! Every rule runs; errors are collected rather than short-circuited so the
//! page can show all of them at once.

use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;
use thiserror::Error;

use crate::draft::{BookingFormDraft, ContactDraft, FieldId};

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$")
            .expect("static email pattern")
    })
}

/// Which phone numbers a form accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PhonePolicy {
    /// Ten digits starting with 6, 7, 8 or 9 (Indian mobile numbers)
    #[default]
    IndiaMobile,
    /// Any ten digits
    TenDigit,
}

impl PhonePolicy {
    fn expected(&self) -> &'static str {
        match self {
            PhonePolicy::IndiaMobile => "10-digit mobile number",
            PhonePolicy::TenDigit => "10-digit phone number",
        }
    }
}

/// Why a date field was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateRangeReason {
    CheckInInPast,
    CheckOutNotAfterCheckIn,
}

impl std::fmt::Display for DateRangeReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DateRangeReason::CheckInInPast => f.write_str("Check-in date cannot be in the past"),
            DateRangeReason::CheckOutNotAfterCheckIn => {
                f.write_str("Check-out date must be after check-in date")
            }
        }
    }
}

/// A single field-level failure. The display text is the inline message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{label} is required")]
    FieldRequired { field: FieldId, label: String },
    #[error("Please enter a valid {expected}")]
    FieldFormatInvalid { field: FieldId, expected: &'static str },
    #[error("{reason}")]
    DateRangeInvalid { field: FieldId, reason: DateRangeReason },
}

impl ValidationError {
    pub fn field(&self) -> &FieldId {
        match self {
            ValidationError::FieldRequired { field, .. }
            | ValidationError::FieldFormatInvalid { field, .. }
            | ValidationError::DateRangeInvalid { field, .. } => field,
        }
    }

    fn required(field: FieldId) -> Self {
        let label = field.label().to_string();
        ValidationError::FieldRequired { field, label }
    }
}

/// Outcome of validating a whole form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    Valid,
    Invalid(Vec<ValidationError>),
}

impl ValidationResult {
    pub fn from_errors(errors: Vec<ValidationError>) -> Self {
        if errors.is_empty() {
            ValidationResult::Valid
        } else {
            ValidationResult::Invalid(errors)
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }

    pub fn errors(&self) -> &[ValidationError] {
        match self {
            ValidationResult::Valid => &[],
            ValidationResult::Invalid(errors) => errors,
        }
    }

    /// First error reported for `field`, if any
    pub fn error_for(&self, field: &FieldId) -> Option<&ValidationError> {
        self.errors().iter().find(|e| e.field() == field)
    }

    /// One-line notice for the whole form. Missing fields take precedence,
    /// then format problems, then dates.
    pub fn summary(&self) -> Option<&'static str> {
        let errors = self.errors();
        let has = |pred: fn(&ValidationError) -> bool| errors.iter().any(pred);
        if errors.is_empty() {
            None
        } else if has(|e| matches!(e, ValidationError::FieldRequired { .. })) {
            Some("Please fill in all required fields")
        } else if has(|e| matches!(e, ValidationError::FieldFormatInvalid { .. })) {
            Some("Please enter a valid phone number and email address")
        } else {
            Some("Please check your check-in and check-out dates")
        }
    }
}

/// Shape rule applied to a non-empty value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Phone(PhonePolicy),
}

/// How one field is checked
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub id: FieldId,
    pub label: String,
    pub kind: FieldKind,
    pub required: bool,
}

impl FieldSpec {
    pub fn new(id: FieldId, kind: FieldKind, required: bool) -> Self {
        let label = id.label().to_string();
        Self {
            id,
            label,
            kind,
            required,
        }
    }

    pub fn with_label(mut self, label: &str) -> Self {
        let label = label.trim().trim_end_matches('*').trim();
        if !label.is_empty() {
            self.label = label.to_string();
        }
        self
    }
}

pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_match(email.trim())
}

/// Strip everything but digits, then apply the policy
pub fn is_valid_phone(phone: &str, policy: PhonePolicy) -> bool {
    let digits: Vec<char> = phone.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() != 10 {
        return false;
    }
    match policy {
        PhonePolicy::IndiaMobile => matches!(digits[0], '6'..='9'),
        PhonePolicy::TenDigit => true,
    }
}

/// Check one value against its spec
pub fn validate_field(spec: &FieldSpec, value: &str) -> Result<(), ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        if spec.required {
            return Err(ValidationError::FieldRequired {
                field: spec.id.clone(),
                label: spec.label.clone(),
            });
        }
        return Ok(());
    }
    match spec.kind {
        FieldKind::Text => Ok(()),
        FieldKind::Email if is_valid_email(value) => Ok(()),
        FieldKind::Email => Err(ValidationError::FieldFormatInvalid {
            field: spec.id.clone(),
            expected: "email address",
        }),
        FieldKind::Phone(policy) if is_valid_phone(value, policy) => Ok(()),
        FieldKind::Phone(policy) => Err(ValidationError::FieldFormatInvalid {
            field: spec.id.clone(),
            expected: policy.expected(),
        }),
    }
}

/// Validate a booking draft.
///
/// `today` is the date at the moment of submission; the check-in may not be
/// earlier than it and the check-out must fall strictly after the check-in.
pub fn validate_booking(
    draft: &BookingFormDraft,
    policy: PhonePolicy,
    today: NaiveDate,
) -> ValidationResult {
    let mut errors = Vec::new();

    let text_fields = [
        (FieldSpec::new(FieldId::Name, FieldKind::Text, true), draft.name.as_str()),
        (
            FieldSpec::new(FieldId::Phone, FieldKind::Phone(policy), true),
            draft.phone.as_str(),
        ),
        (
            FieldSpec::new(FieldId::Email, FieldKind::Email, false),
            draft.email.as_deref().unwrap_or(""),
        ),
    ];
    for (spec, value) in &text_fields {
        if let Err(e) = validate_field(spec, value) {
            errors.push(e);
        }
    }

    match draft.check_in {
        None => errors.push(ValidationError::required(FieldId::CheckIn)),
        Some(check_in) if check_in < today => errors.push(ValidationError::DateRangeInvalid {
            field: FieldId::CheckIn,
            reason: DateRangeReason::CheckInInPast,
        }),
        Some(_) => {}
    }

    match (draft.check_in, draft.check_out) {
        (_, None) => errors.push(ValidationError::required(FieldId::CheckOut)),
        (Some(check_in), Some(check_out)) if check_out <= check_in => {
            errors.push(ValidationError::DateRangeInvalid {
                field: FieldId::CheckOut,
                reason: DateRangeReason::CheckOutNotAfterCheckIn,
            })
        }
        _ => {}
    }

    if draft.guest_count.unwrap_or(0) == 0 {
        errors.push(ValidationError::required(FieldId::Guests));
    }

    if let Err(e) = validate_field(
        &FieldSpec::new(FieldId::Property, FieldKind::Text, true),
        &draft.property,
    ) {
        errors.push(e);
    }

    ValidationResult::from_errors(errors)
}

/// Validate every field of a contact draft
pub fn validate_contact(draft: &ContactDraft) -> ValidationResult {
    let errors = draft
        .fields
        .iter()
        .filter_map(|(spec, value)| validate_field(spec, value).err())
        .collect();
    ValidationResult::from_errors(errors)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
    }

    fn valid_draft() -> BookingFormDraft {
        BookingFormDraft {
            name: "A".into(),
            phone: "9876543210".into(),
            email: None,
            check_in: Some(today()),
            check_out: today().succ_opt(),
            guest_count: Some(2),
            property: "Hotel Rangyul".into(),
            message: None,
            selected_offer: None,
        }
    }

    #[test]
    fn test_valid_booking_under_india_policy() {
        let result = validate_booking(&valid_draft(), PhonePolicy::IndiaMobile, today());
        assert_eq!(result, ValidationResult::Valid);
    }

    #[test]
    fn test_empty_name_and_same_day_checkout() {
        let draft = BookingFormDraft {
            name: "".into(),
            phone: "12345".into(),
            check_out: Some(today()),
            ..valid_draft()
        };
        let result = validate_booking(&draft, PhonePolicy::IndiaMobile, today());
        assert!(!result.is_valid());
        assert!(matches!(
            result.error_for(&FieldId::Name),
            Some(ValidationError::FieldRequired { .. })
        ));
        assert!(result
            .errors()
            .iter()
            .any(|e| matches!(e, ValidationError::DateRangeInvalid { .. })));
        // all problems surface together
        assert!(result.error_for(&FieldId::Phone).is_some());
    }

    #[test]
    fn test_leading_one_rejected_by_india_policy_only() {
        let draft = BookingFormDraft {
            phone: "1876543210".into(),
            ..valid_draft()
        };
        let strict = validate_booking(&draft, PhonePolicy::IndiaMobile, today());
        assert!(matches!(
            strict.error_for(&FieldId::Phone),
            Some(ValidationError::FieldFormatInvalid { .. })
        ));
        assert_eq!(strict.errors().len(), 1);

        let relaxed = validate_booking(&draft, PhonePolicy::TenDigit, today());
        assert!(relaxed.is_valid());
    }

    #[test]
    fn test_check_in_before_today_rejected() {
        let draft = BookingFormDraft {
            check_in: today().pred_opt(),
            ..valid_draft()
        };
        let result = validate_booking(&draft, PhonePolicy::IndiaMobile, today());
        assert_eq!(
            result.error_for(&FieldId::CheckIn),
            Some(&ValidationError::DateRangeInvalid {
                field: FieldId::CheckIn,
                reason: DateRangeReason::CheckInInPast
            })
        );
    }

    #[test]
    fn test_draft_seeded_yesterday_fails_when_submitted_next_day() {
        let seeded = valid_draft();
        let next_day = today().succ_opt().unwrap();
        let result = validate_booking(&seeded, PhonePolicy::IndiaMobile, next_day);
        assert!(result.error_for(&FieldId::CheckIn).is_some());
    }

    #[test]
    fn test_missing_dates_and_guests_are_required() {
        let draft = BookingFormDraft {
            check_in: None,
            check_out: None,
            guest_count: None,
            property: " ".into(),
            ..valid_draft()
        };
        let result = validate_booking(&draft, PhonePolicy::TenDigit, today());
        for field in [FieldId::CheckIn, FieldId::CheckOut, FieldId::Guests, FieldId::Property] {
            assert!(
                matches!(result.error_for(&field), Some(ValidationError::FieldRequired { .. })),
                "{field:?} should be required"
            );
        }
    }

    #[test]
    fn test_bad_email_reported_when_present() {
        let draft = BookingFormDraft {
            email: Some("guest@localhost".into()),
            ..valid_draft()
        };
        let result = validate_booking(&draft, PhonePolicy::IndiaMobile, today());
        assert_eq!(
            result.error_for(&FieldId::Email).map(|e| e.to_string()),
            Some("Please enter a valid email address".to_string())
        );
    }

    #[test]
    fn test_summary_follows_error_kinds() {
        let valid = validate_booking(&valid_draft(), PhonePolicy::IndiaMobile, today());
        assert_eq!(valid.summary(), None);

        let bad_phone = BookingFormDraft {
            phone: "1876543210".into(),
            ..valid_draft()
        };
        let result = validate_booking(&bad_phone, PhonePolicy::IndiaMobile, today());
        assert_eq!(
            result.summary(),
            Some("Please enter a valid phone number and email address")
        );

        let same_day = BookingFormDraft {
            check_out: Some(today()),
            ..valid_draft()
        };
        let result = validate_booking(&same_day, PhonePolicy::IndiaMobile, today());
        assert_eq!(result.summary(), Some("Please check your check-in and check-out dates"));

        let missing_name = BookingFormDraft {
            name: "".into(),
            ..bad_phone
        };
        let result = validate_booking(&missing_name, PhonePolicy::IndiaMobile, today());
        assert_eq!(result.summary(), Some("Please fill in all required fields"));
    }

    #[test]
    fn test_email_shapes() {
        assert!(is_valid_email("guest.name+stay@rangyul.co.in"));
        assert!(!is_valid_email("guest@rangyul.c"));
        assert!(!is_valid_email("guest rangyul.com"));
        assert!(!is_valid_email("@rangyul.com"));
    }

    #[test]
    fn test_phone_strips_formatting() {
        assert!(is_valid_phone("98765 43210", PhonePolicy::IndiaMobile));
        assert!(is_valid_phone("(987) 654-3210", PhonePolicy::IndiaMobile));
        assert!(!is_valid_phone("98765", PhonePolicy::TenDigit));
        assert!(is_valid_phone("0123456789", PhonePolicy::TenDigit));
    }

    #[test]
    fn test_contact_uses_dom_labels() {
        let mut draft = ContactDraft::default();
        draft.push(
            FieldSpec::new(FieldId::Other("subject".into()), FieldKind::Text, true)
                .with_label("Subject *"),
            "  ",
        );
        draft.push(FieldSpec::new(FieldId::Email, FieldKind::Email, true), "a@b.io");
        let result = validate_contact(&draft);
        assert_eq!(result.errors().len(), 1);
        assert_eq!(result.errors()[0].to_string(), "Subject is required");
    }
}
