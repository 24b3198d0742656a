//! Rangyul Core
//!
//! Browser-independent logic behind the hotel sites:
//! - carousel: slide rotation with a single owned timer handle
//! - modal: open/close phases and the reference-counted scroll lock
//! - validation: field rules and the booking draft validator
//! - dispatch: nights calculation and the messaging handoff payload
//! - counter, scroll, map: presentational state that still has rules
//! - config: site settings with defaults, overridable from JSON
//!
//! Nothing in here touches the DOM, so everything is testable natively.

mod carousel;
mod config;
mod counter;
mod dispatch;
mod draft;
mod map;
mod modal;
mod reference;
mod registry;
mod scroll;
mod validation;

pub use carousel::Carousel;
pub use config::{
    ConfigError, HandoffDelays, MapSettings, MessagingEndpoint, ModalDelays, ScrollSettings,
    SiteConfig, SliderSettings,
};
pub use counter::{CounterAnimation, CounterStyle};
pub use dispatch::{format_long_date, nights_between, whatsapp_url, BookingMessage, MessageTemplate};
pub use draft::{parse_input_date, BookingFormDraft, ContactDraft, FieldId};
pub use map::{escape_html, popup_html, MapSelection, PropertyMarker, SelectionChange};
pub use modal::{ModalError, ModalPhase, ModalState, ScrollLock};
pub use reference::{reference_id, CharCountLevel};
pub use registry::KeyedRegistry;
pub use scroll::{back_to_top_visible, header_scrolled, menu_should_collapse, progress_percent};
pub use validation::{
    is_valid_email, is_valid_phone, validate_booking, validate_contact, validate_field,
    DateRangeReason, FieldKind, FieldSpec, PhonePolicy, ValidationError, ValidationResult,
};
