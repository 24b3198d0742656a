//! Booking Dispatch
//!
//! Turns a validated draft into the chat message handed to the external
//! messaging endpoint. The receiving client renders `*bold*` and `_italic_`
//! markers, so those characters are left unencoded; line breaks go out as
//! `%0A`.

use chrono::NaiveDate;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::draft::BookingFormDraft;

/// Everything except alphanumerics and the chat markup characters
const MESSAGE_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'*')
    .remove(b'_')
    .remove(b'-')
    .remove(b'.')
    .remove(b'~');

/// Whole nights between two dates, never less than one
pub fn nights_between(check_in: NaiveDate, check_out: NaiveDate) -> u32 {
    let days = (check_out - check_in).num_days();
    days.max(1) as u32
}

/// Long date form, e.g. "04 January 2024"
pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%d %B %Y").to_string()
}

/// Deep link that opens a chat with `recipient` prefilled with `message`
pub fn whatsapp_url(host: &str, recipient: &str, message: &BookingMessage) -> String {
    format!("https://{}/{}?text={}", host, recipient, message.encoded())
}

/// Labelled, line-oriented chat message
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingMessage {
    lines: Vec<String>,
}

impl BookingMessage {
    /// Start with a bold title followed by an empty line
    pub fn titled(title: &str) -> Self {
        Self {
            lines: vec![format!("*{}*", title), String::new()],
        }
    }

    pub fn field(mut self, label: &str, value: impl std::fmt::Display) -> Self {
        self.lines.push(format!("*{}:* {}", label, value));
        self
    }

    /// Adds the line only when a non-empty value is present
    pub fn optional_field(self, label: &str, value: Option<&str>) -> Self {
        match value.map(str::trim).filter(|v| !v.is_empty()) {
            Some(v) => self.field(label, v),
            None => self,
        }
    }

    pub fn blank(mut self) -> Self {
        self.lines.push(String::new());
        self
    }

    pub fn footer(mut self, text: &str) -> Self {
        self.lines.push(format!("_{}_", text));
        self
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Plain multi-line text
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    /// Percent-encoded text for the `text=` query parameter
    pub fn encoded(&self) -> String {
        utf8_percent_encode(&self.text(), MESSAGE_ENCODE_SET).to_string()
    }
}

/// The two booking message layouts used across the sites
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageTemplate {
    /// Group site quick booking: property chosen in the form, optional offer.
    /// `footer` is the sign-off line, which names the site rather than the group.
    QuickBooking { brand: String, footer: String },
    /// Single hotel page: room and price come from the clicked room card
    RoomBooking { hotel: String, price: String },
}

impl MessageTemplate {
    pub fn compose(&self, draft: &BookingFormDraft) -> BookingMessage {
        let check_in = draft.check_in.map(format_long_date).unwrap_or_default();
        let check_out = draft.check_out.map(format_long_date).unwrap_or_default();
        let guests = draft.guest_count.unwrap_or(1);

        match self {
            MessageTemplate::QuickBooking { brand, footer } => {
                BookingMessage::titled(&format!("New Booking Request - {}", brand))
                    .field("Name", &draft.name)
                    .field("Phone", &draft.phone)
                    .optional_field("Email", draft.email.as_deref())
                    .field("Check-in", check_in)
                    .field("Check-out", check_out)
                    .field("Guests", guests)
                    .field("Property", &draft.property)
                    .optional_field("Selected Offer", draft.selected_offer.as_deref())
                    .optional_field("Message", draft.message.as_deref())
                    .blank()
                    .footer(footer)
            }
            MessageTemplate::RoomBooking { hotel, price } => {
                let nights = match (draft.check_in, draft.check_out) {
                    (Some(a), Some(b)) => nights_between(a, b),
                    _ => 1,
                };
                BookingMessage::titled(&format!("🏨 {} - Booking Request", hotel))
                    .field("Guest Name", &draft.name)
                    .field("Phone", &draft.phone)
                    .optional_field("Email", draft.email.as_deref())
                    .field("Check-in Date", check_in)
                    .field("Check-out Date", check_out)
                    .field("Number of Nights", nights)
                    .field("Number of Guests", guests)
                    .field("Room Type", &draft.property)
                    .field("Price", price)
                    .optional_field("Message", draft.message.as_deref())
                    .blank()
                    .footer(&format!("This booking request was sent from {} website", hotel))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn draft() -> BookingFormDraft {
        BookingFormDraft {
            name: "Tsering Dolma".into(),
            phone: "9876543210".into(),
            email: Some("".into()),
            check_in: Some(date(2024, 1, 1)),
            check_out: Some(date(2024, 1, 4)),
            guest_count: Some(2),
            property: "Hotel Rangyul".into(),
            message: None,
            selected_offer: None,
        }
    }

    #[test]
    fn test_nights() {
        assert_eq!(nights_between(date(2024, 1, 1), date(2024, 1, 4)), 3);
        assert_eq!(nights_between(date(2024, 1, 4), date(2024, 1, 4)), 1);
        assert_eq!(nights_between(date(2024, 1, 4), date(2024, 1, 1)), 1);
        assert_eq!(nights_between(date(2024, 2, 28), date(2024, 3, 1)), 2);
    }

    #[test]
    fn test_long_date() {
        assert_eq!(format_long_date(date(2024, 1, 4)), "04 January 2024");
    }

    fn quick_template() -> MessageTemplate {
        let config = crate::SiteConfig::default();
        MessageTemplate::QuickBooking {
            brand: config.brand,
            footer: config.quick_booking_footer,
        }
    }

    #[test]
    fn test_quick_booking_text() {
        let text = quick_template().compose(&draft()).text();
        assert_eq!(
            text,
            "*New Booking Request - Rangyul Hotels*\n\n\
             *Name:* Tsering Dolma\n\
             *Phone:* 9876543210\n\
             *Check-in:* 01 January 2024\n\
             *Check-out:* 04 January 2024\n\
             *Guests:* 2\n\
             *Property:* Hotel Rangyul\n\n\
             _Sent via Rangyul Website Quick Booking_"
        );
    }

    #[test]
    fn test_empty_email_line_is_omitted() {
        let template = quick_template();
        let message = template.compose(&draft());
        assert!(!message.text().contains("Email"));

        let with_email = BookingFormDraft {
            email: Some("guest@example.com".into()),
            selected_offer: Some("Winter Escape".into()),
            ..draft()
        };
        let text = template.compose(&with_email).text();
        assert!(text.contains("*Email:* guest@example.com\n*Check-in:*"));
        assert!(text.contains("*Property:* Hotel Rangyul\n*Selected Offer:* Winter Escape\n"));
    }

    #[test]
    fn test_quick_footer_names_the_site_not_the_group() {
        let text = quick_template().compose(&draft()).text();
        assert!(text.starts_with("*New Booking Request - Rangyul Hotels*\n"));
        assert_eq!(text.lines().last(), Some("_Sent via Rangyul Website Quick Booking_"));
    }

    #[test]
    fn test_room_booking_includes_nights_and_price() {
        let template = MessageTemplate::RoomBooking {
            hotel: "Galaxy Hotel".into(),
            price: "₹4,500".into(),
        };
        let text = template.compose(&draft()).text();
        assert!(text.starts_with(
            "*🏨 Galaxy Hotel - Booking Request*\n\n*Guest Name:* Tsering Dolma\n"
        ));
        assert!(text.contains("*Number of Nights:* 3\n"));
        assert!(text.contains("*Price:* ₹4,500\n\n_This booking request"));
    }

    #[test]
    fn test_url_encoding_keeps_markup() {
        let message = BookingMessage::titled("Hi").field("Name", "A B");
        let url = whatsapp_url("wa.me", "918899452417", &message);
        assert_eq!(url, "https://wa.me/918899452417?text=*Hi*%0A%0A*Name%3A*%20A%20B");
    }
}
