//! Site Configuration
//!
//! Settings shared by every page. Each field has a default, so a page only
//! needs to embed the values it wants to change.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::map::PropertyMarker;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid site config: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Group brand used in quick booking messages
    pub brand: String,
    /// Sign-off line at the end of quick booking messages
    pub quick_booking_footer: String,
    /// Hotel name used on single-hotel pages
    pub hotel_name: String,
    pub messaging: MessagingEndpoint,
    pub sliders: SliderSettings,
    pub modal: ModalDelays,
    pub handoff: HandoffDelays,
    pub scroll: ScrollSettings,
    /// Viewport width above which the mobile menu is forced closed
    pub menu_breakpoint_px: f64,
    pub map: MapSettings,
    pub properties: Vec<PropertyMarker>,
    /// Short blurbs shown when a contact-page pin is clicked, keyed by property name
    pub property_info: BTreeMap<String, String>,
}

impl SiteConfig {
    /// Parse a (possibly partial) JSON override
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn property_blurb(&self, name: &str) -> String {
        self.property_info
            .get(name)
            .cloned()
            .unwrap_or_else(|| format!("Information about {}", name))
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        let property_info = [
            (
                "Hotel Rangyul",
                "Hotel Rangyul: Premium accommodation on Srinagar-Ladakh Road with panoramic mountain views.",
            ),
            (
                "Rangyul Resort",
                "Rangyul Resort: Luxury retreat in Panikhar with spa facilities and adventure activities.",
            ),
            (
                "Galaxy Hotel",
                "Galaxy Hotel: Business-class hotel in Kargil main market with conference facilities.",
            ),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        Self {
            brand: "Rangyul Hotels".to_string(),
            quick_booking_footer: "Sent via Rangyul Website Quick Booking".to_string(),
            hotel_name: "Galaxy Hotel".to_string(),
            messaging: MessagingEndpoint::default(),
            sliders: SliderSettings::default(),
            modal: ModalDelays::default(),
            handoff: HandoffDelays::default(),
            scroll: ScrollSettings::default(),
            menu_breakpoint_px: 768.0,
            map: MapSettings::default(),
            properties: vec![
                PropertyMarker::new(
                    "hotel-rangyul",
                    "Hotel Rangyul",
                    34.5576,
                    76.1252,
                    "Baroo, Kargil - Town Center Location",
                    "🏨",
                ),
                PropertyMarker::new(
                    "rangyul-resort",
                    "Rangyul Resort",
                    34.5100,
                    76.1350,
                    "Suru Valley, Kargil - Valley View",
                    "🏔️",
                ),
                PropertyMarker::new(
                    "galaxy-hotel",
                    "Galaxy Hotel",
                    34.5571,
                    76.1324,
                    "Kargil Center - Premium Location",
                    "⭐",
                ),
            ],
            property_info,
        }
    }
}

/// Chat deep-link target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessagingEndpoint {
    pub host: String,
    pub recipient: String,
}

impl Default for MessagingEndpoint {
    fn default() -> Self {
        Self {
            host: "wa.me".to_string(),
            recipient: "918899452417".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SliderSettings {
    pub hero_interval_ms: u32,
    pub property_interval_ms: u32,
}

impl Default for SliderSettings {
    fn default() -> Self {
        Self {
            hero_interval_ms: 7000,
            property_interval_ms: 5000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModalDelays {
    /// Before the first input receives focus
    pub focus_ms: u32,
    /// Close transition before the scroll lock is released
    pub close_ms: u32,
    /// Between showing the overlay and marking it open
    pub settle_ms: u32,
}

impl Default for ModalDelays {
    fn default() -> Self {
        Self {
            focus_ms: 300,
            close_ms: 300,
            settle_ms: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HandoffDelays {
    /// In-progress label shown before the chat link opens
    pub redirect_ms: u32,
    /// Success label shown before the form resets and the modal closes
    pub restore_ms: u32,
    /// Simulated contact form submission
    pub contact_submit_ms: u32,
    /// Pause between contact success status and the success modal
    pub success_modal_ms: u32,
    /// How long a toast stays on screen
    pub toast_ms: u32,
}

impl Default for HandoffDelays {
    fn default() -> Self {
        Self {
            redirect_ms: 1000,
            restore_ms: 1500,
            contact_submit_ms: 1500,
            success_modal_ms: 800,
            toast_ms: 4000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollSettings {
    pub header_threshold_px: f64,
    pub back_to_top_threshold_px: f64,
    /// Fixed header height subtracted when jumping to an anchor
    pub anchor_offset_px: f64,
}

impl Default for ScrollSettings {
    fn default() -> Self {
        Self {
            header_threshold_px: 100.0,
            back_to_top_threshold_px: 300.0,
            anchor_offset_px: 80.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapSettings {
    pub center: (f64, f64),
    pub zoom: f64,
    pub focus_zoom: f64,
    pub max_zoom: f64,
    pub tile_url: String,
    pub attribution: String,
    /// Extra attribution line added by the site
    pub credit: String,
    /// Highlighted town area, as (lat, lng) corners
    pub area: Vec<(f64, f64)>,
    /// Delay before the focused marker's popup opens
    pub popup_delay_ms: u32,
    /// Debounce for re-measuring the map after a resize
    pub resize_debounce_ms: u32,
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            center: (34.5576, 76.1252),
            zoom: 12.0,
            focus_zoom: 14.0,
            max_zoom: 18.0,
            tile_url: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            attribution: "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors"
                .to_string(),
            credit: "Rangyul Group of Hotels".to_string(),
            area: vec![(34.55, 76.12), (34.56, 76.12), (34.56, 76.13), (34.55, 76.13)],
            popup_delay_ms: 500,
            resize_debounce_ms: 100,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SiteConfig::default();
        assert_eq!(config.messaging.recipient, "918899452417");
        assert_eq!(config.sliders.hero_interval_ms, 7000);
        assert_eq!(config.properties.len(), 3);
        assert_eq!(config.map.area.len(), 4);
    }

    #[test]
    fn test_partial_override_keeps_other_defaults() {
        let config = SiteConfig::from_json(
            r#"{ "messaging": { "recipient": "911234567890" }, "sliders": { "hero_interval_ms": 4000 } }"#,
        )
        .unwrap();
        assert_eq!(config.messaging.recipient, "911234567890");
        assert_eq!(config.messaging.host, "wa.me");
        assert_eq!(config.sliders.hero_interval_ms, 4000);
        assert_eq!(config.sliders.property_interval_ms, 5000);
        assert_eq!(config.brand, "Rangyul Hotels");
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let err = SiteConfig::from_json("{ brand: ").unwrap_err();
        assert!(err.to_string().starts_with("invalid site config"));
    }

    #[test]
    fn test_property_blurb_fallback() {
        let config = SiteConfig::default();
        assert!(config.property_blurb("Galaxy Hotel").starts_with("Galaxy Hotel:"));
        assert_eq!(config.property_blurb("Annex"), "Information about Annex");
    }
}
