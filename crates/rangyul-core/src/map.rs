//! Property Map Records
//!
//! Static property locations and the shared selection between map markers
//! and the property cards listed beside the map.

use serde::{Deserialize, Serialize};

/// One property pinned on the map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyMarker {
    /// Matches the card's `data-location` and the details page name
    pub id: String,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    pub description: String,
    #[serde(default)]
    pub icon: String,
}

impl PropertyMarker {
    pub fn new(id: &str, name: &str, lat: f64, lng: f64, description: &str, icon: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            lat,
            lng,
            description: description.to_string(),
            icon: icon.to_string(),
        }
    }
}

/// What the DOM side has to do after a selection
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SelectionChange {
    /// Card to mark active; all others lose the highlight
    pub highlight_card: Option<String>,
    /// Marker to center on and open
    pub focus_marker: Option<String>,
}

/// Selected property, kept in step between markers and cards
#[derive(Debug, Clone, Default)]
pub struct MapSelection {
    active: Option<String>,
}

impl MapSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// A marker was clicked: its popup opens by itself, only the card follows
    pub fn select_marker(&mut self, id: &str) -> SelectionChange {
        self.active = Some(id.to_string());
        SelectionChange {
            highlight_card: Some(id.to_string()),
            focus_marker: None,
        }
    }

    /// A card was clicked: highlight it and focus its marker when one exists
    pub fn select_card(&mut self, id: &str, markers: &[PropertyMarker]) -> SelectionChange {
        self.active = Some(id.to_string());
        SelectionChange {
            highlight_card: Some(id.to_string()),
            focus_marker: markers.iter().find(|m| m.id == id).map(|m| m.id.clone()),
        }
    }
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Popup body bound to a marker
pub fn popup_html(marker: &PropertyMarker) -> String {
    format!(
        r#"<div class="map-marker-popup"><h3>{} {}</h3><p>{}</p><a href="{}.html">View Details <i class="fas fa-arrow-right"></i></a></div>"#,
        escape_html(&marker.icon),
        escape_html(&marker.name),
        escape_html(&marker.description),
        escape_html(&marker.id),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn markers() -> Vec<PropertyMarker> {
        vec![
            PropertyMarker::new(
                "hotel-rangyul",
                "Hotel Rangyul",
                34.5576,
                76.1252,
                "Baroo, Kargil",
                "🏨",
            ),
            PropertyMarker::new(
                "galaxy-hotel",
                "Galaxy Hotel",
                34.5571,
                76.1324,
                "Kargil Center",
                "⭐",
            ),
        ]
    }

    #[test]
    fn test_card_click_focuses_matching_marker() {
        let mut selection = MapSelection::new();
        let change = selection.select_card("galaxy-hotel", &markers());
        assert_eq!(change.highlight_card.as_deref(), Some("galaxy-hotel"));
        assert_eq!(change.focus_marker.as_deref(), Some("galaxy-hotel"));
        assert_eq!(selection.active(), Some("galaxy-hotel"));
    }

    #[test]
    fn test_card_without_marker_only_highlights() {
        let mut selection = MapSelection::new();
        let change = selection.select_card("unknown", &markers());
        assert_eq!(change.focus_marker, None);
        assert_eq!(change.highlight_card.as_deref(), Some("unknown"));
    }

    #[test]
    fn test_marker_click_moves_card_highlight() {
        let mut selection = MapSelection::new();
        selection.select_card("galaxy-hotel", &markers());
        let change = selection.select_marker("hotel-rangyul");
        assert_eq!(change.highlight_card.as_deref(), Some("hotel-rangyul"));
        assert_eq!(selection.active(), Some("hotel-rangyul"));
    }

    #[test]
    fn test_popup_escapes_text() {
        let marker = PropertyMarker::new("x", "A & B <Inn>", 0.0, 0.0, "\"quoted\"", "");
        let html = popup_html(&marker);
        assert!(html.contains("A &amp; B &lt;Inn&gt;"));
        assert!(html.contains("&quot;quoted&quot;"));
        assert!(html.contains(r#"href="x.html""#));
    }
}
