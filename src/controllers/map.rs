//! Property Map
//!
//! Leaflet map with one marker per property. Marker clicks highlight the
//! matching card; card clicks center the map and open the marker's popup.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use rangyul_core::{popup_html, MapSelection, MapSettings, PropertyMarker, SelectionChange};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

use crate::context::SiteContext;
use crate::dom::{self, DomError, DomResult, Listener};
use crate::leaflet::{self, LeafletMap, Marker};

const MARKER_HTML: &str = r#"<div style="background: #d4af37; width: 20px; height: 20px; border-radius: 50%; border: 3px solid white; box-shadow: 0 0 10px rgba(212, 175, 55, 0.8);"></div>"#;
const AREA_COLOR: &str = "#d4af37";

struct MapInner {
    map: LeafletMap,
    settings: MapSettings,
    properties: Vec<PropertyMarker>,
    markers: Vec<Marker>,
    cards: Vec<Element>,
    selection: RefCell<MapSelection>,
    popup_timer: RefCell<Option<Timeout>>,
    resize_timer: RefCell<Option<Timeout>>,
}

impl MapInner {
    fn apply(&self, change: SelectionChange, card_coords: Option<(f64, f64)>) {
        if let Some(id) = &change.highlight_card {
            for card in &self.cards {
                let on = card.get_attribute("data-location").as_deref() == Some(id.as_str());
                dom::set_class(card, "active", on);
            }
        }
        let Some(id) = change.focus_marker else {
            return;
        };
        let Some(index) = self.properties.iter().position(|p| p.id == id) else {
            return;
        };
        let property = &self.properties[index];
        let (lat, lng) = card_coords.unwrap_or((property.lat, property.lng));
        self.map.set_view(&leaflet::lat_lng(lat, lng), self.settings.focus_zoom);

        let marker = self.markers[index].clone();
        *self.popup_timer.borrow_mut() = Some(Timeout::new(self.settings.popup_delay_ms, move || {
            marker.open_popup();
        }));
    }

    fn select_marker(&self, id: &str) {
        let change = self.selection.borrow_mut().select_marker(id);
        self.apply(change, None);
    }

    fn select_card(&self, card: &Element) {
        let Some(id) = card.get_attribute("data-location") else {
            return;
        };
        let coord = |name| card.get_attribute(name).and_then(|v| v.trim().parse::<f64>().ok());
        let card_coords = coord("data-lat").zip(coord("data-lng"));
        let change = self.selection.borrow_mut().select_card(&id, &self.properties);
        log::debug!("Map card selected: {}", id);
        self.apply(change, card_coords);
    }

    /// Recompute the map size once resizing has settled
    fn schedule_refresh(self: &Rc<Self>) {
        let weak = Rc::downgrade(self);
        let timer = Timeout::new(self.settings.resize_debounce_ms, move || {
            if let Some(inner) = weak.upgrade() {
                inner.map.invalidate_size();
            }
        });
        *self.resize_timer.borrow_mut() = Some(timer);
    }
}

pub struct PropertyMap {
    inner: Rc<MapInner>,
    _marker_handlers: Vec<Closure<dyn FnMut()>>,
    _listeners: Vec<Listener>,
}

impl PropertyMap {
    pub fn bind(ctx: &SiteContext, document: &Document) -> DomResult<Self> {
        let container: HtmlElement = dom::require_id(document, "leaflet-map")?;
        if !leaflet::is_available() {
            return Err(DomError::MissingElement("Leaflet (window.L)".into()));
        }
        let settings = ctx.config.map.clone();
        let properties = ctx.config.properties.clone();

        let map = leaflet::create_map(&container)?;
        map.set_view(&leaflet::lat_lng(settings.center.0, settings.center.1), settings.zoom);
        leaflet::tile_layer(
            &settings.tile_url,
            &leaflet::options(&leaflet::TileOptions {
                attribution: &settings.attribution,
                max_zoom: settings.max_zoom,
            }),
        )
        .add_to(&map);
        dom::set_style(&container, "background", "var(--luxury-dark)");

        let icon = leaflet::div_icon(&leaflet::options(&leaflet::DivIconOptions {
            class_name: "custom-marker",
            html: MARKER_HTML,
            icon_size: [26, 26],
            icon_anchor: [13, 13],
        }));
        let popup_options = leaflet::options(&leaflet::PopupOptions {
            max_width: 250,
            class_name: "custom-popup",
        });

        let mut markers = Vec::with_capacity(properties.len());
        for property in &properties {
            let options = js_sys::Object::new();
            js_sys::Reflect::set(&options, &"icon".into(), &icon)?;
            js_sys::Reflect::set(&options, &"title".into(), &property.name.as_str().into())?;
            let marker = leaflet::marker(&leaflet::lat_lng(property.lat, property.lng), &options);
            marker.add_to(&map);
            marker.bind_popup(&popup_html(property), &popup_options);
            markers.push(marker);
        }

        let area: Vec<[f64; 2]> = settings.area.iter().map(|(lat, lng)| [*lat, *lng]).collect();
        if !area.is_empty() {
            leaflet::polygon(
                &leaflet::options(&area),
                &leaflet::options(&leaflet::PathOptions {
                    color: AREA_COLOR,
                    fill_color: AREA_COLOR,
                    fill_opacity: 0.1,
                    weight: 1.0,
                    opacity: 0.3,
                }),
            )
            .add_to(&map);
        }

        let zoom = leaflet::ZoomOptions { position: "topright" };
        leaflet::zoom_control(&leaflet::options(&zoom)).add_control_to(&map);
        let attribution = leaflet::AttributionOptions { prefix: false };
        leaflet::attribution_control(&leaflet::options(&attribution))
            .add_attribution(&settings.credit)
            .add_control_to(&map);

        let inner = Rc::new(MapInner {
            map,
            settings,
            properties,
            markers,
            cards: dom::find_all(document, ".map-property-card"),
            selection: RefCell::new(MapSelection::new()),
            popup_timer: RefCell::new(None),
            resize_timer: RefCell::new(None),
        });

        let mut marker_handlers = Vec::with_capacity(inner.markers.len());
        for (property, marker) in inner.properties.iter().zip(&inner.markers) {
            let weak = Rc::downgrade(&inner);
            let id = property.id.clone();
            let handler = Closure::<dyn FnMut()>::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.select_marker(&id);
                }
            });
            marker.on("click", handler.as_ref().unchecked_ref());
            marker_handlers.push(handler);
        }

        let mut listeners = Vec::new();
        for card in &inner.cards {
            let this = inner.clone();
            let el = card.clone();
            listeners.push(Listener::new(card, "click", move |_| this.select_card(&el)));
        }

        let this = inner.clone();
        listeners.push(Listener::new(dom::window()?.as_ref(), "resize", move |_| this.schedule_refresh()));
        inner.schedule_refresh();

        log::info!("Property map bound with {} markers", inner.markers.len());
        Ok(Self {
            inner,
            _marker_handlers: marker_handlers,
            _listeners: listeners,
        })
    }

    /// Re-measure the container, e.g. after late layout changes
    pub fn refresh(&self) {
        self.inner.schedule_refresh();
    }

    pub fn teardown(&self) {
        self.inner.popup_timer.borrow_mut().take();
        self.inner.resize_timer.borrow_mut().take();
        self.inner.map.remove();
    }
}
