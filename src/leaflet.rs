//! Leaflet Bindings
//!
//! The subset of the global `L` namespace used by the property map. Option
//! objects are plain serde structs passed through `serde-wasm-bindgen`.

use serde::Serialize;
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

#[wasm_bindgen]
extern "C" {
    pub type LeafletMap;

    #[wasm_bindgen(catch, js_namespace = L, js_name = map)]
    pub fn create_map(container: &HtmlElement) -> Result<LeafletMap, JsValue>;

    #[wasm_bindgen(method, js_name = setView)]
    pub fn set_view(this: &LeafletMap, center: &JsValue, zoom: f64) -> LeafletMap;

    #[wasm_bindgen(method, js_name = invalidateSize)]
    pub fn invalidate_size(this: &LeafletMap);

    #[wasm_bindgen(method)]
    pub fn remove(this: &LeafletMap);

    #[derive(Clone)]
    pub type Layer;

    #[wasm_bindgen(method, js_name = addTo)]
    pub fn add_to(this: &Layer, map: &LeafletMap) -> Layer;

    #[wasm_bindgen(js_namespace = L, js_name = tileLayer)]
    pub fn tile_layer(url_template: &str, options: &JsValue) -> Layer;

    #[wasm_bindgen(js_namespace = L)]
    pub fn polygon(latlngs: &JsValue, options: &JsValue) -> Layer;

    #[wasm_bindgen(extends = Layer)]
    #[derive(Clone)]
    pub type Marker;

    #[wasm_bindgen(js_namespace = L)]
    pub fn marker(latlng: &JsValue, options: &JsValue) -> Marker;

    #[wasm_bindgen(method, js_name = bindPopup)]
    pub fn bind_popup(this: &Marker, content: &str, options: &JsValue) -> Marker;

    #[wasm_bindgen(method, js_name = openPopup)]
    pub fn open_popup(this: &Marker) -> Marker;

    #[wasm_bindgen(method)]
    pub fn on(this: &Marker, event: &str, handler: &js_sys::Function) -> Marker;

    #[wasm_bindgen(js_namespace = L, js_name = divIcon)]
    pub fn div_icon(options: &JsValue) -> JsValue;

    pub type Control;

    #[wasm_bindgen(js_namespace = ["L", "control"], js_name = zoom)]
    pub fn zoom_control(options: &JsValue) -> Control;

    #[wasm_bindgen(js_namespace = ["L", "control"], js_name = attribution)]
    pub fn attribution_control(options: &JsValue) -> Control;

    #[wasm_bindgen(method, js_name = addAttribution)]
    pub fn add_attribution(this: &Control, text: &str) -> Control;

    #[wasm_bindgen(method, js_name = addTo)]
    pub fn add_control_to(this: &Control, map: &LeafletMap) -> Control;
}

/// Whether the Leaflet script has been loaded on this page
pub fn is_available() -> bool {
    web_sys::window()
        .map(|w| js_sys::Reflect::has(&w, &JsValue::from_str("L")).unwrap_or(false))
        .unwrap_or(false)
}

/// Serialize an options struct for Leaflet. Falls back to `undefined`, which
/// Leaflet treats as "use defaults".
pub fn options<T: Serialize>(value: &T) -> JsValue {
    serde_wasm_bindgen::to_value(value).unwrap_or(JsValue::UNDEFINED)
}

pub fn lat_lng(lat: f64, lng: f64) -> JsValue {
    options(&[lat, lng])
}

// ========================
// Option structs
// ========================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TileOptions<'a> {
    pub attribution: &'a str,
    pub max_zoom: f64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DivIconOptions<'a> {
    pub class_name: &'a str,
    pub html: &'a str,
    pub icon_size: [u32; 2],
    pub icon_anchor: [u32; 2],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PopupOptions<'a> {
    pub max_width: u32,
    pub class_name: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PathOptions<'a> {
    pub color: &'a str,
    pub fill_color: &'a str,
    pub fill_opacity: f64,
    pub weight: f64,
    pub opacity: f64,
}

#[derive(Serialize)]
pub struct ZoomOptions<'a> {
    pub position: &'a str,
}

#[derive(Serialize)]
pub struct AttributionOptions {
    pub prefix: bool,
}
