//! DOM Helpers
//!
//! Typed lookups against the server-rendered markup and listener handles
//! that detach themselves when dropped.

use thiserror::Error;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, Event, EventTarget, HtmlElement, NodeList, Window};

#[derive(Debug, Error)]
pub enum DomError {
    #[error("no global window")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("missing element `{0}`")]
    MissingElement(String),
    #[error("element `{selector}` is not a {expected}")]
    WrongElementType {
        selector: String,
        expected: &'static str,
    },
    #[error("js error: {0}")]
    Js(String),
}

impl From<JsValue> for DomError {
    fn from(value: JsValue) -> Self {
        DomError::Js(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
    }
}

pub type DomResult<T> = Result<T, DomError>;

pub fn window() -> DomResult<Window> {
    web_sys::window().ok_or(DomError::NoWindow)
}

pub fn document() -> DomResult<Document> {
    window()?.document().ok_or(DomError::NoDocument)
}

pub fn body() -> DomResult<HtmlElement> {
    document()?
        .body()
        .ok_or_else(|| DomError::MissingElement("body".into()))
}

// ========================
// Lookups
// ========================

/// Anything that supports `querySelector` / `querySelectorAll`
pub trait QueryRoot {
    fn select(&self, selector: &str) -> Result<Option<Element>, JsValue>;
    fn select_all(&self, selector: &str) -> Result<NodeList, JsValue>;
}

impl QueryRoot for Document {
    fn select(&self, selector: &str) -> Result<Option<Element>, JsValue> {
        self.query_selector(selector)
    }

    fn select_all(&self, selector: &str) -> Result<NodeList, JsValue> {
        self.query_selector_all(selector)
    }
}

impl QueryRoot for Element {
    fn select(&self, selector: &str) -> Result<Option<Element>, JsValue> {
        self.query_selector(selector)
    }

    fn select_all(&self, selector: &str) -> Result<NodeList, JsValue> {
        self.query_selector_all(selector)
    }
}

impl QueryRoot for HtmlElement {
    fn select(&self, selector: &str) -> Result<Option<Element>, JsValue> {
        self.query_selector(selector)
    }

    fn select_all(&self, selector: &str) -> Result<NodeList, JsValue> {
        self.query_selector_all(selector)
    }
}

impl QueryRoot for web_sys::HtmlFormElement {
    fn select(&self, selector: &str) -> Result<Option<Element>, JsValue> {
        self.query_selector(selector)
    }

    fn select_all(&self, selector: &str) -> Result<NodeList, JsValue> {
        self.query_selector_all(selector)
    }
}

impl QueryRoot for web_sys::HtmlButtonElement {
    fn select(&self, selector: &str) -> Result<Option<Element>, JsValue> {
        self.query_selector(selector)
    }

    fn select_all(&self, selector: &str) -> Result<NodeList, JsValue> {
        self.query_selector_all(selector)
    }
}

/// First match for `selector`, cast to `T`. Invalid selectors and wrong
/// element types both read as "not there".
pub fn find<T: JsCast>(root: &impl QueryRoot, selector: &str) -> Option<T> {
    root.select(selector)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<T>().ok())
}

/// Like `find`, but a missing element is an error
pub fn require<T: JsCast>(root: &impl QueryRoot, selector: &str) -> DomResult<T> {
    let element = root
        .select(selector)?
        .ok_or_else(|| DomError::MissingElement(selector.to_string()))?;
    element.dyn_into::<T>().map_err(|_| DomError::WrongElementType {
        selector: selector.to_string(),
        expected: std::any::type_name::<T>(),
    })
}

/// Element with the given id, cast to `T`
pub fn require_id<T: JsCast>(document: &Document, id: &str) -> DomResult<T> {
    let element = document
        .get_element_by_id(id)
        .ok_or_else(|| DomError::MissingElement(format!("#{}", id)))?;
    element.dyn_into::<T>().map_err(|_| DomError::WrongElementType {
        selector: format!("#{}", id),
        expected: std::any::type_name::<T>(),
    })
}

pub fn find_id<T: JsCast>(document: &Document, id: &str) -> Option<T> {
    require_id(document, id).ok()
}

/// All matches for `selector` that are of type `T`, in document order
pub fn find_all<T: JsCast>(root: &impl QueryRoot, selector: &str) -> Vec<T> {
    let Ok(list) = root.select_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<T>().ok())
        .collect()
}

// ========================
// Classes and styles
// ========================

pub fn add_class(element: &Element, class: &str) {
    let _ = element.class_list().add_1(class);
}

pub fn remove_class(element: &Element, class: &str) {
    let _ = element.class_list().remove_1(class);
}

pub fn has_class(element: &Element, class: &str) -> bool {
    element.class_list().contains(class)
}

pub fn set_class(element: &Element, class: &str, on: bool) {
    if on {
        add_class(element, class);
    } else {
        remove_class(element, class);
    }
}

pub fn set_style(element: &HtmlElement, property: &str, value: &str) {
    let _ = element.style().set_property(property, value);
}

pub fn clear_style(element: &HtmlElement, property: &str) {
    let _ = element.style().remove_property(property);
}

/// True when `target` is exactly `element`, not a descendant of it
pub fn is_same_node(target: Option<EventTarget>, element: &Element) -> bool {
    target
        .map(|t| js_sys::Object::is(&t, element))
        .unwrap_or(false)
}

/// Whether `target` sits inside `container` (or is it)
pub fn contains_target(container: &Element, target: Option<EventTarget>) -> bool {
    target
        .and_then(|t| t.dyn_into::<web_sys::Node>().ok())
        .map(|node| container.contains(Some(&node)))
        .unwrap_or(false)
}

pub fn prefers_reduced_motion() -> bool {
    window()
        .ok()
        .and_then(|w| w.match_media("(prefers-reduced-motion: reduce)").ok().flatten())
        .map(|mql| mql.matches())
        .unwrap_or(false)
}

pub fn scroll_y() -> f64 {
    window().ok().and_then(|w| w.scroll_y().ok()).unwrap_or(0.0)
}

pub fn inner_width() -> f64 {
    window()
        .ok()
        .and_then(|w| w.inner_width().ok())
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0)
}

pub fn inner_height() -> f64 {
    window()
        .ok()
        .and_then(|w| w.inner_height().ok())
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0)
}

/// Smooth scroll of the window to `top`
pub fn smooth_scroll_to(top: f64) {
    if let Ok(win) = window() {
        let options = web_sys::ScrollToOptions::new();
        options.set_top(top.max(0.0));
        options.set_behavior(web_sys::ScrollBehavior::Smooth);
        win.scroll_to_with_scroll_to_options(&options);
    }
}

/// Smooth scroll so that `element` sits `offset` pixels below the top
pub fn smooth_scroll_to_element(element: &Element, offset: f64) {
    let top = element.get_bounding_client_rect().top() + scroll_y() - offset;
    smooth_scroll_to(top);
}

// ========================
// Listeners
// ========================

/// An attached event listener. Dropping it removes the listener.
pub struct Listener {
    target: EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

impl Listener {
    pub fn new<F>(target: &EventTarget, event: &'static str, handler: F) -> Self
    where
        F: FnMut(Event) + 'static,
    {
        let closure = Closure::<dyn FnMut(Event)>::new(handler);
        let _ = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
        Self {
            target: target.clone(),
            event,
            closure,
        }
    }

    /// Listener whose handler receives the event cast to `E`.
    /// Events of another type are ignored.
    pub fn typed<E, F>(target: &EventTarget, event: &'static str, mut handler: F) -> Self
    where
        E: JsCast,
        F: FnMut(E) + 'static,
    {
        Self::new(target, event, move |ev: Event| {
            if let Ok(ev) = ev.dyn_into::<E>() {
                handler(ev);
            }
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
    }
}

// ========================
// Viewport observation
// ========================

/// IntersectionObserver that calls back for each element entering the
/// viewport. Dropping it disconnects the observer.
pub struct ViewportObserver {
    observer: web_sys::IntersectionObserver,
    _callback: Closure<dyn FnMut(js_sys::Array, web_sys::IntersectionObserver)>,
}

impl ViewportObserver {
    /// With `once`, an element is unobserved after its first entry
    pub fn new<F>(threshold: f64, root_margin: &str, once: bool, mut on_enter: F) -> DomResult<Self>
    where
        F: FnMut(&Element) + 'static,
    {
        let callback = Closure::<dyn FnMut(js_sys::Array, web_sys::IntersectionObserver)>::new(
            move |entries: js_sys::Array, observer: web_sys::IntersectionObserver| {
                for entry in entries.iter() {
                    let entry: web_sys::IntersectionObserverEntry = entry.unchecked_into();
                    if !entry.is_intersecting() {
                        continue;
                    }
                    let target = entry.target();
                    on_enter(&target);
                    if once {
                        observer.unobserve(&target);
                    }
                }
            },
        );
        let options = web_sys::IntersectionObserverInit::new();
        options.set_threshold(&JsValue::from_f64(threshold));
        options.set_root_margin(root_margin);
        let observer = web_sys::IntersectionObserver::new_with_options(
            callback.as_ref().unchecked_ref(),
            &options,
        )?;
        Ok(Self {
            observer,
            _callback: callback,
        })
    }

    pub fn observe(&self, element: &Element) {
        self.observer.observe(element);
    }
}

impl Drop for ViewportObserver {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

/// Read the `value` of an input, select or textarea
pub fn field_value(element: &Element) -> String {
    if let Some(input) = element.dyn_ref::<web_sys::HtmlInputElement>() {
        input.value()
    } else if let Some(select) = element.dyn_ref::<web_sys::HtmlSelectElement>() {
        select.value()
    } else if let Some(area) = element.dyn_ref::<web_sys::HtmlTextAreaElement>() {
        area.value()
    } else {
        element.text_content().unwrap_or_default()
    }
}

pub fn set_field_value(element: &Element, value: &str) {
    if let Some(input) = element.dyn_ref::<web_sys::HtmlInputElement>() {
        input.set_value(value);
    } else if let Some(select) = element.dyn_ref::<web_sys::HtmlSelectElement>() {
        select.set_value(value);
    } else if let Some(area) = element.dyn_ref::<web_sys::HtmlTextAreaElement>() {
        area.set_value(value);
    }
}
