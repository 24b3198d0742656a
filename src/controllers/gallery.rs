//! Gallery Modal
//!
//! Enlarged view of a gallery image with its caption.

use std::rc::Rc;

use web_sys::{Document, Element, HtmlElement, HtmlImageElement};

use super::modal::{Modal, OpenOptions, Presentation};
use crate::context::SiteContext;
use crate::dom::{self, DomResult, Listener};

struct GalleryView {
    root: HtmlElement,
    image: HtmlImageElement,
    caption: Option<Element>,
    close: Vec<Element>,
}

impl GalleryView {
    fn resolve(document: &Document) -> DomResult<Self> {
        let root: HtmlElement = dom::require_id(document, "galleryModal")?;
        Ok(Self {
            image: dom::require(&root, ".gallery-modal-img")?,
            caption: dom::find(&root, ".gallery-modal-caption"),
            close: dom::find_all(&root, ".gallery-modal-close"),
            root,
        })
    }
}

struct GalleryInner {
    view: GalleryView,
    modal: Modal,
}

impl GalleryInner {
    fn show(&self, item: &Element) {
        let Some(image) = dom::find::<HtmlImageElement>(item, "img") else {
            return;
        };
        let caption = dom::find::<Element>(item, ".gallery-text")
            .and_then(|el| el.text_content())
            .map(|t| t.trim().to_string())
            .unwrap_or_default();

        self.view.image.set_src(&image.src());
        self.view.image.set_alt(&caption);
        if let Some(slot) = &self.view.caption {
            slot.set_text_content(Some(&caption));
        }
        self.modal.open(OpenOptions::default());
    }
}

pub struct Gallery {
    inner: Rc<GalleryInner>,
    _listeners: Vec<Listener>,
}

impl Gallery {
    pub fn bind(ctx: &SiteContext, document: &Document) -> DomResult<Self> {
        let view = GalleryView::resolve(document)?;
        let modal = Modal::new("gallery", view.root.clone(), Presentation::DisplayFlex, ctx);
        let inner = Rc::new(GalleryInner { view, modal });

        let backdrop: Element = inner.view.root.clone().into();
        let mut listeners = inner.modal.bind_dismiss(&inner.view.close, Some(&backdrop));

        let items = dom::find_all::<Element>(document, ".gallery-item");
        for item in &items {
            let this = inner.clone();
            let el = item.clone();
            listeners.push(Listener::new(item, "click", move |_| this.show(&el)));
        }

        log::info!("Gallery bound with {} items", items.len());
        Ok(Self {
            inner,
            _listeners: listeners,
        })
    }

    pub fn teardown(&self) {
        self.inner.modal.teardown();
    }
}
