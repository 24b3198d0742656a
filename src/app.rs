//! Rangyul Site Runtime
//!
//! Builds every controller the current page supports, keeps them alive in a
//! thread-local and tears them down when the page is hidden.

use std::cell::RefCell;

use rangyul_core::SiteConfig;
use web_sys::Document;

use crate::context::SiteContext;
use crate::controllers::{
    CarouselRegistry, ContactPage, Gallery, MobileMenu, PageChrome, PropertyMap, PropertyPins,
    QuickBooking, RoomBooking, ScrollEffects, StatsCounters,
};
use crate::dom::{self, DomError, DomResult, Listener};

const CONFIG_ELEMENT_ID: &str = "site-config";

thread_local! {
    static SITE: RefCell<Option<Site>> = const { RefCell::new(None) };
    static LIFECYCLE: RefCell<Vec<Listener>> = const { RefCell::new(Vec::new()) };
}

/// Every controller bound on the current page
pub struct Site {
    document: Document,
    chrome: PageChrome,
    menu: Option<MobileMenu>,
    carousels: CarouselRegistry,
    quick_booking: Option<QuickBooking>,
    room_booking: Option<RoomBooking>,
    gallery: Option<Gallery>,
    contact: Option<ContactPage>,
    _pins: Option<PropertyPins>,
    scroll: Option<ScrollEffects>,
    stats: Option<StatsCounters>,
    map: Option<PropertyMap>,
}

/// A controller whose markup is absent is skipped, not an error
fn optional<T>(name: &str, result: DomResult<T>) -> Option<T> {
    match result {
        Ok(controller) => Some(controller),
        Err(DomError::MissingElement(what)) => {
            log::debug!("{} skipped: missing {}", name, what);
            None
        }
        Err(e) => {
            log::warn!("{} not bound: {}", name, e);
            None
        }
    }
}

impl Site {
    pub fn boot(ctx: &SiteContext) -> DomResult<Self> {
        let document = dom::document()?;

        let mut carousels = CarouselRegistry::new(ctx);
        carousels.bind_hero(&document);
        carousels.bind_property_cards(&document);

        let site = Self {
            chrome: PageChrome::bind(ctx, &document),
            menu: optional("Mobile menu", MobileMenu::bind(ctx, &document)),
            carousels,
            quick_booking: optional("Quick booking", QuickBooking::bind(ctx, &document)),
            room_booking: optional("Room booking", RoomBooking::bind(ctx, &document)),
            gallery: optional("Gallery", Gallery::bind(ctx, &document)),
            contact: optional("Contact form", ContactPage::bind(ctx, &document)),
            _pins: PropertyPins::bind(ctx, &document),
            scroll: optional("Scroll effects", ScrollEffects::bind(ctx, &document)),
            stats: optional("Stats counters", StatsCounters::bind(&document)).flatten(),
            map: optional("Property map", PropertyMap::bind(ctx, &document)),
            document,
        };
        log::info!(
            "Site ready: {} carousels ({} rotating)",
            site.carousels.len(),
            site.carousels.running()
        );
        Ok(site)
    }

    /// Window `load`: late images and layout are in. Binding property
    /// sliders again only picks up cards that were not bound before.
    pub fn on_full_load(&mut self) {
        self.chrome.mark_loaded();
        self.carousels.bind_property_cards(&self.document);
        if let Some(map) = &self.map {
            map.refresh();
        }
        log::debug!("Full load handled, {} rotating carousels", self.carousels.running());
    }

    pub fn teardown(&mut self) {
        self.carousels.teardown();
        if let Some(menu) = &self.menu {
            menu.teardown();
        }
        if let Some(booking) = &self.quick_booking {
            booking.teardown();
        }
        if let Some(booking) = &self.room_booking {
            booking.teardown();
        }
        if let Some(gallery) = &self.gallery {
            gallery.teardown();
        }
        if let Some(contact) = &self.contact {
            contact.teardown();
        }
        if let Some(scroll) = &self.scroll {
            scroll.teardown();
        }
        if let Some(stats) = &self.stats {
            stats.teardown();
        }
        if let Some(map) = &self.map {
            map.teardown();
        }
        log::info!("Site torn down");
    }
}

/// Site configuration from the embedded JSON block, or the defaults
pub fn load_site_config() -> SiteConfig {
    let Some(json) = dom::document()
        .ok()
        .and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
        .and_then(|el| el.text_content())
    else {
        return SiteConfig::default();
    };
    match SiteConfig::from_json(&json) {
        Ok(config) => {
            log::info!("Loaded site config for {}", config.brand);
            config
        }
        Err(e) => {
            log::warn!("{}; using defaults", e);
            SiteConfig::default()
        }
    }
}

/// Boot now, or once the DOM is parsed, and hook the page lifecycle
pub fn start(ctx: SiteContext) -> DomResult<()> {
    let window = dom::window()?;
    let document = dom::document()?;
    let mut listeners = Vec::new();

    if document.ready_state() == "loading" {
        let boot_ctx = ctx.clone();
        listeners.push(Listener::new(&document, "DOMContentLoaded", move |_| boot(&boot_ctx)));
    } else {
        boot(&ctx);
    }

    if document.ready_state() == "complete" {
        with_site(Site::on_full_load);
    } else {
        listeners.push(Listener::new(&window, "load", |_| with_site(Site::on_full_load)));
    }

    let hide_ctx = ctx.clone();
    listeners.push(Listener::new(&window, "pagehide", move |_| {
        SITE.with(|site| {
            if let Some(mut site) = site.borrow_mut().take() {
                site.teardown();
            }
        });
        hide_ctx.notifier.clear();
    }));

    // back/forward cache restore after a pagehide teardown
    let show_ctx = ctx.clone();
    listeners.push(Listener::new(&window, "pageshow", move |_| boot(&show_ctx)));

    LIFECYCLE.with(|lifecycle| lifecycle.borrow_mut().extend(listeners));
    Ok(())
}

fn boot(ctx: &SiteContext) {
    SITE.with(|site| {
        if site.borrow().is_some() {
            return;
        }
        match Site::boot(ctx) {
            Ok(booted) => *site.borrow_mut() = Some(booted),
            Err(e) => log::error!("Site failed to start: {}", e),
        }
    });
}

fn with_site<F: FnOnce(&mut Site)>(f: F) {
    SITE.with(|site| {
        if let Some(site) = site.borrow_mut().as_mut() {
            f(site);
        }
    });
}
