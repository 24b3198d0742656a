//! Slide Decks
//!
//! Binds the hero banner and every property card slider to a `Carousel`
//! whose timer is a `gloo_timers` interval. Decks are registered by host
//! element so a second binding pass leaves running decks alone.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Interval;
use rangyul_core::{Carousel, KeyedRegistry};
use web_sys::{Document, Element, HtmlElement};

use crate::context::SiteContext;
use crate::dom::{self, Listener};

/// How a slide is marked active
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SlideStyle {
    /// `active` class
    Class,
    /// `active` class plus inline opacity
    ClassAndOpacity,
}

type DeckState = Rc<RefCell<Carousel<Interval>>>;

/// One bound carousel
pub struct SlideDeck {
    state: DeckState,
    _listeners: Vec<Listener>,
}

impl SlideDeck {
    fn bind(
        hover_target: &Element,
        slides: Vec<HtmlElement>,
        interval_ms: u32,
        style: SlideStyle,
    ) -> Option<Self> {
        let carousel = Carousel::new(slides.len(), interval_ms)?;
        let slides = Rc::new(slides);
        let state: DeckState = Rc::new(RefCell::new(carousel));

        show(&slides, state.borrow_mut().show_slide(0), style);
        start(&state, &slides, style);

        let mut listeners = Vec::new();
        if state.borrow().rotates() {
            let enter_state = state.clone();
            listeners.push(Listener::new(hover_target, "mouseenter", move |_| {
                enter_state.borrow_mut().hover_in();
            }));

            let leave_state = state.clone();
            let leave_slides = slides.clone();
            listeners.push(Listener::new(hover_target, "mouseleave", move |_| {
                start(&leave_state, &leave_slides, style);
            }));
        }

        Some(Self {
            state,
            _listeners: listeners,
        })
    }

    pub fn is_running(&self) -> bool {
        self.state.borrow().is_running()
    }

    fn teardown(self) {
        self.state.borrow_mut().teardown();
    }
}

/// (Re)start rotation; the carousel drops any previous interval first
fn start(state: &DeckState, slides: &Rc<Vec<HtmlElement>>, style: SlideStyle) {
    let weak = Rc::downgrade(state);
    let slides = slides.clone();
    state.borrow_mut().hover_out(move |ms| {
        Interval::new(ms, move || {
            if let Some(state) = weak.upgrade() {
                let index = state.borrow_mut().next_slide();
                show(&slides, index, style);
            }
        })
    });
}

/// Exactly one slide carries `active`
fn show(slides: &[HtmlElement], index: usize, style: SlideStyle) {
    for (i, slide) in slides.iter().enumerate() {
        let on = i == index;
        dom::set_class(slide, "active", on);
        if style == SlideStyle::ClassAndOpacity {
            dom::set_style(slide, "opacity", if on { "1" } else { "0" });
        }
    }
}

/// Every deck on the page, keyed by its host element
pub struct CarouselRegistry {
    decks: KeyedRegistry<Element, SlideDeck>,
    hero_interval_ms: u32,
    property_interval_ms: u32,
    glow: KeyedRegistry<Element, Vec<Listener>>,
}

impl CarouselRegistry {
    pub fn new(ctx: &SiteContext) -> Self {
        Self {
            decks: KeyedRegistry::new(),
            hero_interval_ms: ctx.config.sliders.hero_interval_ms,
            property_interval_ms: ctx.config.sliders.property_interval_ms,
            glow: KeyedRegistry::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.decks.len()
    }

    /// Bind the hero banner if present
    pub fn bind_hero(&mut self, document: &Document) {
        let slides: Vec<HtmlElement> = dom::find_all(document, ".hero-slide");
        let Some(host) = dom::find::<Element>(document, ".hero-slider")
            .or_else(|| slides.first().and_then(|s| s.parent_element()))
        else {
            return;
        };
        let interval = self.hero_interval_ms;
        if self.decks.insert_once(host, |host| {
            SlideDeck::bind(host, slides, interval, SlideStyle::Class)
        }) {
            log::info!("Hero slider bound");
        }
    }

    /// Bind every property card slider not bound yet. Safe to call again
    /// after the window load event.
    pub fn bind_property_cards(&mut self, document: &Document) {
        let interval = self.property_interval_ms;
        let mut bound = 0;
        for card in dom::find_all::<Element>(document, ".property-card") {
            self.glow.insert_once(card.clone(), bind_glow);
            let slides: Vec<HtmlElement> = dom::find_all(&card, ".property-slide");
            if self.decks.insert_once(card.clone(), |card| {
                SlideDeck::bind(card, slides, interval, SlideStyle::ClassAndOpacity)
            }) {
                bound += 1;
            }
        }
        if bound > 0 {
            log::info!("Bound {} property sliders", bound);
        }
    }

    /// Decks with a live timer
    pub fn running(&self) -> usize {
        self.decks.values().filter(|d| d.is_running()).count()
    }

    pub fn teardown(&mut self) {
        self.glow.drain_with(drop);
        self.decks.drain_with(SlideDeck::teardown);
    }
}

/// Hover glow on a property card
fn bind_glow(card: &Element) -> Option<Vec<Listener>> {
    let glow = dom::find::<HtmlElement>(card, ".property-glow")?;
    let on = glow.clone();
    Some(vec![
        Listener::new(card, "mouseenter", move |_| {
            dom::set_style(&on, "opacity", "0.8");
        }),
        Listener::new(card, "mouseleave", move |_| {
            dom::set_style(&glow, "opacity", "0.3");
        }),
    ])
}
