//! Stats Counters
//!
//! Count-up animation for `.stat-number` elements, started once each
//! counter is half visible. `data-count` counters are whole numbers on a
//! 16 ms frame; `data-value` counters step every 50 ms and keep one decimal
//! when the target is fractional.

use std::cell::Cell;
use std::rc::Rc;

use gloo_timers::future::TimeoutFuture;
use leptos::task::spawn_local;
use rangyul_core::{CounterAnimation, CounterStyle};
use web_sys::{Document, Element};

use crate::dom::{self, DomResult, ViewportObserver};

const DURATION_MS: u32 = 2000;
const FRAME_MS: u32 = 16;
const STEP_MS: u32 = 50;
const THRESHOLD: f64 = 0.5;
const ROOT_MARGIN: &str = "0px 0px 50px 0px";

/// Read the counter's target and timing from its data attributes
fn counter_for(element: &Element) -> Option<(CounterAnimation, u32)> {
    if let Some(count) = element.get_attribute("data-count") {
        let target = count.trim().parse::<f64>().ok()?;
        return Some((
            CounterAnimation::new(target, DURATION_MS, FRAME_MS, CounterStyle::Integer),
            FRAME_MS,
        ));
    }
    let value = element.get_attribute("data-value")?;
    let target = value.trim().parse::<f64>().ok()?;
    Some((
        CounterAnimation::new(target, DURATION_MS, STEP_MS, CounterStyle::DecimalAware),
        STEP_MS,
    ))
}

/// Run one counter to completion; stops early once `alive` is cleared
fn run_counter(element: Element, alive: Rc<Cell<bool>>) {
    let Some((mut counter, tick_ms)) = counter_for(&element) else {
        log::debug!("Stat counter without a numeric target skipped");
        return;
    };
    if dom::prefers_reduced_motion() {
        element.set_text_content(Some(&counter.finish()));
        return;
    }
    spawn_local(async move {
        while alive.get() && !counter.is_finished() {
            TimeoutFuture::new(tick_ms).await;
            element.set_text_content(Some(&counter.tick()));
        }
    });
}

pub struct StatsCounters {
    alive: Rc<Cell<bool>>,
    _observer: ViewportObserver,
}

impl StatsCounters {
    pub fn bind(document: &Document) -> DomResult<Option<Self>> {
        let stats = dom::find_all::<Element>(
            document,
            ".stat-number[data-count], .stat-number[data-value]",
        );
        if stats.is_empty() {
            return Ok(None);
        }

        let alive = Rc::new(Cell::new(true));
        let run_alive = alive.clone();
        let observer = ViewportObserver::new(THRESHOLD, ROOT_MARGIN, true, move |target| {
            run_counter(target.clone(), run_alive.clone());
        })?;
        for stat in &stats {
            stat.set_text_content(Some("0"));
            observer.observe(stat);
        }

        log::info!("Stats counters bound: {}", stats.len());
        Ok(Some(Self {
            alive,
            _observer: observer,
        }))
    }

    pub fn teardown(&self) {
        self.alive.set(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_counter_has_125_steps() {
        let counter = CounterAnimation::new(150.0, DURATION_MS, FRAME_MS, CounterStyle::Integer);
        assert_eq!(counter.steps(), 125);
    }

    #[test]
    fn test_step_counter_has_40_steps() {
        let counter = CounterAnimation::new(4.5, DURATION_MS, STEP_MS, CounterStyle::DecimalAware);
        assert_eq!(counter.steps(), 40);
    }
}
