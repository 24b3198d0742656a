//! Carousel State
//!
//! Timed rotation over a fixed number of slides. The timer itself is an
//! opaque handle supplied by the caller; dropping the handle must cancel it.
//! In the browser that handle is a `gloo_timers::callback::Interval`.

/// Rotation state for one carousel element.
///
/// Holds at most one timer handle. Every `start` drops the previous handle
/// before installing a new one, so repeated hover events never stack timers.
#[derive(Debug)]
pub struct Carousel<H> {
    len: usize,
    active: usize,
    interval_ms: u32,
    paused: bool,
    timer: Option<H>,
}

impl<H> Carousel<H> {
    /// Create state for `len` slides. Returns `None` when there is nothing
    /// to rotate.
    pub fn new(len: usize, interval_ms: u32) -> Option<Self> {
        if len == 0 {
            return None;
        }
        Some(Self {
            len,
            active: 0,
            interval_ms,
            paused: false,
            timer: None,
        })
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn active(&self) -> usize {
        self.active
    }

    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Whether a timer handle is currently held
    pub fn is_running(&self) -> bool {
        self.timer.is_some()
    }

    /// Only carousels with more than one slide ever rotate
    pub fn rotates(&self) -> bool {
        self.len > 1
    }

    /// Make `index` (wrapped into range) the single active slide.
    /// Returns the resulting active index.
    pub fn show_slide(&mut self, index: usize) -> usize {
        self.active = index % self.len;
        self.active
    }

    /// Advance to `(active + 1) mod len`
    pub fn next_slide(&mut self) -> usize {
        self.show_slide(self.active + 1)
    }

    /// Step back one slide, wrapping to the end
    pub fn prev_slide(&mut self) -> usize {
        self.show_slide(self.active + self.len - 1)
    }

    /// Install a fresh timer built by `spawn(interval_ms)`.
    ///
    /// Any existing handle is dropped first. Single-slide carousels never
    /// start; returns whether a timer is now running.
    pub fn start<F>(&mut self, spawn: F) -> bool
    where
        F: FnOnce(u32) -> H,
    {
        self.timer = None;
        self.paused = false;
        if !self.rotates() {
            return false;
        }
        self.timer = Some(spawn(self.interval_ms));
        true
    }

    /// Drop the pending timer, if any. Safe to call repeatedly.
    pub fn stop(&mut self) {
        self.timer = None;
        self.paused = true;
    }

    /// Pointer entered the carousel
    pub fn hover_in(&mut self) {
        self.stop();
    }

    /// Pointer left the carousel
    pub fn hover_out<F>(&mut self, spawn: F) -> bool
    where
        F: FnOnce(u32) -> H,
    {
        self.start(spawn)
    }

    /// Release the timer for good. The state can still be restarted.
    pub fn teardown(&mut self) {
        self.timer = None;
        self.paused = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Counts how many handles are alive at once
    struct FakeTimer {
        live: Rc<Cell<usize>>,
    }

    impl FakeTimer {
        fn spawn(live: &Rc<Cell<usize>>) -> impl FnOnce(u32) -> FakeTimer {
            let live = live.clone();
            move |_ms| {
                live.set(live.get() + 1);
                FakeTimer { live }
            }
        }
    }

    impl Drop for FakeTimer {
        fn drop(&mut self) {
            self.live.set(self.live.get() - 1);
        }
    }

    #[test]
    fn test_empty_carousel_is_not_created() {
        assert!(Carousel::<FakeTimer>::new(0, 5000).is_none());
    }

    #[test]
    fn test_next_slide_cycles_through_all_indices() {
        let mut carousel = Carousel::<FakeTimer>::new(4, 5000).unwrap();
        let seen: Vec<usize> = (0..9).map(|_| carousel.next_slide()).collect();
        assert_eq!(seen, vec![1, 2, 3, 0, 1, 2, 3, 0, 1]);
        assert!(carousel.active() < carousel.len());
    }

    #[test]
    fn test_show_slide_wraps_out_of_range_index() {
        let mut carousel = Carousel::<FakeTimer>::new(3, 5000).unwrap();
        assert_eq!(carousel.show_slide(7), 1);
        assert_eq!(carousel.prev_slide(), 0);
        assert_eq!(carousel.prev_slide(), 2);
    }

    #[test]
    fn test_single_slide_never_starts() {
        let live = Rc::new(Cell::new(0));
        let mut carousel = Carousel::new(1, 5000).unwrap();
        assert!(!carousel.start(FakeTimer::spawn(&live)));
        assert_eq!(live.get(), 0);
        assert_eq!(carousel.next_slide(), 0);
    }

    #[test]
    fn test_repeated_stop_leaves_no_timers() {
        let live = Rc::new(Cell::new(0));
        let mut carousel = Carousel::new(3, 7000).unwrap();
        carousel.start(FakeTimer::spawn(&live));
        assert_eq!(live.get(), 1);
        for _ in 0..5 {
            carousel.stop();
        }
        assert_eq!(live.get(), 0);
        assert!(!carousel.is_running());
        assert!(carousel.is_paused());
    }

    #[test]
    fn test_hover_cycles_keep_exactly_one_timer() {
        let live = Rc::new(Cell::new(0));
        let mut carousel = Carousel::new(3, 7000).unwrap();
        carousel.start(FakeTimer::spawn(&live));
        for _ in 0..100 {
            carousel.hover_in();
            carousel.hover_out(FakeTimer::spawn(&live));
        }
        assert_eq!(live.get(), 1);
        assert!(carousel.is_running());
    }

    #[test]
    fn test_restart_without_stop_replaces_timer() {
        let live = Rc::new(Cell::new(0));
        let mut carousel = Carousel::new(2, 7000).unwrap();
        for _ in 0..10 {
            carousel.start(FakeTimer::spawn(&live));
        }
        assert_eq!(live.get(), 1);
        carousel.teardown();
        assert_eq!(live.get(), 0);
    }
}
