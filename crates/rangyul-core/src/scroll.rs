//! Scroll and Viewport Rules

/// Page scroll progress in percent, clamped to 0..=100.
/// A page that cannot scroll reports 0.
pub fn progress_percent(scroll_y: f64, scroll_height: f64, viewport_height: f64) -> f64 {
    let scrollable = scroll_height - viewport_height;
    if scrollable <= 0.0 || !scrollable.is_finite() {
        return 0.0;
    }
    (scroll_y / scrollable * 100.0).clamp(0.0, 100.0)
}

pub fn header_scrolled(scroll_y: f64, threshold: f64) -> bool {
    scroll_y > threshold
}

pub fn back_to_top_visible(scroll_y: f64, threshold: f64) -> bool {
    scroll_y > threshold
}

/// The mobile menu is forced closed once the viewport is wider than the breakpoint
pub fn menu_should_collapse(viewport_width: f64, breakpoint: f64) -> bool {
    viewport_width > breakpoint
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress() {
        assert_eq!(progress_percent(0.0, 3000.0, 1000.0), 0.0);
        assert_eq!(progress_percent(1000.0, 3000.0, 1000.0), 50.0);
        assert_eq!(progress_percent(2500.0, 3000.0, 1000.0), 100.0);
        assert_eq!(progress_percent(10.0, 800.0, 1000.0), 0.0);
    }

    #[test]
    fn test_thresholds_are_strict() {
        assert!(!header_scrolled(100.0, 100.0));
        assert!(header_scrolled(101.0, 100.0));
        assert!(!back_to_top_visible(300.0, 300.0));
        assert!(menu_should_collapse(769.0, 768.0));
        assert!(!menu_should_collapse(768.0, 768.0));
    }
}
