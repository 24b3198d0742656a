//! Stats Counter
//!
//! Linear count-up from zero to a target over a fixed number of ticks.

/// How intermediate values are rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterStyle {
    /// Always a whole number (floor)
    Integer,
    /// One decimal place when the target itself is fractional
    DecimalAware,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CounterAnimation {
    target: f64,
    steps: u32,
    step: u32,
    style: CounterStyle,
}

impl CounterAnimation {
    /// `duration_ms / tick_ms` ticks, at least one
    pub fn new(target: f64, duration_ms: u32, tick_ms: u32, style: CounterStyle) -> Self {
        let steps = (duration_ms / tick_ms.max(1)).max(1);
        Self {
            target: if target.is_finite() { target.max(0.0) } else { 0.0 },
            steps,
            step: 0,
            style,
        }
    }

    pub fn steps(&self) -> u32 {
        self.steps
    }

    pub fn is_finished(&self) -> bool {
        self.step >= self.steps
    }

    /// Value after the current number of ticks
    pub fn value(&self) -> f64 {
        if self.is_finished() {
            self.target
        } else {
            self.target * f64::from(self.step) / f64::from(self.steps)
        }
    }

    /// Advance one tick and return the text to display
    pub fn tick(&mut self) -> String {
        if !self.is_finished() {
            self.step += 1;
        }
        self.display()
    }

    /// Jump straight to the target (reduced motion)
    pub fn finish(&mut self) -> String {
        self.step = self.steps;
        self.display()
    }

    pub fn display(&self) -> String {
        let value = self.value();
        match self.style {
            CounterStyle::DecimalAware if self.target.fract() != 0.0 => format!("{:.1}", value),
            _ => format!("{}", value.floor() as u64),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_counter_reaches_target_exactly() {
        let mut counter = CounterAnimation::new(250.0, 2000, 16, CounterStyle::Integer);
        assert_eq!(counter.steps(), 125);
        assert_eq!(counter.display(), "0");
        let mut last = String::new();
        while !counter.is_finished() {
            last = counter.tick();
        }
        assert_eq!(last, "250");
        // further ticks are harmless
        assert_eq!(counter.tick(), "250");
    }

    #[test]
    fn test_values_are_monotonic() {
        let mut counter = CounterAnimation::new(15.0, 2000, 50, CounterStyle::Integer);
        let mut previous = 0.0;
        for _ in 0..counter.steps() {
            counter.tick();
            assert!(counter.value() >= previous);
            previous = counter.value();
        }
    }

    #[test]
    fn test_decimal_target_keeps_one_place() {
        let mut counter = CounterAnimation::new(4.8, 2000, 50, CounterStyle::DecimalAware);
        assert_eq!(counter.tick(), "0.1");
        assert_eq!(counter.finish(), "4.8");

        let mut whole = CounterAnimation::new(12.0, 2000, 50, CounterStyle::DecimalAware);
        assert_eq!(whole.finish(), "12");
    }

    #[test]
    fn test_bad_target_is_zero() {
        let mut counter = CounterAnimation::new(f64::NAN, 2000, 16, CounterStyle::Integer);
        assert_eq!(counter.finish(), "0");
    }
}
