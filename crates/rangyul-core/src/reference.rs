//! Contact Page Helpers
//!
//! Reference ids shown in the success modal and the message length meter.

/// `RHG-<year>-<NNN>` where `n` is reduced to three digits
pub fn reference_id(year: i32, n: u32) -> String {
    format!("RHG-{}-{:03}", year, n % 1000)
}

/// Colour band for the message character counter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharCountLevel {
    Normal,
    Warning,
    Limit,
}

impl CharCountLevel {
    pub fn for_count(count: usize) -> Self {
        match count {
            c if c > 450 => CharCountLevel::Limit,
            c if c > 400 => CharCountLevel::Warning,
            _ => CharCountLevel::Normal,
        }
    }

    /// Inline colour value for the counter element
    pub fn color(&self) -> &'static str {
        match self {
            CharCountLevel::Normal => "inherit",
            CharCountLevel::Warning => "#ffa726",
            CharCountLevel::Limit => "#ff6b6b",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_id_is_zero_padded() {
        assert_eq!(reference_id(2025, 7), "RHG-2025-007");
        assert_eq!(reference_id(2025, 1234), "RHG-2025-234");
    }

    #[test]
    fn test_char_count_levels() {
        assert_eq!(CharCountLevel::for_count(0), CharCountLevel::Normal);
        assert_eq!(CharCountLevel::for_count(400), CharCountLevel::Normal);
        assert_eq!(CharCountLevel::for_count(401), CharCountLevel::Warning);
        assert_eq!(CharCountLevel::for_count(451).color(), "#ff6b6b");
    }
}
