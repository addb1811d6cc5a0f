//! Progress value object (0-100 scale).

use serde::{Deserialize, Serialize};
use std::fmt;

/// A completion percentage between 0 and 100 inclusive.
///
/// Fractional values are allowed: with three sources each step is worth
/// 16.67 points.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Progress(f64);

impl Progress {
    /// Zero percent.
    pub const ZERO: Self = Self(0.0);

    /// One hundred percent.
    pub const HUNDRED: Self = Self(100.0);

    /// Creates a new Progress, clamping to valid range.
    ///
    /// NaN collapses to zero.
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Self::ZERO;
        }
        Self(value.clamp(0.0, 100.0))
    }

    /// Returns the raw percentage.
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl Default for Progress {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.0}%", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_new_accepts_valid_values() {
        assert_eq!(Progress::new(0.0).value(), 0.0);
        assert_eq!(Progress::new(50.0).value(), 50.0);
        assert_eq!(Progress::new(100.0).value(), 100.0);
    }

    #[test]
    fn progress_new_clamps_to_range() {
        assert_eq!(Progress::new(101.0).value(), 100.0);
        assert_eq!(Progress::new(-3.0).value(), 0.0);
        assert_eq!(Progress::new(f64::NAN), Progress::ZERO);
    }

    #[test]
    fn progress_displays_rounded() {
        assert_eq!(Progress::new(16.666).to_string(), "17%");
        assert_eq!(Progress::HUNDRED.to_string(), "100%");
    }

    #[test]
    fn progress_serializes_as_number() {
        assert_eq!(serde_json::to_string(&Progress::new(50.0)).unwrap(), "50.0");
        let p: Progress = serde_json::from_str("25.5").unwrap();
        assert_eq!(p.value(), 25.5);
    }
}
