//! Mapping from remaining time to what the widget draws.

use std::f64::consts::PI;

/// Circular progress indicator drawn as a dashed stroke.
///
/// The dash array is one circumference long; sliding the dash offset from 0
/// to the circumference empties the ring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressRing {
    pub radius: f64,
}

impl ProgressRing {
    pub fn new(radius: f64) -> Self {
        Self { radius }
    }

    pub fn circumference(&self) -> f64 {
        self.radius * 2.0 * PI
    }

    /// Stroke offset for `percent` (0..=100). 100 is a full ring, 0 an empty one.
    pub fn dash_offset(&self, percent: f64) -> f64 {
        let circumference = self.circumference();
        circumference - (percent.clamp(0.0, 100.0) / 100.0) * circumference
    }
}

impl Default for ProgressRing {
    fn default() -> Self {
        Self::new(135.0)
    }
}

/// `MM:SS`, zero padded. Minutes are not wrapped into hours.
pub fn format_clock(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_progress_is_zero_offset() {
        let ring = ProgressRing::default();
        assert_eq!(ring.dash_offset(100.0), 0.0);
    }

    #[test]
    fn empty_progress_is_full_circumference() {
        let ring = ProgressRing::new(135.0);
        assert!((ring.dash_offset(0.0) - 270.0 * PI).abs() < 1e-9);
    }

    #[test]
    fn half_progress_is_half_circumference() {
        let ring = ProgressRing::new(10.0);
        assert!((ring.dash_offset(50.0) - ring.circumference() / 2.0).abs() < 1e-9);
    }

    #[test]
    fn clock_formatting() {
        assert_eq!(format_clock(25 * 60), "25:00");
        assert_eq!(format_clock(61), "01:01");
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(100 * 60 + 5), "100:05");
    }
}
