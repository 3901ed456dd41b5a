//! Line helpers for hull comparisons in ROC space

use crate::roc::RocPoint;

/// A non-vertical line `tpr = slope * fpr + intercept`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub slope: f64,
    pub intercept: f64,
}

impl Line {
    /// The line through two points, or `None` when they share an FPR
    pub fn through(p1: RocPoint, p2: RocPoint) -> Option<Self> {
        let run = p2.fpr - p1.fpr;
        if run == 0.0 {
            return None;
        }
        let slope = (p2.tpr - p1.tpr) / run;
        Some(Self {
            slope,
            intercept: p1.tpr - slope * p1.fpr,
        })
    }

    pub fn at(&self, fpr: f64) -> f64 {
        self.slope * fpr + self.intercept
    }
}

/// TPR of the chord `from → to` at `fpr`
///
/// A vertical chord has no single value at its FPR; its upper end `to.tpr`
/// is used instead.
pub fn chord_tpr(from: RocPoint, to: RocPoint, fpr: f64) -> f64 {
    match Line::through(from, to) {
        Some(line) => line.at(fpr),
        None => to.tpr,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_through() {
        let line = Line::through(RocPoint::new(0.0, 0.5), RocPoint::new(1.0, 1.0)).unwrap();
        assert_eq!(line.slope, 0.5);
        assert_eq!(line.intercept, 0.5);
        assert_eq!(line.at(0.25), 0.625);
    }

    #[test]
    fn test_vertical_line_is_none() {
        assert!(Line::through(RocPoint::new(0.25, 0.1), RocPoint::new(0.25, 0.9)).is_none());
    }

    #[test]
    fn test_chord_tpr() {
        assert_eq!(
            chord_tpr(RocPoint::ORIGIN, RocPoint::TERMINAL, 0.3),
            0.3
        );
        assert_eq!(
            chord_tpr(RocPoint::new(0.0, 0.0), RocPoint::new(0.0, 0.75), 0.0),
            0.75
        );
    }
}
