use crate::core::models::bound::ConvertedBound;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityLabel {
    Active,
    Inactive,
}

impl fmt::Display for ActivityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ActivityLabel::Active => "1",
            ActivityLabel::Inactive => "0",
        })
    }
}

/// Labels a converted concentration as active when it does not exceed the threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActivityClassifier {
    pub threshold_um: f64,
}

impl ActivityClassifier {
    pub fn new(threshold_um: f64) -> Self {
        Self { threshold_um }
    }

    pub fn classify(&self, bound: &ConvertedBound) -> ActivityLabel {
        match bound.preferred() {
            Some(value) if value <= self.threshold_um => ActivityLabel::Active,
            _ => ActivityLabel::Inactive,
        }
    }

    /// Classifies the textual `lower_uM`/`upper_uM` cells of a normalized row.
    pub fn classify_text(&self, lower: &str, upper: &str) -> ActivityLabel {
        let parse = |text: &str| text.trim().parse::<f64>().ok().filter(|v| v.is_finite());
        self.classify(&ConvertedBound {
            lower: parse(lower),
            upper: parse(upper),
        })
    }
}
