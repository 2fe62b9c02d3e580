/// A parsed concentration interval in the units of the source record.
///
/// When both ends are present, `lower <= upper` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ConcentrationBound {
    lower: Option<f64>,
    upper: Option<f64>,
}

impl ConcentrationBound {
    pub const EMPTY: Self = Self {
        lower: None,
        upper: None,
    };

    /// Creates a bound, swapping the ends of a reversed interval.
    pub fn new(lower: Option<f64>, upper: Option<f64>) -> Self {
        match (lower, upper) {
            (Some(l), Some(u)) if l > u => Self {
                lower: Some(u),
                upper: Some(l),
            },
            _ => Self { lower, upper },
        }
    }

    pub fn exact(value: f64) -> Self {
        Self::new(Some(value), Some(value))
    }

    pub fn lower(&self) -> Option<f64> {
        self.lower
    }

    pub fn upper(&self) -> Option<f64> {
        self.upper
    }

    pub fn is_empty(&self) -> bool {
        self.lower.is_none() && self.upper.is_none()
    }
}

/// A concentration interval expressed in micromolar.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ConvertedBound {
    pub lower: Option<f64>,
    pub upper: Option<f64>,
}

impl ConvertedBound {
    /// The value used for classification: the upper end, else the lower end.
    pub fn preferred(&self) -> Option<f64> {
        self.upper.or(self.lower)
    }
}
