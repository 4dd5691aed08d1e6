use crate::{Bar, RenderError};

/// Fraction of the raw range added above and below it.
pub const PADDING_RATIO: f64 = 0.05;

/// Smallest range padding is computed from, relative to the price magnitude
/// (never below this absolute value). Keeps a flat series drawable.
pub const EPSILON: f64 = 1e-8;

/// Visible price range, `min < max` always.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PriceDomain {
    min: f64,
    max: f64,
}

impl PriceDomain {
    pub fn new(min: f64, max: f64) -> Result<Self, RenderError> {
        if min.is_finite() && max.is_finite() && min < max {
            Ok(Self { min, max })
        } else {
            Err(RenderError::InvalidInput(format!(
                "price domain [{min}, {max}] is empty"
            )))
        }
    }

    /// Lowest low to highest high, padded symmetrically.
    pub fn from_series(series: &[Bar]) -> Result<Self, RenderError> {
        let (low, high) = raw_range(series)
            .ok_or_else(|| RenderError::InvalidInput("price series is empty".to_string()))?;
        let span = (high - low).max(EPSILON * high.abs().max(1.0));
        let pad = span * PADDING_RATIO;
        Self::new(low - pad, high + pad)
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }
}

/// Unpadded `(lowest low, highest high)`; `None` for an empty series.
pub fn raw_range(series: &[Bar]) -> Option<(f64, f64)> {
    let first = series.first()?;
    Some(series.iter().fold((first.low, first.high), |(low, high), bar| {
        (low.min(bar.low), high.max(bar.high))
    }))
}
