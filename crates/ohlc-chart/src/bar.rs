use std::cmp::Ordering;

use time::OffsetDateTime;

use crate::RenderError;

/// One OHLC sample for a fixed time interval.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bar {
    pub timestamp: OffsetDateTime,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

/// Direction of a bar, decided by close against open only.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Trend {
    Bullish,
    Bearish,
    Neutral,
}

impl Bar {
    pub fn new(timestamp: OffsetDateTime, open: f64, high: f64, low: f64, close: f64) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
        }
    }

    pub fn trend(&self) -> Trend {
        match self.close.partial_cmp(&self.open) {
            Some(Ordering::Greater) => Trend::Bullish,
            Some(Ordering::Less) => Trend::Bearish,
            _ => Trend::Neutral,
        }
    }

    fn check(&self, index: usize) -> Result<(), RenderError> {
        for (name, value) in [
            ("open", self.open),
            ("high", self.high),
            ("low", self.low),
            ("close", self.close),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(RenderError::InvalidInput(format!(
                    "bar {index}: {name} must be a positive number, got {value}"
                )));
            }
        }

        if self.low > self.high {
            return Err(RenderError::InvalidInput(format!(
                "bar {index}: low {} is above high {}",
                self.low, self.high
            )));
        }

        for (name, value) in [("open", self.open), ("close", self.close)] {
            if value < self.low || value > self.high {
                return Err(RenderError::InvalidInput(format!(
                    "bar {index}: {name} {value} is outside [{}, {}]",
                    self.low, self.high
                )));
            }
        }

        Ok(())
    }
}

/// Reject an empty series or any bar breaking `low <= open, close <= high`.
pub fn validate(series: &[Bar]) -> Result<(), RenderError> {
    if series.is_empty() {
        return Err(RenderError::InvalidInput("price series is empty".to_string()));
    }
    series
        .iter()
        .enumerate()
        .try_for_each(|(index, bar)| bar.check(index))
}

#[cfg(test)]
mod tests {
    use super::{validate, Bar, Trend};
    use crate::RenderError;
    use time::OffsetDateTime;

    fn bar(open: f64, high: f64, low: f64, close: f64) -> Bar {
        Bar::new(OffsetDateTime::UNIX_EPOCH, open, high, low, close)
    }

    #[test]
    fn trend_follows_close_against_open() {
        assert_eq!(bar(100.0, 110.0, 95.0, 105.0).trend(), Trend::Bullish);
        assert_eq!(bar(105.0, 110.0, 95.0, 100.0).trend(), Trend::Bearish);
        assert_eq!(bar(50.0, 50.0, 50.0, 50.0).trend(), Trend::Neutral);
    }

    #[test]
    fn rejects_empty_series() {
        let err = validate(&[]).expect_err("expected invalid input");
        assert!(matches!(err, RenderError::InvalidInput(_)));
    }

    #[test]
    fn rejects_close_above_high() {
        let series = [bar(100.0, 110.0, 95.0, 105.0), bar(100.0, 110.0, 95.0, 111.0)];
        let err = validate(&series).expect_err("expected invalid input");
        assert!(err.to_string().contains("bar 1"));
    }

    #[test]
    fn rejects_inverted_range_and_non_positive_prices() {
        assert!(validate(&[bar(100.0, 90.0, 95.0, 100.0)]).is_err());
        assert!(validate(&[bar(0.0, 1.0, 0.0, 0.5)]).is_err());
        assert!(validate(&[bar(f64::NAN, 1.0, 0.5, 0.5)]).is_err());
    }

    #[test]
    fn accepts_flat_bar() {
        assert!(validate(&[bar(50.0, 50.0, 50.0, 50.0)]).is_ok());
    }
}
