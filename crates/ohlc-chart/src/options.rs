use std::str::FromStr;

use strum::IntoEnumIterator;

use crate::{dot::Marker, Interval, RenderError};

/// Visual encoding of the bars.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr, strum::EnumIter,
)]
#[strum(serialize_all = "lowercase")]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub enum ChartFormat {
    #[default]
    Candle,
    Dot,
}

/// Which markers the dot format draws.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr, strum::EnumIter,
)]
#[strum(serialize_all = "lowercase")]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub enum DotValues {
    #[default]
    All,
    High,
    Low,
    Close,
}

impl ChartFormat {
    pub fn iter() -> impl Iterator<Item = Self> {
        <Self as IntoEnumIterator>::iter()
    }
}

impl DotValues {
    pub fn iter() -> impl Iterator<Item = Self> {
        <Self as IntoEnumIterator>::iter()
    }

    pub fn includes(self, marker: Marker) -> bool {
        matches!(
            (self, marker),
            (Self::All, _)
                | (Self::High, Marker::High)
                | (Self::Low, Marker::Low)
                | (Self::Close, Marker::Close)
        )
    }
}

fn parse_selector<T>(kind: &'static str, value: &str) -> Result<T, RenderError>
where
    T: IntoEnumIterator + AsRef<str>,
{
    T::iter()
        .find(|candidate| candidate.as_ref() == value)
        .ok_or_else(|| RenderError::UnsupportedSelector {
            kind,
            value: value.to_string(),
        })
}

impl FromStr for ChartFormat {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_selector("graph format", s)
    }
}

impl FromStr for DotValues {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_selector("dot values selector", s)
    }
}

macro_rules! string_conversions {
    ($($ty:ty),*) => {$(
        impl TryFrom<String> for $ty {
            type Error = RenderError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }

        impl From<$ty> for String {
            fn from(value: $ty) -> Self {
                value.to_string()
            }
        }
    )*};
}

string_conversions!(ChartFormat, DotValues);

/// Resolved terminal capabilities. Detection happens before the engine runs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CapabilityProfile {
    pub use_unicode: bool,
    pub use_color: bool,
}

/// Whole frame size in character cells: plot, axes and legend together.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Dimensions {
    pub width: usize,
    pub height: usize,
}

impl Default for Dimensions {
    fn default() -> Self {
        Self {
            width: 80,
            height: 20,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CurrencyPair {
    pub base: String,
    pub quote: String,
}

impl CurrencyPair {
    pub fn new(base: impl Into<String>, quote: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            quote: quote.into(),
        }
    }

    /// Exchange ticker, e.g. `BTCUSDT`.
    pub fn symbol(&self) -> String {
        format!("{}{}", self.base, self.quote)
    }
}

impl std::fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.base, self.quote)
    }
}

/// Everything one render call needs besides the bars themselves.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChartOptions {
    pub pair: CurrencyPair,
    pub interval: Interval,
    pub format: ChartFormat,
    pub dot_values: DotValues,
    pub dimensions: Dimensions,
    pub capabilities: CapabilityProfile,
}
