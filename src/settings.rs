use std::str::FromStr;

use ohlc_chart::{ChartFormat, CurrencyPair, DotValues, Interval};
use serde::Deserialize;

use crate::{cli::Args, config::FileConfig};

pub const DEFAULT_BASE_CURRENCY: &str = "BTC";
pub const DEFAULT_QUOTE_CURRENCY: &str = "USDT";
pub const MIN_AUTO_PERIODS: usize = 10;
pub const MAX_AUTO_PERIODS: usize = 1000;

/// `auto`, `true` or `false`; config files may also use JSON booleans.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawSwitch")]
pub enum Switch {
    #[default]
    Auto,
    True,
    False,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawSwitch {
    Flag(bool),
    Word(String),
}

impl TryFrom<RawSwitch> for Switch {
    type Error = String;

    fn try_from(raw: RawSwitch) -> Result<Self, Self::Error> {
        match raw {
            RawSwitch::Flag(true) => Ok(Self::True),
            RawSwitch::Flag(false) => Ok(Self::False),
            RawSwitch::Word(word) => word.parse(),
        }
    }
}

impl FromStr for Switch {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" => Ok(Self::Auto),
            "true" => Ok(Self::True),
            "false" => Ok(Self::False),
            _ => Err(format!("expected auto, true or false, got {s:?}")),
        }
    }
}

impl std::fmt::Display for Switch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Auto => write!(f, "auto"),
            Self::True => write!(f, "true"),
            Self::False => write!(f, "false"),
        }
    }
}

impl Switch {
    pub fn iter() -> impl Iterator<Item = Self> {
        [Self::Auto, Self::True, Self::False].into_iter()
    }

    /// Forced values win; `auto` asks the detector.
    pub fn resolve(self, detect: impl FnOnce() -> bool) -> bool {
        match self {
            Self::Auto => detect(),
            Self::True => true,
            Self::False => false,
        }
    }
}

/// Fully resolved run settings: command line over config file over defaults.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    pub pair: CurrencyPair,
    pub interval: Interval,
    pub periods: Option<usize>,
    pub format: ChartFormat,
    pub dot_values: DotValues,
    pub width: Option<usize>,
    pub height: Option<usize>,
    pub use_unicode: Switch,
    pub use_color: Switch,
}

impl Settings {
    pub fn merge(args: &Args, file: FileConfig) -> Self {
        let base = currency(args.base_currency.clone(), file.base_currency, DEFAULT_BASE_CURRENCY);
        let quote = currency(
            args.quote_currency.clone(),
            file.quote_currency,
            DEFAULT_QUOTE_CURRENCY,
        );

        Self {
            pair: CurrencyPair::new(base, quote),
            interval: args.time_interval.or(file.time_interval).unwrap_or_default(),
            periods: args.periods.or(file.periods).filter(|n| *n > 0),
            format: args.graph_format.or(file.graph_format).unwrap_or_default(),
            dot_values: args.dot_values.or(file.dot_values).unwrap_or_default(),
            width: args.width.or(file.width).filter(|n| *n > 0),
            height: args.height.or(file.height).filter(|n| *n > 0),
            use_unicode: args.use_unicode.or(file.use_unicode).unwrap_or_default(),
            use_color: args.use_color.or(file.use_color).unwrap_or_default(),
        }
    }
}

/// Exchange symbols are upper case; blank values fall through to the default.
fn currency(cli: Option<String>, file: Option<String>, default: &str) -> String {
    cli.into_iter()
        .chain(file)
        .map(|value| value.trim().to_ascii_uppercase())
        .find(|value| !value.is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Periods that fit the plot width: two columns per candle, one and a half
/// per dot.
pub fn auto_periods(plot_cols: usize, format: ChartFormat) -> usize {
    let periods = match format {
        ChartFormat::Candle => plot_cols / 2,
        ChartFormat::Dot => plot_cols * 2 / 3,
    };
    periods.clamp(MIN_AUTO_PERIODS, MAX_AUTO_PERIODS)
}
