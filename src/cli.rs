use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::str::FromStr;

use itertools::Itertools;
use ohlc_chart::{ChartFormat, DotValues, Interval};

use crate::settings::Switch;

pub const DEFAULT_CONFIG_PATH: &str = "graph_config.json";

/// Options given on the command line; `None` means "not given".
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Args {
    pub base_currency: Option<String>,
    pub quote_currency: Option<String>,
    pub time_interval: Option<Interval>,
    pub periods: Option<usize>,
    pub graph_format: Option<ChartFormat>,
    pub dot_values: Option<DotValues>,
    pub width: Option<usize>,
    pub height: Option<usize>,
    pub use_unicode: Option<Switch>,
    pub use_color: Option<Switch>,
    pub config: PathBuf,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            base_currency: None,
            quote_currency: None,
            time_interval: None,
            periods: None,
            graph_format: None,
            dot_values: None,
            width: None,
            height: None,
            use_unicode: None,
            use_color: None,
            config: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Run(Args),
    Help,
    Version,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseError {
    pub code: i32,
    pub message: String,
}

impl ParseError {
    fn usage(message: impl std::fmt::Display) -> Self {
        Self {
            code: 2,
            message: format!("{message}\n\n{}", help_text(env!("CARGO_PKG_NAME"))),
        }
    }
}

#[must_use]
pub fn help_text(bin_name: &str) -> String {
    indoc::formatdoc! {"
        Cryptocurrency price graph for the terminal

        Usage:
          {bin_name} [options]

        Options:
              --base-currency <SYMBOL>   Base currency (e.g. BTC, ETH) [default: BTC]
              --quote-currency <SYMBOL>  Quote currency (e.g. USDT, BRL) [default: USDT]
              --time-interval <INTERVAL> One of: {intervals} [default: 1d]
              --periods <N>              Number of periods to fetch [default: fit to width]
              --graph-format <FORMAT>    candle or dot [default: candle]
              --dot-values <VALUES>      all, high, low or close (dot format) [default: all]
              --width <COLUMNS>          Graph width in characters [default: terminal width]
              --height <LINES>           Graph height in lines [default: terminal height]
              --use-unicode <WHEN>       auto, true or false [default: auto]
              --use-color <WHEN>         auto, true or false [default: auto]
          -f, --config <PATH>            Config file [default: {DEFAULT_CONFIG_PATH}]
          -h, --help                     Show this help
          -V, --version                  Show version
        ",
        intervals = Interval::iter().join(" "),
    }
}

#[must_use]
pub fn version_text() -> String {
    format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}

pub fn parse_args<I, S>(args: I) -> Result<Command, ParseError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut parsed = Args::default();
    let mut show_help = false;
    let mut show_version = false;
    let mut args = args.into_iter().map(Into::into);

    while let Some(raw) = args.next() {
        let (flag, inline) = match raw.split_once('=') {
            Some((flag, value)) if flag.starts_with("--") => {
                (flag.to_string(), Some(value.to_string()))
            }
            _ => (raw, None),
        };
        let mut value = || -> Result<String, ParseError> {
            inline
                .clone()
                .or_else(|| args.next())
                .ok_or_else(|| ParseError::usage(format!("missing value for {flag}")))
        };

        match flag.as_str() {
            "-h" | "--help" => show_help = true,
            "-V" | "--version" => show_version = true,
            "--base-currency" => parsed.base_currency = Some(value()?),
            "--quote-currency" => parsed.quote_currency = Some(value()?),
            "--time-interval" => {
                parsed.time_interval = Some(parse_choice(&flag, &value()?, Interval::iter())?);
            }
            "--periods" => parsed.periods = Some(parse_count(&flag, &value()?)?),
            "--graph-format" => {
                parsed.graph_format = Some(parse_choice(&flag, &value()?, ChartFormat::iter())?);
            }
            "--dot-values" => {
                parsed.dot_values = Some(parse_choice(&flag, &value()?, DotValues::iter())?);
            }
            "--width" => parsed.width = Some(parse_count(&flag, &value()?)?),
            "--height" => parsed.height = Some(parse_count(&flag, &value()?)?),
            "--use-unicode" => {
                parsed.use_unicode = Some(parse_choice(&flag, &value()?, Switch::iter())?);
            }
            "--use-color" => {
                parsed.use_color = Some(parse_choice(&flag, &value()?, Switch::iter())?);
            }
            "-f" | "--config" => parsed.config = PathBuf::from(value()?),
            _ if flag.starts_with('-') => {
                return Err(ParseError::usage(format!("unknown option: {flag}")));
            }
            _ => {
                return Err(ParseError::usage(format!(
                    "unexpected positional argument: {flag}"
                )));
            }
        }
    }

    if show_help {
        return Ok(Command::Help);
    }

    if show_version {
        return Ok(Command::Version);
    }

    Ok(Command::Run(parsed))
}

fn parse_choice<T, C>(flag: &str, raw: &str, mut choices: C) -> Result<T, ParseError>
where
    T: FromStr,
    C: Iterator,
    C::Item: std::fmt::Display,
{
    raw.parse().map_err(|_| {
        ParseError::usage(format!(
            "invalid value for {flag}: {raw} (expected one of: {})",
            choices.join(", ")
        ))
    })
}

fn parse_count(flag: &str, raw: &str) -> Result<usize, ParseError> {
    raw.parse::<NonZeroUsize>()
        .map(NonZeroUsize::get)
        .map_err(|_| {
            ParseError::usage(format!(
                "invalid value for {flag}: {raw} (expected a positive integer)"
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::{parse_args, Args, Command, DEFAULT_CONFIG_PATH};
    use crate::settings::Switch;
    use ohlc_chart::{ChartFormat, DotValues, Interval};
    use std::path::PathBuf;

    fn run_args(result: Result<Command, super::ParseError>) -> Args {
        match result {
            Ok(Command::Run(args)) => args,
            other => panic!("expected run command, got {other:?}"),
        }
    }

    #[test]
    fn parses_default_run_command() {
        let args = run_args(parse_args(Vec::<String>::new()));
        assert_eq!(args, Args::default());
        assert_eq!(args.config, PathBuf::from(DEFAULT_CONFIG_PATH));
    }

    #[test]
    fn parses_help_and_version() {
        assert_eq!(parse_args(["--help"]), Ok(Command::Help));
        assert_eq!(parse_args(["-V"]), Ok(Command::Version));
        assert_eq!(parse_args(["--periods", "5", "-h"]), Ok(Command::Help));
    }

    #[test]
    fn parses_all_options() {
        let args = run_args(parse_args([
            "--base-currency",
            "ETH",
            "--quote-currency=BRL",
            "--time-interval",
            "4h",
            "--periods",
            "30",
            "--graph-format",
            "dot",
            "--dot-values=close",
            "--width",
            "100",
            "--height",
            "30",
            "--use-unicode",
            "false",
            "--use-color=true",
            "-f",
            "custom.json",
        ]));
        assert_eq!(args.base_currency.as_deref(), Some("ETH"));
        assert_eq!(args.quote_currency.as_deref(), Some("BRL"));
        assert_eq!(args.time_interval, Some(Interval::FourHours));
        assert_eq!(args.periods, Some(30));
        assert_eq!(args.graph_format, Some(ChartFormat::Dot));
        assert_eq!(args.dot_values, Some(DotValues::Close));
        assert_eq!((args.width, args.height), (Some(100), Some(30)));
        assert_eq!(args.use_unicode, Some(Switch::False));
        assert_eq!(args.use_color, Some(Switch::True));
        assert_eq!(args.config, PathBuf::from("custom.json"));
    }

    #[test]
    fn rejects_bad_choices() {
        let err = parse_args(["--graph-format", "bars"]).expect_err("expected parse error");
        assert_eq!(err.code, 2);
        assert!(err.message.contains("expected one of: candle, dot"));

        let err = parse_args(["--time-interval", "1s"]).expect_err("expected parse error");
        assert!(err.message.contains("1m, 3m"));
    }

    #[test]
    fn rejects_non_positive_counts() {
        assert!(parse_args(["--periods", "0"]).is_err());
        assert!(parse_args(["--width", "-3"]).is_err());
        assert!(parse_args(["--height", "tall"]).is_err());
    }

    #[test]
    fn fails_on_missing_value() {
        let err = parse_args(["--width"]).expect_err("expected parse error");
        assert!(err.message.contains("missing value for --width"));
    }

    #[test]
    fn fails_on_unknown_option() {
        let err = parse_args(["--unknown"]).expect_err("expected parse error");
        assert_eq!(err.code, 2);
        assert!(err.message.contains("unknown option"));
    }

    #[test]
    fn fails_on_positional_argument() {
        let err = parse_args(["abc"]).expect_err("expected parse error");
        assert_eq!(err.code, 2);
        assert!(err.message.contains("unexpected positional argument"));
    }
}
