use anyhow::{bail, Context, Result};
use ohlc_chart::{Bar, CurrencyPair, Interval};
use serde::{de::IgnoredAny, Deserialize, Deserializer};
use time::{OffsetDateTime, UtcOffset};

const KLINES_URL: &str = "https://api.binance.com/api/v3/klines";
pub const MAX_LIMIT: usize = 1000;

/// One row of the klines response. Prices arrive as strings.
#[derive(Debug, Deserialize)]
struct RawKline(
    i64,
    #[serde(deserialize_with = "de_string_to_f64")] f64,
    #[serde(deserialize_with = "de_string_to_f64")] f64,
    #[serde(deserialize_with = "de_string_to_f64")] f64,
    #[serde(deserialize_with = "de_string_to_f64")] f64,
    IgnoredAny,
    IgnoredAny,
    IgnoredAny,
    IgnoredAny,
    IgnoredAny,
    IgnoredAny,
    IgnoredAny,
);

#[derive(Debug, Deserialize)]
struct ApiError {
    msg: String,
}

fn de_string_to_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let s = <&str>::deserialize(deserializer)?;
    s.parse().map_err(serde::de::Error::custom)
}

impl RawKline {
    fn into_bar(self, offset: UtcOffset) -> Result<Bar> {
        let RawKline(open_time, open, high, low, close, ..) = self;
        let timestamp = OffsetDateTime::from_unix_timestamp_nanos(i128::from(open_time) * 1_000_000)
            .with_context(|| format!("invalid open time {open_time}"))?
            .to_offset(offset);
        Ok(Bar::new(timestamp, open, high, low, close))
    }
}

/// Fetches the most recent `periods` bars for `pair`, oldest first.
pub async fn fetch_bars(
    pair: &CurrencyPair,
    interval: Interval,
    periods: usize,
    offset: UtcOffset,
) -> Result<Vec<Bar>> {
    let limit = periods.clamp(1, MAX_LIMIT);
    let symbol = pair.symbol();
    tracing::debug!(%symbol, %interval, limit, "requesting klines");

    let response = reqwest::Client::new()
        .get(KLINES_URL)
        .query(&[
            ("symbol", symbol.as_str()),
            ("interval", interval.as_ref()),
            ("limit", limit.to_string().as_str()),
        ])
        .send()
        .await
        .context("failed to reach the exchange")?;

    let status = response.status();
    let body = response
        .text()
        .await
        .context("failed to read exchange response")?;

    if !status.is_success() {
        tracing::warn!(%status, %body, "klines request rejected");
        bail!("exchange returned {status}: {}", api_message(&body));
    }

    let bars = parse_klines(&body, offset)?;
    tracing::debug!(count = bars.len(), "klines received");
    Ok(bars)
}

fn api_message(body: &str) -> String {
    match serde_json::from_str::<ApiError>(body) {
        Ok(err) => err.msg,
        Err(_) => body.trim().to_string(),
    }
}

fn parse_klines(body: &str, offset: UtcOffset) -> Result<Vec<Bar>> {
    let rows: Vec<RawKline> =
        serde_json::from_str(body).context("unexpected klines response format")?;
    if rows.is_empty() {
        bail!("no price data returned for this pair and interval");
    }
    rows.into_iter().map(|row| row.into_bar(offset)).collect()
}

#[cfg(test)]
mod tests {
    use super::{api_message, parse_klines};
    use time::{macros::datetime, UtcOffset};

    const SAMPLE: &str = r#"[
        [1704067200000, "42283.58000000", "44184.10000000", "42180.77000000", "44179.55000000",
         "27174.29903000", 1704153599999, "1169996962.72", 1102590, "14553.28", "626670887.15", "0"],
        [1704153600000, "44179.55000000", "45879.63000000", "44148.34000000", "44946.91000000",
         "65146.40661000", 1704239999999, "2927113929.66", 2055585, "33250.41", "1494045024.16", "0"]
    ]"#;

    #[test]
    fn parses_rows_into_bars() {
        let bars = parse_klines(SAMPLE, UtcOffset::UTC).expect("valid klines");
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].timestamp, datetime!(2024-01-01 00:00 UTC));
        assert!((bars[0].open - 42_283.58).abs() < 1e-9);
        assert!((bars[0].high - 44_184.10).abs() < 1e-9);
        assert!((bars[0].low - 42_180.77).abs() < 1e-9);
        assert!((bars[1].close - 44_946.91).abs() < 1e-9);
    }

    #[test]
    fn applies_local_offset() {
        let offset = UtcOffset::from_hms(-3, 0, 0).expect("valid offset");
        let bars = parse_klines(SAMPLE, offset).expect("valid klines");
        assert_eq!(bars[0].timestamp, datetime!(2023-12-31 21:00 -3));
    }

    #[test]
    fn rejects_empty_and_malformed_bodies() {
        let err = parse_klines("[]", UtcOffset::UTC).expect_err("empty result");
        assert!(err.to_string().contains("no price data"));

        assert!(parse_klines(r#"[[1, "abc", "1", "1", "1"]]"#, UtcOffset::UTC).is_err());
        assert!(parse_klines(r#"{"code": 0}"#, UtcOffset::UTC).is_err());
    }

    #[test]
    fn extracts_api_error_message() {
        assert_eq!(
            api_message(r#"{"code":-1121,"msg":"Invalid symbol."}"#),
            "Invalid symbol."
        );
        assert_eq!(api_message(" Bad Gateway \n"), "Bad Gateway");
    }
}
