use time::{macros::format_description, OffsetDateTime};
use unicode_width::UnicodeWidthChar;

use crate::Interval;

/// Adaptive precision: whole units from 1000 up, cents from 1 up, and up to
/// six significant decimals below that.
pub fn format_price(price: f64) -> String {
    if price >= 1000.0 {
        group_thousands(&format!("{price:.0}"))
    } else if price >= 1.0 {
        group_thousands(&format!("{price:.2}"))
    } else {
        let text = format!("{price:.6}");
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

fn group_thousands(number: &str) -> String {
    let (integer, fraction) = match number.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (number, None),
    };
    let (sign, digits) = match integer.strip_prefix('-') {
        Some(digits) => ("-", digits),
        None => ("", integer),
    };

    let mut grouped = String::with_capacity(number.len() + digits.len() / 3);
    grouped.push_str(sign);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if let Some(fraction) = fraction {
        grouped.push('.');
        grouped.push_str(fraction);
    }
    grouped
}

/// Axis label for a bar: `MM/DD`, plus `HH:MM` for intraday intervals.
pub fn format_axis_time(
    timestamp: OffsetDateTime,
    interval: Interval,
) -> Result<String, time::error::Format> {
    if interval.is_intraday() {
        timestamp.format(format_description!("[month]/[day] [hour]:[minute]"))
    } else {
        timestamp.format(format_description!("[month]/[day]"))
    }
}

pub fn format_legend_time(timestamp: OffsetDateTime) -> Result<String, time::error::Format> {
    timestamp.format(format_description!("[year]-[month]-[day] [hour]:[minute]"))
}

/// Drop control and zero-width characters so one char fills one cell.
pub fn printable(text: &str) -> String {
    text.chars()
        .filter(|c| c.width().is_some_and(|w| w > 0))
        .collect()
}

/// Cut `text` to `width` cells, marking the cut with `...` when there is
/// room for it.
pub fn fit(text: &str, width: usize) -> String {
    let text = printable(text);
    if text.chars().count() <= width {
        return text;
    }
    if width <= 3 {
        return text.chars().take(width).collect();
    }
    let mut cut: String = text.chars().take(width - 3).collect();
    cut.push_str("...");
    cut
}
