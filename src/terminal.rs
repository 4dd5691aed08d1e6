use std::io::IsTerminal;

use ohlc_chart::{CapabilityProfile, Dimensions};

use crate::settings::Settings;

pub const FALLBACK_WIDTH: usize = 80;
pub const FALLBACK_HEIGHT: usize = 20;
/// Lines kept free below the chart for the status line and the prompt.
pub const RESERVED_LINES: usize = 2;

const LOCALE_KEYS: [&str; 3] = ["LC_ALL", "LC_CTYPE", "LANG"];

/// Current terminal size as (columns, lines).
pub fn size() -> (usize, usize) {
    match crossterm::terminal::size() {
        Ok((cols, lines)) if cols > 0 && lines > 0 => (usize::from(cols), usize::from(lines)),
        Ok(_) => (FALLBACK_WIDTH, FALLBACK_HEIGHT),
        Err(err) => {
            tracing::debug!(error = %err, "terminal size unavailable, using fallback");
            (FALLBACK_WIDTH, FALLBACK_HEIGHT)
        }
    }
}

/// Frame size: explicit values capped to the terminal, else the terminal.
pub fn dimensions(settings: &Settings, terminal: (usize, usize)) -> Dimensions {
    let (cols, lines) = terminal;
    let lines = lines.saturating_sub(RESERVED_LINES);
    Dimensions {
        width: settings.width.map_or(cols, |width| width.min(cols)),
        height: settings.height.map_or(lines, |height| height.min(lines)),
    }
}

pub fn capabilities(settings: &Settings) -> CapabilityProfile {
    CapabilityProfile {
        use_unicode: settings.use_unicode.resolve(detect_unicode),
        use_color: settings.use_color.resolve(detect_color),
    }
}

fn detect_unicode() -> bool {
    cfg!(target_os = "windows") || locale_is_utf8(LOCALE_KEYS.map(|key| std::env::var(key).ok()))
}

fn detect_color() -> bool {
    color_allowed(
        std::io::stdout().is_terminal(),
        std::env::var("NO_COLOR").ok().as_deref(),
        std::env::var("TERM").ok().as_deref(),
    )
}

/// The first non-empty locale variable decides.
fn locale_is_utf8<I>(values: I) -> bool
where
    I: IntoIterator<Item = Option<String>>,
{
    values
        .into_iter()
        .flatten()
        .find(|value| !value.is_empty())
        .is_some_and(|value| {
            let value = value.to_ascii_lowercase();
            value.contains("utf-8") || value.contains("utf8")
        })
}

fn color_allowed(is_tty: bool, no_color: Option<&str>, term: Option<&str>) -> bool {
    is_tty && no_color.is_none_or(str::is_empty) && term != Some("dumb")
}
