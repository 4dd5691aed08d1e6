use std::any::Any;
use std::path::PathBuf;

use crate::path_env;

const LOG_DIR_ENV: &str = "PRICE_GRAPH_LOG_DIR";
const LOG_FILTER_ENV: &str = "PRICE_GRAPH_LOG";
const DEFAULT_FILTER: &str = "error,price_graph=debug,ohlc_chart=debug";

pub fn default_log_dir() -> PathBuf {
    if let Some(path) = path_env::path_override(LOG_DIR_ENV) {
        return path;
    }

    #[cfg(target_os = "macos")]
    {
        let mut path = dirs::home_dir().unwrap_or_else(std::env::temp_dir);
        path.push("Library/Logs/PriceGraph");
        path
    }
    #[cfg(target_os = "windows")]
    {
        let mut path = dirs::data_local_dir().unwrap_or_else(std::env::temp_dir);
        path.push("PriceGraph\\Logs");
        path
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        let mut path = dirs::data_local_dir()
            .or_else(|| dirs::home_dir().map(|p| p.join(".local/share")))
            .unwrap_or_else(std::env::temp_dir);
        path.push("price-graph/logs");
        path
    }
}

fn fallback_log_dir() -> PathBuf {
    std::env::temp_dir().join("price-graph").join("logs")
}

/// Installs the file logger. The offset must be read before any thread is
/// spawned, so the caller passes it in. Returns the writer guard; logging is
/// silently disabled when no log file can be opened.
#[must_use]
pub fn init(offset: time::UtcOffset) -> Option<impl Any> {
    use tracing_appender::rolling::{RollingFileAppender, Rotation};
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;

    let primary_log_dir = default_log_dir();
    let log_dir = if std::fs::create_dir_all(&primary_log_dir).is_ok() {
        primary_log_dir
    } else {
        let fallback = fallback_log_dir();
        let _ = std::fs::create_dir_all(&fallback);
        fallback
    };

    let writer = match RollingFileAppender::builder()
        .filename_prefix("price-graph")
        .filename_suffix("log")
        .max_log_files(5)
        .rotation(Rotation::DAILY)
        .build(&log_dir)
    {
        Ok(writer) => writer,
        Err(err) => {
            eprintln!(
                "Warning: logging disabled (directory {}): {err}",
                log_dir.display()
            );
            return None;
        }
    };
    let (writer, guard) = tracing_appender::non_blocking(writer);

    let timer = fmt::time::OffsetTime::new(offset, time::format_description::well_known::Rfc3339);
    let file_line = cfg!(debug_assertions);

    let subscriber = fmt::layer()
        .with_ansi(false)
        .with_timer(timer)
        .with_thread_ids(true)
        .with_file(file_line)
        .with_line_number(file_line)
        .with_writer(writer);

    let dirs = std::env::var(LOG_FILTER_ENV).unwrap_or_else(|_| DEFAULT_FILTER.to_string());
    let subscriber = subscriber.with_filter(tracing_subscriber::EnvFilter::new(dirs));

    tracing_subscriber::registry().with(subscriber).init();
    tracing::debug!(log_dir = %log_dir.display(), "logger initialized");
    Some(guard)
}
