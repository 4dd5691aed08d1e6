use std::path::Path;

use ohlc_chart::{ChartFormat, DotValues, Interval};
use serde::Deserialize;

use crate::settings::Switch;

/// Optional values from the JSON config file. Unknown keys are ignored.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FileConfig {
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
}

/// Reads the config file. A missing file yields defaults silently; any
/// other problem is reported as a warning and also yields defaults.
pub fn load(path: &Path) -> FileConfig {
    if is_yaml(path) {
        warn(path, "YAML config files are not supported, use JSON");
        return FileConfig::default();
    }

    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "config file not found, using defaults");
            return FileConfig::default();
        }
        Err(err) => {
            warn(path, &err.to_string());
            return FileConfig::default();
        }
    };

    match serde_json::from_slice::<FileConfig>(&bytes) {
        Ok(config) => {
            tracing::debug!(path = %path.display(), ?config, "config file loaded");
            config
        }
        Err(err) => {
            warn(path, &err.to_string());
            FileConfig::default()
        }
    }
}

fn is_yaml(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"))
}

fn warn(path: &Path, reason: &str) {
    tracing::warn!(path = %path.display(), error = %reason, "config file ignored");
    eprintln!(
        "Warning: could not load config file {}: {reason}. Using defaults.",
        path.display()
    );
}

#[cfg(test)]
mod tests {
    use super::{load, FileConfig};
    use crate::settings::Switch;
    use ohlc_chart::{ChartFormat, DotValues, Interval};
    use std::path::PathBuf;

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("price-graph-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).expect("create temp dir");
        let path = dir.join(name);
        std::fs::write(&path, contents).expect("write temp config");
        path
    }

    #[test]
    fn missing_file_gives_defaults() {
        let path = std::env::temp_dir().join("price-graph-does-not-exist.json");
        assert_eq!(load(&path), FileConfig::default());
    }

    #[test]
    fn reads_all_keys() {
        let path = temp_file(
            "full.json",
            r#"{
                "base_currency": "eth",
                "quote_currency": "BRL",
                "time_interval": "15m",
                "periods": 40,
                "graph_format": "dot",
                "dot_values": "high",
                "width": 100,
                "height": 30,
                "use_unicode": false,
                "use_color": "auto",
                "comment": "ignored"
            }"#,
        );

        let config = load(&path);
        assert_eq!(config.base_currency.as_deref(), Some("eth"));
        assert_eq!(config.quote_currency.as_deref(), Some("BRL"));
        assert_eq!(config.time_interval, Some(Interval::FifteenMinutes));
        assert_eq!(config.periods, Some(40));
        assert_eq!(config.graph_format, Some(ChartFormat::Dot));
        assert_eq!(config.dot_values, Some(DotValues::High));
        assert_eq!((config.width, config.height), (Some(100), Some(30)));
        assert_eq!(config.use_unicode, Some(Switch::False));
        assert_eq!(config.use_color, Some(Switch::Auto));
    }

    #[test]
    fn partial_file_leaves_rest_unset() {
        let path = temp_file("partial.json", r#"{"use_color": true}"#);
        let config = load(&path);
        assert_eq!(config.use_color, Some(Switch::True));
        assert_eq!(config.base_currency, None);
    }

    #[test]
    fn malformed_file_gives_defaults() {
        let path = temp_file("broken.json", "{ not json");
        assert_eq!(load(&path), FileConfig::default());

        let path = temp_file("bad-value.json", r#"{"graph_format": "bars"}"#);
        assert_eq!(load(&path), FileConfig::default());
    }

    #[test]
    fn yaml_is_not_supported() {
        let path = temp_file("config.yaml", "graph_format: dot\n");
        assert_eq!(load(&path), FileConfig::default());
    }
}
