use std::path::PathBuf;

/// Directory override from an environment variable; blank values are ignored.
#[must_use]
pub fn path_override(key: &str) -> Option<PathBuf> {
    std::env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::path_override;

    struct EnvGuard {
        key: &'static str,
        previous: Option<String>,
    }

    impl EnvGuard {
        fn set(key: &'static str, value: Option<&str>) -> Self {
            let previous = std::env::var(key).ok();
            match value {
                Some(value) => std::env::set_var(key, value),
                None => std::env::remove_var(key),
            }
            Self { key, previous }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            if let Some(previous) = &self.previous {
                std::env::set_var(self.key, previous);
            } else {
                std::env::remove_var(self.key);
            }
        }
    }

    #[test]
    fn reads_trimmed_value() {
        let _guard = EnvGuard::set("PRICE_GRAPH_PATH_ENV_TEST_SET", Some("  /tmp/logs "));
        assert_eq!(
            path_override("PRICE_GRAPH_PATH_ENV_TEST_SET"),
            Some(std::path::PathBuf::from("/tmp/logs"))
        );
    }

    #[test]
    fn ignores_missing_and_blank_values() {
        let _unset = EnvGuard::set("PRICE_GRAPH_PATH_ENV_TEST_UNSET", None);
        let _blank = EnvGuard::set("PRICE_GRAPH_PATH_ENV_TEST_BLANK", Some("   "));
        assert!(path_override("PRICE_GRAPH_PATH_ENV_TEST_UNSET").is_none());
        assert!(path_override("PRICE_GRAPH_PATH_ENV_TEST_BLANK").is_none());
    }
}
