//! Runtime settings.
//!
//! Built-in defaults, then `cart-sync.toml` in the working directory (if any),
//! then `CART_SYNC__*` environment variables. Values that fail to parse are
//! logged and skipped.

use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tracing::warn;

pub const SETTINGS_FILE: &str = "cart-sync.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Base URL of the storefront API, without a trailing slash.
    pub endpoint: String,
    /// Quiet period of the search input, in milliseconds.
    pub debounce_ms: u64,
    /// Mailbox size of each actor.
    pub mailbox_capacity: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:8082/api/v1".into(),
            debounce_ms: 500,
            mailbox_capacity: 32,
        }
    }
}

impl Settings {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileSettings {
    endpoint: Option<String>,
    debounce_ms: Option<u64>,
    mailbox_capacity: Option<usize>,
}

pub fn load_settings() -> Settings {
    load_settings_from(Path::new(SETTINGS_FILE), |key| std::env::var(key).ok())
}

/// [`load_settings`] with an explicit file and environment lookup.
pub fn load_settings_from(path: &Path, env: impl Fn(&str) -> Option<String>) -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = std::fs::read_to_string(path) {
        match toml::from_str::<FileSettings>(&raw) {
            Ok(file) => file.apply(&mut settings),
            Err(e) => warn!(path = %path.display(), error = %e, "Ignoring unreadable settings file"),
        }
    }

    if let Some(v) = env("CART_SYNC__ENDPOINT") {
        settings.endpoint = v;
    }
    if let Some(v) = env("CART_SYNC__DEBOUNCE_MS") {
        match v.parse() {
            Ok(parsed) => settings.debounce_ms = parsed,
            Err(_) => warn!(value = %v, "CART_SYNC__DEBOUNCE_MS is not a number"),
        }
    }
    if let Some(v) = env("CART_SYNC__MAILBOX_CAPACITY") {
        match v.parse::<usize>() {
            Ok(parsed) if parsed > 0 => settings.mailbox_capacity = parsed,
            _ => warn!(value = %v, "CART_SYNC__MAILBOX_CAPACITY must be a positive number"),
        }
    }

    settings.endpoint = settings.endpoint.trim_end_matches('/').to_string();
    settings
}

impl FileSettings {
    fn apply(self, settings: &mut Settings) {
        if let Some(v) = self.endpoint {
            settings.endpoint = v;
        }
        if let Some(v) = self.debounce_ms {
            settings.debounce_ms = v;
        }
        if let Some(v) = self.mailbox_capacity.filter(|capacity| *capacity > 0) {
            settings.mailbox_capacity = v;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    fn write_file(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("{}-{}", std::process::id(), name));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_defaults_without_file_or_env() {
        let settings = load_settings_from(Path::new("/nonexistent/cart-sync.toml"), env_of(&[]));
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.debounce(), Duration::from_millis(500));
    }

    #[test]
    fn test_file_then_env_override() {
        let path = write_file(
            "override.toml",
            "endpoint = \"http://shop.local/api/v1/\"\ndebounce_ms = 250\n",
        );
        let settings = load_settings_from(&path, env_of(&[("CART_SYNC__DEBOUNCE_MS", "100")]));
        std::fs::remove_file(&path).unwrap();

        assert_eq!(settings.endpoint, "http://shop.local/api/v1");
        assert_eq!(settings.debounce_ms, 100);
        assert_eq!(settings.mailbox_capacity, 32);
    }

    #[test]
    fn test_bad_values_are_skipped() {
        let path = write_file("broken.toml", "endpoint = [1, 2]\n");
        let settings = load_settings_from(
            &path,
            env_of(&[
                ("CART_SYNC__DEBOUNCE_MS", "soon"),
                ("CART_SYNC__MAILBOX_CAPACITY", "0"),
            ]),
        );
        std::fs::remove_file(&path).unwrap();

        assert_eq!(settings, Settings::default());
    }
}
