//! Application configuration loaded from a TOML file.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::catalog::CatalogPath;
use crate::error::{CoreError, CoreResult};

/// Top-level application configuration.
///
/// Every field has a default, so the browser runs without a config file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub startup: Option<StartupArticle>,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub log: LogConfig,
}

impl Config {
    /// Loads configuration from a TOML file at `path`.
    ///
    /// # Errors
    ///
    /// - [`CoreError::NotFound`] if the file does not exist.
    /// - [`CoreError::PermissionDenied`] if the file is not readable.
    /// - [`CoreError::ConfigParse`] if the TOML is malformed.
    pub fn load(path: &Path) -> CoreResult<Self> {
        let content = crate::error::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CoreError::ConfigParse(e.to_string()))
    }
}

/// Catalog source and browsing start point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// JSON file served by the in-memory catalog service.
    #[serde(default = "default_source")]
    pub source: PathBuf,
    #[serde(default)]
    pub initial_path: Vec<String>,
    /// Artificial delay added to every service call.
    #[serde(default)]
    pub latency_ms: u64,
}

impl CatalogConfig {
    /// The path to enter at startup, `None` for the catalog list.
    pub fn initial_path(&self) -> Option<CatalogPath> {
        (!self.initial_path.is_empty())
            .then(|| CatalogPath::from_segments(self.initial_path.iter().cloned()))
    }

    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            source: default_source(),
            initial_path: Vec::new(),
            latency_ms: 0,
        }
    }
}

/// An article inserted into the basket when the browser starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartupArticle {
    pub catalog_id: String,
    pub article_number: String,
    #[serde(default)]
    pub variant_code: Option<String>,
}

/// Display preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_true")]
    pub show_icons: bool,
    #[serde(default = "default_true")]
    pub show_basket: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            show_icons: true,
            show_basket: true,
        }
    }
}

/// Log file location and verbosity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    #[serde(default = "default_log_file")]
    pub file: PathBuf,
    /// One of `error`, `warn`, `info`, `debug`, `trace`.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            file: default_log_file(),
            level: default_log_level(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_source() -> PathBuf {
    PathBuf::from("catalog.json")
}

fn default_log_file() -> PathBuf {
    PathBuf::from("/tmp/catnav.log")
}

fn default_log_level() -> String {
    "debug".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn default_config() {
        let config = Config::default();

        assert_eq!(config.catalog.source, PathBuf::from("catalog.json"));
        assert!(config.catalog.initial_path().is_none());
        assert_eq!(config.catalog.latency(), Duration::ZERO);
        assert!(config.startup.is_none());
        assert!(config.ui.show_icons);
        assert!(config.ui.show_basket);
        assert_eq!(config.log.file, PathBuf::from("/tmp/catnav.log"));
        assert_eq!(config.log.level, "debug");
    }

    #[test]
    fn load_full_toml() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(
            &path,
            r#"
[catalog]
source = "/srv/catalogs/demo.json"
initial_path = ["egr:0", "Chairs"]
latency_ms = 250

[startup]
catalog_id = "egr:0"
article_number = "4520"
variant_code = "Polster.Ausf=13;Armlehne.Visible=1"

[ui]
show_icons = false
show_basket = false

[log]
file = "/var/log/catnav.log"
level = "warn"
"#,
        )
        .unwrap();

        let config = Config::load(&path).unwrap();

        assert_eq!(config.catalog.source, PathBuf::from("/srv/catalogs/demo.json"));
        assert_eq!(
            config.catalog.initial_path(),
            Some(CatalogPath::from_segments(["egr:0", "Chairs"]))
        );
        assert_eq!(config.catalog.latency(), Duration::from_millis(250));

        let startup = config.startup.unwrap();
        assert_eq!(startup.catalog_id, "egr:0");
        assert_eq!(startup.article_number, "4520");
        assert_eq!(
            startup.variant_code.as_deref(),
            Some("Polster.Ausf=13;Armlehne.Visible=1")
        );

        assert!(!config.ui.show_icons);
        assert!(!config.ui.show_basket);
        assert_eq!(config.log.level, "warn");
    }

    #[test]
    fn load_partial_toml_uses_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(
            &path,
            r#"
[catalog]
latency_ms = 10
"#,
        )
        .unwrap();

        let config = Config::load(&path).unwrap();

        assert_eq!(config.catalog.latency_ms, 10);
        assert_eq!(config.catalog.source, PathBuf::from("catalog.json"));
        assert!(config.ui.show_basket);
        assert_eq!(config.log.level, "debug");
    }

    #[test]
    fn startup_without_variant_code() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(
            &path,
            r#"
[startup]
catalog_id = "acme"
article_number = "9000"
"#,
        )
        .unwrap();

        let startup = Config::load(&path).unwrap().startup.unwrap();
        assert_eq!(startup.variant_code, None);
    }

    #[test]
    fn load_nonexistent_returns_not_found() {
        let tmp = TempDir::new().unwrap();
        let result = Config::load(&tmp.path().join("nonexistent.toml"));
        assert!(matches!(result.unwrap_err(), CoreError::NotFound(_)));
    }

    #[test]
    fn load_invalid_toml_returns_config_parse() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "this is not valid [[[toml").unwrap();

        let result = Config::load(&path);
        assert!(matches!(result.unwrap_err(), CoreError::ConfigParse(_)));
    }
}
