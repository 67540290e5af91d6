//! Shell configuration loading.
//!
//! Reads an optional `cerebro.yaml`, then applies environment overrides.
//! A missing file is not an error: every field has a default matching the
//! stock local setup (embedding service on :8000, Vite dev server on :5173).
//! Configuration is read once at startup and never written back.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

/// Environment variable that overrides `service.endpoint`.
pub const ENDPOINT_ENV: &str = "CEREBRO_EMBED_ENDPOINT";

/// File name searched for when `CEREBRO_CONFIG` is unset.
pub const CONFIG_FILE_NAME: &str = "cerebro.yaml";

/// Default embedding endpoint of the local Python service.
pub const DEFAULT_EMBED_ENDPOINT: &str = "http://localhost:8000/embed";

/// Default dev-server URL for the UI surface.
pub const DEFAULT_DEV_URL: &str = "http://localhost:5173";

// ─── Errors ──────────────────────────────────────────────────────────────────

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file exists but could not be read.
    #[error("failed to read {path}: {reason}")]
    Read { path: String, reason: String },

    /// The file is not valid YAML for [`ShellConfig`].
    #[error("failed to parse config: {reason}")]
    Parse { reason: String },
}

// ─── Public Types ────────────────────────────────────────────────────────────

/// Whether the window loads the dev server or the bundled UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunMode {
    Development,
    Production,
}

impl RunMode {
    /// Anything other than `production` is development.
    pub fn from_env_value(value: Option<&str>) -> Self {
        match value {
            Some("production") => RunMode::Production,
            _ => RunMode::Development,
        }
    }
}

/// Embedding service settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Upper bound on the outbound call. `None` waits indefinitely.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

impl ServiceConfig {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            request_timeout_secs: None,
        }
    }
}

/// Main window settings.
#[derive(Debug, Clone, Deserialize)]
pub struct WindowConfig {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_width")]
    pub width: f64,
    #[serde(default = "default_height")]
    pub height: f64,
    #[serde(default = "default_dev_url")]
    pub dev_url: String,
    /// Bundled entry point, relative to the frontend dist directory.
    #[serde(default = "default_dist_index")]
    pub dist_index: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            width: default_width(),
            height: default_height(),
            dev_url: default_dev_url(),
            dist_index: default_dist_index(),
        }
    }
}

/// Top-level shell configuration (mirrors `cerebro.yaml`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShellConfig {
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub window: WindowConfig,
    /// Overrides `CEREBRO_ENV` when set.
    #[serde(default)]
    pub mode: Option<RunMode>,
}

impl ShellConfig {
    /// Effective run mode: the file wins, then `CEREBRO_ENV`.
    pub fn run_mode(&self) -> RunMode {
        self.mode.unwrap_or_else(|| {
            RunMode::from_env_value(std::env::var("CEREBRO_ENV").ok().as_deref())
        })
    }
}

fn default_endpoint() -> String {
    DEFAULT_EMBED_ENDPOINT.to_string()
}
fn default_title() -> String {
    "Cerebro".to_string()
}
fn default_width() -> f64 {
    1200.0
}
fn default_height() -> f64 {
    800.0
}
fn default_dev_url() -> String {
    DEFAULT_DEV_URL.to_string()
}
fn default_dist_index() -> String {
    "index.html".to_string()
}

// ─── Loading ─────────────────────────────────────────────────────────────────

/// Locate the config file.
///
/// `CEREBRO_CONFIG` wins when it names an existing file; otherwise walks
/// upward from `start` looking for `cerebro.yaml`.
pub fn find_config_path(start: &Path) -> Option<PathBuf> {
    if let Ok(explicit) = std::env::var("CEREBRO_CONFIG") {
        let candidate = PathBuf::from(explicit);
        if candidate.is_file() {
            return Some(candidate);
        }
    }

    let mut dir = start.to_path_buf();
    loop {
        let candidate = dir.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            return Some(candidate);
        }
        if !dir.pop() {
            return None;
        }
    }
}

/// Parse a config file.
pub fn load_config(path: &Path) -> Result<ShellConfig, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    parse_config(&raw)
}

/// Parse config text. An empty document yields the defaults.
pub fn parse_config(raw: &str) -> Result<ShellConfig, ConfigError> {
    if raw.trim().is_empty() {
        return Ok(ShellConfig::default());
    }
    serde_yaml::from_str(raw).map_err(|e| ConfigError::Parse {
        reason: e.to_string(),
    })
}

/// Apply environment overrides on top of the file settings.
///
/// `lookup` is `std::env::var` in production.
pub fn apply_env_overrides<F>(mut config: ShellConfig, lookup: F) -> ShellConfig
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(endpoint) = lookup(ENDPOINT_ENV).filter(|v| !v.trim().is_empty()) {
        tracing::info!(endpoint = %endpoint, "embedding endpoint overridden by {ENDPOINT_ENV}");
        config.service.endpoint = endpoint;
    }
    config
}

/// Resolve the effective configuration for this run.
///
/// A broken config file is logged and replaced by defaults so the shell
/// still starts.
pub fn resolve_config(start: &Path) -> ShellConfig {
    apply_env_overrides(load_or_default(start), |name| std::env::var(name).ok())
}

fn load_or_default(start: &Path) -> ShellConfig {
    let Some(path) = find_config_path(start) else {
        tracing::info!("no {CONFIG_FILE_NAME} found, using defaults");
        return ShellConfig::default();
    };

    match load_config(&path) {
        Ok(config) => {
            tracing::info!(
                path = %path.display(),
                endpoint = %config.service.endpoint,
                "loaded shell config"
            );
            config
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "invalid shell config, using defaults");
            ShellConfig::default()
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_local_setup() {
        let config = ShellConfig::default();
        assert_eq!(config.service.endpoint, "http://localhost:8000/embed");
        assert!(config.service.request_timeout().is_none());
        assert_eq!(config.window.width, 1200.0);
        assert_eq!(config.window.height, 800.0);
        assert_eq!(config.window.dev_url, "http://localhost:5173");
    }

    #[test]
    fn test_empty_document_is_default() {
        let config = parse_config("   \n").unwrap();
        assert_eq!(config.service.endpoint, DEFAULT_EMBED_ENDPOINT);
        assert!(config.mode.is_none());
    }

    #[test]
    fn test_partial_document_fills_defaults() {
        let yaml = r#"
            service:
              request_timeout_secs: 30
            mode: production
        "#;
        let config = parse_config(yaml).unwrap();
        assert_eq!(config.service.endpoint, DEFAULT_EMBED_ENDPOINT);
        assert_eq!(config.service.request_timeout(), Some(Duration::from_secs(30)));
        assert_eq!(config.run_mode(), RunMode::Production);
        assert_eq!(config.window.title, "Cerebro");
    }

    #[test]
    fn test_endpoint_env_override() {
        let config = apply_env_overrides(ShellConfig::default(), |name| {
            (name == ENDPOINT_ENV).then(|| "http://svc:8000/embed".to_string())
        });
        assert_eq!(config.service.endpoint, "http://svc:8000/embed");
    }

    #[test]
    fn test_blank_env_override_is_ignored() {
        let config = apply_env_overrides(ShellConfig::default(), |_| Some("  ".to_string()));
        assert_eq!(config.service.endpoint, DEFAULT_EMBED_ENDPOINT);

        let config = apply_env_overrides(ShellConfig::default(), |_| None);
        assert_eq!(config.service.endpoint, DEFAULT_EMBED_ENDPOINT);
    }

    #[test]
    fn test_invalid_yaml_is_parse_error() {
        let err = parse_config("service: [unterminated").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_run_mode_from_env_value() {
        assert_eq!(RunMode::from_env_value(Some("production")), RunMode::Production);
        assert_eq!(RunMode::from_env_value(Some("staging")), RunMode::Development);
        assert_eq!(RunMode::from_env_value(None), RunMode::Development);
    }

    #[test]
    fn test_find_config_walks_upward() {
        let root = tempfile::tempdir().unwrap();
        let nested = root.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(root.path().join(CONFIG_FILE_NAME), "mode: development\n").unwrap();

        let found = find_config_path(&nested).unwrap();
        assert_eq!(found, root.path().join(CONFIG_FILE_NAME));
        let config = load_config(&found).unwrap();
        assert_eq!(config.mode, Some(RunMode::Development));
    }
}
