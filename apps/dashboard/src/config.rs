//! Dashboard configuration management.
//!
//! Configuration is stored as TOML:
//! - Linux: `~/.config/airwatch/dashboard.toml`
//! - Windows: `%APPDATA%/airwatch/dashboard.toml`

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Environment variable that overrides [`DashboardConfig::endpoint`].
pub const ENDPOINT_ENV: &str = "AIRWATCH_ENDPOINT";

const DEFAULT_ENDPOINT: &str = "http://jalaniotkel4.my.id/ambil-data";

/// Dashboard configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Telemetry endpoint URL.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Seconds between polls.
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,

    /// Where the rendered HTML page is written.
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,

    /// Hex color of the history chart.
    #[serde(default = "default_chart_color")]
    pub chart_color: String,

    /// Gauge diameter in pixels.
    #[serde(default = "default_gauge_size")]
    pub gauge_size: f32,

    /// Per-request timeout in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.into()
}

fn default_poll_interval_secs() -> u64 {
    3
}

fn default_output_path() -> PathBuf {
    PathBuf::from("airwatch-dashboard.html")
}

fn default_chart_color() -> String {
    "#3b82f6".into()
}

fn default_gauge_size() -> f32 {
    airwatch_widgets::gauge::DEFAULT_SIZE
}

fn default_request_timeout_secs() -> u64 {
    10
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            poll_interval_secs: default_poll_interval_secs(),
            output_path: default_output_path(),
            chart_color: default_chart_color(),
            gauge_size: default_gauge_size(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl DashboardConfig {
    /// Loads configuration from the default location, creating it if missing.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&config_path()?)
    }

    /// Loads configuration from `path`, writing defaults there if not found.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            let config: DashboardConfig = toml::from_str(&content)
                .with_context(|| format!("parsing {}", path.display()))?;
            Ok(config)
        } else {
            let config = DashboardConfig::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    /// Saves the configuration to `path`.
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))?;
        }

        tracing::debug!(path = %path.display(), "configuration saved");
        Ok(())
    }

    /// Applies environment overrides using `lookup` to read variables.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(endpoint) = lookup(ENDPOINT_ENV) {
            let endpoint = endpoint.trim();
            if !endpoint.is_empty() {
                tracing::info!(endpoint, "endpoint overridden from environment");
                self.endpoint = endpoint.to_owned();
            }
        }
    }

    /// Poll period, never shorter than one second.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs.max(1))
    }

    /// Request timeout, never shorter than one second.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}

/// Returns the platform-specific configuration file path.
pub fn config_path() -> anyhow::Result<PathBuf> {
    #[cfg(target_os = "linux")]
    {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
        Ok(PathBuf::from(home)
            .join(".config")
            .join("airwatch")
            .join("dashboard.toml"))
    }

    #[cfg(target_os = "windows")]
    {
        let appdata =
            std::env::var("APPDATA").unwrap_or_else(|_| "C:\\Users\\Default\\AppData".into());
        Ok(PathBuf::from(appdata).join("airwatch").join("dashboard.toml"))
    }

    #[cfg(not(any(target_os = "linux", target_os = "windows")))]
    {
        Ok(PathBuf::from("/tmp/airwatch/dashboard.toml"))
    }
}
