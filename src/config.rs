use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_VERIFY_CONSOLE_URL: &str =
    "https://www.twilio.com/console/phone-numbers/verified";

/// Client configuration, read from an optional `callwatch.toml`. Every
/// key falls back to its default, so a partial file is fine.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub base_url: String,
    pub poll_interval_secs: u64,
    pub request_timeout_secs: u64,
    pub dismiss_secs: u64,
    pub verify_console_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            poll_interval_secs: 10,
            request_timeout_secs: 5,
            dismiss_secs: 15,
            verify_console_url: DEFAULT_VERIFY_CONSOLE_URL.to_string(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        toml::from_str(&raw).with_context(|| format!("failed to parse config {}", path.display()))
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs.max(1))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    pub fn dismiss_after(&self) -> Duration {
        Duration::from_secs(self.dismiss_secs.max(1))
    }
}
