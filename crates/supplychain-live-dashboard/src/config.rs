/*
[INPUT]:  YAML configuration file
[OUTPUT]: Parsed dashboard configuration and adapter settings
[POS]:    Configuration layer - live channel and HTTP setup
[UPDATE]: When adding new configuration options
*/

use std::time::Duration;

use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use supplychain_live_adapter::http::DEFAULT_STATS_PATH;
use supplychain_live_adapter::{ClientConfig, LiveConfig, ReconnectPolicy};
use url::Url;

/// Top-level configuration for the dashboard watcher
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DashboardConfig {
    /// Live update channel
    #[serde(default)]
    pub live: LiveSection,
    /// Dashboard HTTP endpoints
    #[serde(default)]
    pub http: HttpSection,
    /// Seconds between dashboard counter refreshes; 0 disables
    #[serde(default = "default_refresh_interval_secs")]
    pub refresh_interval_secs: u64,
}

/// Live channel configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LiveSection {
    /// WebSocket endpoint (ws:// or wss://)
    #[serde(default = "default_live_url")]
    pub url: String,
    /// Connect at all
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,
    /// Consecutive failed reconnects before giving up
    #[serde(default = "default_max_reconnect_attempts")]
    pub max_reconnect_attempts: u32,
    #[serde(default = "default_heartbeat_interval_secs")]
    pub heartbeat_interval_secs: u64,
}

/// HTTP endpoint configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HttpSection {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    /// Counters endpoint; supplier and customer dashboards differ
    #[serde(default = "default_stats_path")]
    pub stats_path: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            live: LiveSection::default(),
            http: HttpSection::default(),
            refresh_interval_secs: default_refresh_interval_secs(),
        }
    }
}

impl Default for LiveSection {
    fn default() -> Self {
        Self {
            url: default_live_url(),
            enabled: default_enabled(),
            base_delay_ms: default_base_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
            max_reconnect_attempts: default_max_reconnect_attempts(),
            heartbeat_interval_secs: default_heartbeat_interval_secs(),
        }
    }
}

impl Default for HttpSection {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            stats_path: default_stats_path(),
        }
    }
}

fn default_live_url() -> String {
    "ws://localhost:8000/ws/dashboard/".to_string()
}

fn default_enabled() -> bool {
    true
}

fn default_base_delay_ms() -> u64 {
    1000
}

fn default_max_delay_ms() -> u64 {
    60_000
}

fn default_max_reconnect_attempts() -> u32 {
    5
}

fn default_heartbeat_interval_secs() -> u64 {
    30
}

fn default_base_url() -> String {
    "http://localhost:8000/".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_stats_path() -> String {
    DEFAULT_STATS_PATH.to_string()
}

fn default_refresh_interval_secs() -> u64 {
    30
}

impl DashboardConfig {
    /// Load configuration from YAML file
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Reject settings the adapter cannot run with.
    pub fn validate(&self) -> anyhow::Result<()> {
        let live_url = self.live_url()?;
        if !matches!(live_url.scheme(), "ws" | "wss") {
            bail!("live.url must use ws:// or wss://, got `{}`", live_url.scheme());
        }

        let base_url = self.base_url()?;
        if !matches!(base_url.scheme(), "http" | "https") {
            bail!("http.base_url must use http:// or https://, got `{}`", base_url.scheme());
        }

        if self.live.max_reconnect_attempts == 0 {
            bail!("live.max_reconnect_attempts must be at least 1");
        }
        if self.live.base_delay_ms == 0 {
            bail!("live.base_delay_ms must be positive");
        }
        if self.live.max_delay_ms < self.live.base_delay_ms {
            bail!(
                "live.max_delay_ms ({}) is below live.base_delay_ms ({})",
                self.live.max_delay_ms,
                self.live.base_delay_ms
            );
        }
        if self.live.heartbeat_interval_secs == 0 {
            bail!("live.heartbeat_interval_secs must be positive");
        }
        if self.http.timeout_secs == 0 || self.http.connect_timeout_secs == 0 {
            bail!("http timeouts must be positive");
        }
        if !self.http.stats_path.starts_with('/') {
            bail!("http.stats_path must be absolute, got `{}`", self.http.stats_path);
        }
        Ok(())
    }

    pub fn live_url(&self) -> anyhow::Result<Url> {
        if self.live.url.trim().is_empty() {
            bail!("live.url is empty");
        }
        Url::parse(&self.live.url).with_context(|| format!("invalid live.url `{}`", self.live.url))
    }

    pub fn base_url(&self) -> anyhow::Result<Url> {
        if self.http.base_url.trim().is_empty() {
            bail!("http.base_url is empty");
        }
        Url::parse(&self.http.base_url)
            .with_context(|| format!("invalid http.base_url `{}`", self.http.base_url))
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }

    pub fn live_config(&self) -> LiveConfig {
        LiveConfig {
            enabled: self.live.enabled,
            reconnect: ReconnectPolicy {
                base_delay: Duration::from_millis(self.live.base_delay_ms),
                max_delay: Duration::from_millis(self.live.max_delay_ms),
                max_attempts: self.live.max_reconnect_attempts,
            },
            heartbeat_interval: Duration::from_secs(self.live.heartbeat_interval_secs),
        }
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            timeout: Duration::from_secs(self.http.timeout_secs),
            connect_timeout: Duration::from_secs(self.http.connect_timeout_secs),
            stats_path: self.http.stats_path.clone(),
        }
    }
}
