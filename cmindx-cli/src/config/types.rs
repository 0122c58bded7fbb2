use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

pub use cmindx_server::{DEFAULT_HOST, DEFAULT_PORT};

/// Seconds between dashboard polls
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 5;
/// Rows kept in the dashboard event log
pub const DEFAULT_TAIL_ROWS: usize = 80;
/// HTTP request timeout for the CLI's clients
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Where the server records events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Process memory, lost on restart
    #[default]
    Memory,
    /// libSQL database, local file or remote Turso
    Turso,
}

/// Configuration as stored in TOML files (with optional fields for merging)
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawCmindxConfig {
    #[serde(default)]
    pub server: RawServerConfig,

    #[serde(default)]
    pub storage: RawStorageConfig,

    #[serde(default)]
    pub dashboard: RawDashboardConfig,

    #[serde(default)]
    pub client: RawClientConfig,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawServerConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawStorageConfig {
    pub backend: Option<StorageBackend>,
    pub path: Option<PathBuf>,
    pub url: Option<String>,
    pub token: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawDashboardConfig {
    pub url: Option<String>,
    pub poll_interval_secs: Option<u64>,
    pub tail_rows: Option<usize>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawClientConfig {
    pub timeout_secs: Option<u64>,
}

/// Final configuration with defaults applied
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct CmindxConfig {
    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub storage: StorageSection,

    #[serde(default)]
    pub dashboard: DashboardSection,

    #[serde(default)]
    pub client: ClientSection,
}

impl CmindxConfig {
    /// URL clients use to reach the configured server.
    ///
    /// `dashboard.url` wins when set; a wildcard bind address is reached
    /// through loopback.
    pub fn server_url(&self) -> String {
        if let Some(url) = &self.dashboard.url {
            return url.trim_end_matches('/').to_string();
        }
        let host = match self.server.host.as_str() {
            "0.0.0.0" | "::" | "[::]" => DEFAULT_HOST,
            host => host,
        };
        format!("http://{}:{}", host, self.server.port)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.client.timeout_secs)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.dashboard.poll_interval_secs.max(1))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerSection {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct StorageSection {
    pub backend: StorageBackend,

    /// Local database file for the turso backend
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,

    /// Remote database URL; takes precedence over `path`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardSection {
    /// Server to poll; defaults to the `[server]` address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub poll_interval_secs: u64,
    pub tail_rows: usize,
}

impl Default for DashboardSection {
    fn default() -> Self {
        Self {
            url: None,
            poll_interval_secs: DEFAULT_POLL_INTERVAL_SECS,
            tail_rows: DEFAULT_TAIL_ROWS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClientSection {
    pub timeout_secs: u64,
}

impl Default for ClientSection {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}
