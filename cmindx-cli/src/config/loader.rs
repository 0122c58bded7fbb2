use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;

use super::types::{
    ClientSection, CmindxConfig, DEFAULT_HOST, DEFAULT_POLL_INTERVAL_SECS, DEFAULT_PORT,
    DEFAULT_TAIL_ROWS, DEFAULT_TIMEOUT_SECS, DashboardSection, RawClientConfig, RawCmindxConfig,
    RawDashboardConfig, RawServerConfig, RawStorageConfig, ServerSection, StorageSection,
};

/// Environment variable that relocates the project config directory
pub const PROJECT_CONFIG_DIR_ENV: &str = "CMINDX_PROJECT_CONFIG_DIR";

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load merged configuration (defaults < user < project)
    pub fn load() -> Result<CmindxConfig> {
        Self::load_layers(
            Self::user_config_path().as_deref(),
            &Self::project_config_path(),
        )
    }

    /// Load from explicit user and project paths; missing files are skipped
    pub fn load_layers(user: Option<&Path>, project: &Path) -> Result<CmindxConfig> {
        let mut raw = RawCmindxConfig::default();

        // Layer 1: User config
        if let Some(user_path) = user
            && let Some(user_config) = Self::read_raw(user_path)?
        {
            raw = Self::merge_raw(raw, user_config);
        }

        // Layer 2: Project config
        if let Some(project_config) = Self::read_raw(project)? {
            raw = Self::merge_raw(raw, project_config);
        }

        Ok(Self::finalize(raw))
    }

    fn read_raw(path: &Path) -> Result<Option<RawCmindxConfig>> {
        if !path.exists() {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let raw = toml::from_str(&contents)
            .with_context(|| format!("Invalid config in {}", path.display()))?;
        Ok(Some(raw))
    }

    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("", "", "cmindx")
    }

    /// Get user config path (platform-specific)
    pub fn user_config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Default database file for the turso backend when no path is configured
    pub fn default_database_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.data_dir().join("events.db"))
    }

    /// Get project config path
    /// Can be overridden with CMINDX_PROJECT_CONFIG_DIR (useful for isolated tests)
    pub fn project_config_path() -> PathBuf {
        match std::env::var(PROJECT_CONFIG_DIR_ENV) {
            Ok(dir) => PathBuf::from(dir).join("config.toml"),
            Err(_) => PathBuf::from(".cmindx/config.toml"),
        }
    }

    /// Merge two raw configs (overlay values override base only if explicitly set)
    fn merge_raw(base: RawCmindxConfig, overlay: RawCmindxConfig) -> RawCmindxConfig {
        RawCmindxConfig {
            server: RawServerConfig {
                host: overlay.server.host.or(base.server.host),
                port: overlay.server.port.or(base.server.port),
            },
            storage: RawStorageConfig {
                backend: overlay.storage.backend.or(base.storage.backend),
                path: overlay.storage.path.or(base.storage.path),
                url: overlay.storage.url.or(base.storage.url),
                token: overlay.storage.token.or(base.storage.token),
            },
            dashboard: RawDashboardConfig {
                url: overlay.dashboard.url.or(base.dashboard.url),
                poll_interval_secs: overlay
                    .dashboard
                    .poll_interval_secs
                    .or(base.dashboard.poll_interval_secs),
                tail_rows: overlay.dashboard.tail_rows.or(base.dashboard.tail_rows),
            },
            client: RawClientConfig {
                timeout_secs: overlay.client.timeout_secs.or(base.client.timeout_secs),
            },
        }
    }

    /// Convert raw config to final config with defaults applied
    fn finalize(raw: RawCmindxConfig) -> CmindxConfig {
        CmindxConfig {
            server: ServerSection {
                host: raw.server.host.unwrap_or_else(|| DEFAULT_HOST.to_string()),
                port: raw.server.port.unwrap_or(DEFAULT_PORT),
            },
            storage: StorageSection {
                backend: raw.storage.backend.unwrap_or_default(),
                path: raw.storage.path,
                url: raw.storage.url,
                token: raw.storage.token,
            },
            dashboard: DashboardSection {
                url: raw.dashboard.url,
                poll_interval_secs: raw
                    .dashboard
                    .poll_interval_secs
                    .unwrap_or(DEFAULT_POLL_INTERVAL_SECS),
                tail_rows: raw.dashboard.tail_rows.unwrap_or(DEFAULT_TAIL_ROWS),
            },
            client: ClientSection {
                timeout_secs: raw.client.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StorageBackend;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_load_without_files_returns_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("nope.toml");

        let config = ConfigLoader::load_layers(Some(&missing), &missing).unwrap();
        assert_eq!(config, CmindxConfig::default());
    }

    #[test]
    fn test_project_overrides_user() {
        let temp_dir = TempDir::new().unwrap();
        let user = write(
            &temp_dir,
            "user.toml",
            r#"
[server]
host = "0.0.0.0"
port = 9000

[dashboard]
tail_rows = 20
"#,
        );
        let project = write(
            &temp_dir,
            "project.toml",
            r#"
[server]
port = 9100

[storage]
backend = "turso"
path = "data/events.db"
"#,
        );

        let config = ConfigLoader::load_layers(Some(&user), &project).unwrap();

        // user value survives where project is silent
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9100);
        assert_eq!(config.dashboard.tail_rows, 20);
        assert_eq!(config.storage.backend, StorageBackend::Turso);
        assert_eq!(config.storage.path, Some(PathBuf::from("data/events.db")));
        assert_eq!(config.client.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_load_invalid_toml_returns_error() {
        let temp_dir = TempDir::new().unwrap();
        let bad = write(&temp_dir, "bad.toml", "this is not valid toml {{");

        let result = ConfigLoader::load_layers(None, &bad);
        let message = format!("{:#}", result.unwrap_err());
        assert!(message.contains("bad.toml"), "got: {}", message);
    }

    #[test]
    fn test_merge_raw_none_preserves_base() {
        let base = RawCmindxConfig {
            server: RawServerConfig {
                host: Some("0.0.0.0".to_string()),
                port: Some(9000),
            },
            client: RawClientConfig {
                timeout_secs: Some(3),
            },
            ..Default::default()
        };

        let merged = ConfigLoader::merge_raw(base, RawCmindxConfig::default());

        assert_eq!(merged.server.host, Some("0.0.0.0".to_string()));
        assert_eq!(merged.server.port, Some(9000));
        assert_eq!(merged.client.timeout_secs, Some(3));
    }

    #[test]
    fn test_user_config_path_mentions_cmindx() {
        if let Some(path) = ConfigLoader::user_config_path() {
            assert!(path.to_string_lossy().contains("cmindx"));
            assert!(path.ends_with("config.toml"));
        }
    }

    #[test]
    fn test_project_config_path_default() {
        if std::env::var(PROJECT_CONFIG_DIR_ENV).is_err() {
            assert_eq!(
                ConfigLoader::project_config_path(),
                PathBuf::from(".cmindx/config.toml")
            );
        }
    }
}
