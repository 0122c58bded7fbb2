//! Serve command: runs the ingestion server.
//!
//! The server provides:
//! - `POST/GET /events` for landing pages and dashboards
//! - `/api/stats` and `/api/health`
//! - a server-rendered landing page at `/`

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use cmindx_core::{EventSink, MemoryEventSink, TursoEventSink};
use cmindx_server::{AppState, CmindxServer, ServerConfig};
use tracing::{info, warn};

use crate::config::{CmindxConfig, ConfigLoader, StorageBackend};

/// Arguments for the serve command
#[derive(Debug, Args, Default)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Host to bind to
    #[arg(long)]
    pub host: Option<String>,

    /// Event storage backend
    #[arg(long, value_enum)]
    pub storage: Option<StorageBackend>,

    /// Database file for the turso backend
    #[arg(long)]
    pub db_path: Option<PathBuf>,

    /// Remote libSQL/Turso URL (overrides --db-path)
    #[arg(long)]
    pub db_url: Option<String>,

    /// Auth token for --db-url
    #[arg(long)]
    pub db_token: Option<String>,
}

impl ServeArgs {
    /// Apply command-line flags on top of the loaded config
    pub fn apply(&self, config: &mut CmindxConfig) {
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(backend) = self.storage {
            config.storage.backend = backend;
        }
        if let Some(path) = &self.db_path {
            config.storage.path = Some(path.clone());
        }
        if let Some(url) = &self.db_url {
            config.storage.url = Some(url.clone());
        }
        if let Some(token) = &self.db_token {
            config.storage.token = Some(token.clone());
        }
    }
}

/// Run the serve command
pub async fn run(args: ServeArgs) -> Result<()> {
    let mut config = ConfigLoader::load()?;
    args.apply(&mut config);

    let sink = open_sink(&config).await?;
    let server_config = ServerConfig::new(config.server.host.clone(), config.server.port);

    info!(
        backend = sink.backend(),
        "Starting cmindx server on {}",
        server_config.addr()
    );

    let server = CmindxServer::with_state(server_config, Arc::new(AppState::with_sink(sink)));
    server.run().await.map_err(Into::into)
}

/// Build the event sink described by `[storage]`
pub async fn open_sink(config: &CmindxConfig) -> Result<Arc<dyn EventSink>> {
    let storage = &config.storage;
    match storage.backend {
        StorageBackend::Memory => {
            if storage.path.is_some() || storage.url.is_some() {
                warn!("storage.path/url are ignored by the memory backend");
            }
            Ok(Arc::new(MemoryEventSink::new()))
        }
        StorageBackend::Turso => {
            if let Some(url) = &storage.url {
                let token = storage.token.as_deref().unwrap_or_default();
                let sink = TursoEventSink::new_remote(url, token)
                    .await
                    .with_context(|| format!("Failed to connect to {}", url))?;
                return Ok(Arc::new(sink));
            }

            let path = match &storage.path {
                Some(path) => path.clone(),
                None => ConfigLoader::default_database_path()
                    .context("No storage.path configured and no data directory available")?,
            };
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
            {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }

            info!("Recording events to {}", path.display());
            let sink = TursoEventSink::new_local(&path)
                .await
                .with_context(|| format!("Failed to open database {}", path.display()))?;
            Ok(Arc::new(sink))
        }
    }
}
