//! Dashboard command - launches the terminal dashboard
//!
//! Polls the server's event log and renders per-variant statistics.

use std::time::Duration;

use anyhow::Result;
use clap::Args;
use cmindx_tui::{App, DashboardConfig, install_panic_hook};

use crate::config::{CmindxConfig, ConfigLoader};

#[derive(Args, Debug, Default)]
#[command(after_long_help = "\
Examples:
  cmindx dashboard                              Poll the configured server
  cmindx dashboard --url http://10.0.0.5:7743   Poll another server
  cmindx dashboard --interval 2                 Refresh every 2 seconds
")]
pub struct DashboardArgs {
    /// Server base URL (defaults to the configured server)
    #[arg(long)]
    pub url: Option<String>,

    /// Seconds between polls
    #[arg(long)]
    pub interval: Option<u64>,

    /// Rows kept in the event log
    #[arg(long)]
    pub tail_rows: Option<usize>,
}

impl DashboardArgs {
    /// Merge flags with the loaded config
    pub fn resolve(&self, config: &CmindxConfig) -> DashboardConfig {
        DashboardConfig {
            url: self
                .url
                .clone()
                .unwrap_or_else(|| config.server_url()),
            poll_interval: self
                .interval
                .map(|secs| Duration::from_secs(secs.max(1)))
                .unwrap_or_else(|| config.poll_interval()),
            tail_rows: self.tail_rows.unwrap_or(config.dashboard.tail_rows),
            timeout: config.timeout(),
        }
    }
}

pub async fn run(args: DashboardArgs) -> Result<()> {
    let config = ConfigLoader::load()?;
    let dashboard = args.resolve(&config);

    install_panic_hook();

    let mut app = App::with_config(dashboard);
    app.run().await?;

    Ok(())
}
