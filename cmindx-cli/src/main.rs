use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "cmindx", about = "A/B landing page telemetry")]
#[command(version, propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage configuration
    Config(commands::config::ConfigArgs),
    /// Live terminal dashboard
    Dashboard(commands::dashboard::DashboardArgs),
    /// Run the ingestion server
    Serve(commands::serve::ServeArgs),
    /// Send synthetic visitor traffic to a server
    Simulate(commands::simulate::SimulateArgs),
    /// Print per-variant statistics
    Stats(commands::stats::StatsArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    if matches!(cli.command, Commands::Dashboard(_)) {
        // Anything written to the terminal would tear the dashboard.
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::sink)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    match cli.command {
        Commands::Config(args) => commands::config::run(args),
        Commands::Dashboard(args) => commands::dashboard::run(args).await,
        Commands::Serve(args) => commands::serve::run(args).await,
        Commands::Simulate(args) => commands::simulate::run(args).await,
        Commands::Stats(args) => commands::stats::run(args).await,
    }
}
