//! SHOBU CLI - Command-line interface
//!
//! Commands:
//! - serve: Start the game server
//! - show: Print a saved game snapshot

mod server;
mod show;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "shobu")]
#[command(about = "SHOBU game server and tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the game server
    Serve(server::ServerArgs),
    /// Print a saved game snapshot and its winner
    Show(show::ShowArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve(args) => server::run(args),
        Commands::Show(args) => show::run(args),
    }
}
