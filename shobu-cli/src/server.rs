//! Server command - start the game server
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: configure_server(), start_server()
//! - Level 3: (delegated to shobu-server crate)
//! - Level 4: configuration validation

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;

use shobu_server::{run_server, ServerConfig};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct ServerArgs {
    /// Port number to listen on
    #[arg(long, default_value = "8002")]
    pub port: u16,

    /// Directory containing static files for the board renderer
    #[arg(long, default_value = "static")]
    pub static_dir: PathBuf,

    /// Milliseconds between version checks while long-polling
    #[arg(long, default_value = "100")]
    pub poll_interval_ms: u64,

    /// Version checks before a long-poll gives up
    #[arg(long, default_value = "50")]
    pub poll_attempts: u32,

    /// Seed for room codes and color draws (random if omitted)
    #[arg(long)]
    pub seed: Option<u64>,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run server command
pub fn run(args: ServerArgs) -> Result<()> {
    let config = configure_server(&args)?;

    tracing::info!(
        port = config.port,
        poll_ms = config.poll_interval_ms,
        seeded = config.seed.is_some(),
        "starting SHOBU server"
    );

    start_server(config)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Configure server from command arguments
fn configure_server(args: &ServerArgs) -> Result<ServerConfig> {
    validate_static_dir(&args.static_dir)?;
    if args.poll_attempts == 0 {
        anyhow::bail!("--poll-attempts must be at least 1");
    }

    Ok(ServerConfig {
        port: args.port,
        static_dir: args.static_dir.to_string_lossy().to_string(),
        poll_interval_ms: args.poll_interval_ms,
        poll_attempts: args.poll_attempts,
        seed: args.seed,
    })
}

/// Start the server (blocking)
fn start_server(config: ServerConfig) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(run_server(config))
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Warn on a missing static directory, fail on a path that is not one
fn validate_static_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        tracing::warn!(
            "Static directory does not exist: {}. Server will start but may not serve files.",
            path.display()
        );
    } else if !path.is_dir() {
        anyhow::bail!(
            "Static path exists but is not a directory: {}",
            path.display()
        );
    }

    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        args: ServerArgs,
    }

    #[test]
    fn test_flag_defaults_match_server_defaults() {
        let cli = TestCli::parse_from(["shobu", "--static-dir", "test_static"]);
        let config = configure_server(&cli.args).unwrap();
        let defaults = ServerConfig::default();

        assert_eq!(config.port, defaults.port);
        assert_eq!(config.poll_interval_ms, defaults.poll_interval_ms);
        assert_eq!(config.poll_attempts, defaults.poll_attempts);
        assert_eq!(config.static_dir, "test_static");
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_flags_override() {
        let cli = TestCli::parse_from([
            "shobu",
            "--port",
            "9000",
            "--seed",
            "7",
            "--poll-attempts",
            "3",
        ]);
        let config = configure_server(&cli.args).unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.poll_attempts, 3);
    }

    #[test]
    fn test_zero_poll_attempts_rejected() {
        let cli = TestCli::parse_from(["shobu", "--poll-attempts", "0"]);
        assert!(configure_server(&cli.args).is_err());
    }

    #[test]
    fn test_validate_static_dir_nonexistent() {
        // Should not error, just warn
        assert!(validate_static_dir(Path::new("/nonexistent/path")).is_ok());
    }

    #[test]
    fn test_validate_static_dir_rejects_file() {
        let file = std::env::temp_dir().join(format!("shobu-static-{}", std::process::id()));
        std::fs::write(&file, "not a dir").unwrap();
        assert!(validate_static_dir(&file).is_err());
        std::fs::remove_file(&file).unwrap();
    }
}
