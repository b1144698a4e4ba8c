//! # switchboard — interactive remote
//!
//! Loads the configuration, installs the tracing subscriber (stderr), wires
//! the remote and runs the menu on stdin/stdout.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use switchboard::config::Config;
use switchboard::session::Session;
use switchboard::setup;

/// Interactive remote control with undo.
#[derive(Debug, Parser)]
#[command(name = "switchboard", version, about)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, env = "SWITCHBOARD_CONFIG")]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref()).context("failed to load configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&config.logging.filter).unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let mut remote = setup::build_remote(&config).context("failed to wire devices")?;
    tracing::info!(
        devices = remote.devices().len(),
        policy = ?remote.policy(),
        "remote ready"
    );

    let stdin = std::io::stdin().lock();
    let stdout = std::io::stdout().lock();
    Session::new(&mut remote, stdin, stdout).run()?;

    Ok(())
}
