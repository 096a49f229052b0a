//! flowsync — push changed scripts into decision-flow code nodes.
//!
//! # Usage
//!
//! ```text
//! flowsync [--config <path>] [--dry-run] [FILES]...
//! ```
//!
//! Each `FILE` is matched by basename without extension, so
//! `scripts/score.py` updates every code node named `score`. The API key is
//! read from `TAKTILE_API_KEY` (configurable via `api_key_env`).

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use flowsync_client::HttpApi;
use flowsync_core::Config;
use flowsync_sync::{pipeline, Journal, SyncOptions};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "flowsync",
    version,
    about = "Sync changed scripts into the code nodes of remote decision flows",
    long_about = None,
)]
struct Cli {
    /// Changed script paths, typically from the CI diff.
    files: Vec<String>,

    /// YAML config file (defaults to ./flowsync.yaml when present).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log the patch payloads without sending them.
    #[arg(long)]
    dry_run: bool,
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref()).context("failed to load configuration")?;
    let api = HttpApi::new(&config, config.credential());
    let mut journal = Journal::open(&config.log_file)
        .with_context(|| format!("failed to open log file {}", config.log_file.display()))?;

    let options = SyncOptions {
        dry_run: cli.dry_run,
    };
    let report = pipeline::run(&cli.files, &config, &api, &mut journal, options)
        .context("sync aborted")?;

    tracing::debug!(
        flows = report.flows.len(),
        skipped = report.skipped_flows.len(),
        files = report.files.len(),
        "run complete"
    );
    Ok(())
}

/// Diagnostics go to stderr so stdout carries only the journal mirror.
fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
