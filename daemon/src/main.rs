//! ballotd: command-line entry point for the election ledger.
//!
//! Each invocation is one transaction against the LMDB ledger in `data_dir`.
//! Results are printed to stdout as JSON; failures exit with status 1.

mod cli;
mod config;
mod context;
mod dispatch;

use std::process::ExitCode;

use anyhow::Context as _;
use ballot_election::ElectionService;
use ballot_store_lmdb::LmdbEnvironment;
use ballot_utils::LogFormat;
use clap::Parser;

use crate::cli::Cli;
use crate::config::DaemonConfig;
use crate::context::SystemContext;
use crate::dispatch::{dispatch, failure, success};

/// Layer CLI flags and env vars over the file (or default) configuration.
fn resolve_config(cli: &Cli) -> anyhow::Result<DaemonConfig> {
    let mut config = match &cli.config {
        Some(path) => DaemonConfig::from_toml_file(path)?,
        None => DaemonConfig::default(),
    };
    if let Some(dir) = &cli.data_dir {
        config.data_dir = dir.clone();
    }
    if let Some(msp) = &cli.msp_id {
        config.msp_id = msp.clone();
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    if let Some(format) = &cli.log_format {
        config.log_format = format.parse::<LogFormat>()?;
    }
    if let Some(attempts) = cli.max_attempts {
        config.max_commit_attempts = attempts;
    }
    config.validate()?;
    Ok(config)
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;
    ballot_utils::init_tracing(&config.log_level, config.log_format);

    let env = LmdbEnvironment::open(&config.data_dir, config.map_size_bytes())
        .with_context(|| format!("opening ledger at {}", config.data_dir.display()))?;
    let service = ElectionService::new(env.ledger_store());
    let ctx = SystemContext::new(&config.msp_id, cli.caller_id.as_deref());

    tracing::debug!(command = ?cli.command, data_dir = %config.data_dir.display(), "dispatching");

    let (payload, code) = match dispatch(&service, &ctx, &cli.command, config.max_commit_attempts) {
        Ok(data) => (success(data), ExitCode::SUCCESS),
        Err(e) => (failure(&e), ExitCode::FAILURE),
    };
    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(code)
}
