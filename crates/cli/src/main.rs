// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! tix - event leases and voucher issuance from the command line

mod commands;
mod output;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use commands::{event, lock, voucher};
use output::OutputFormat;
use std::path::PathBuf;
use std::process::ExitCode;
use tix_adapters::{Dispatcher, LogNotifyAdapter, TracedNotifyAdapter};
use tix_core::{CoordinationConfig, OutcomeStatus, SystemCoordinator};
use tix_storage::WalStore;

#[derive(Parser)]
#[command(
    name = "tix",
    version,
    about = "tix - Race-free event leases and voucher issuance"
)]
struct Cli {
    /// Store directory
    #[arg(long, global = true, env = "TIX_STORE", default_value = ".tix")]
    store: PathBuf,

    /// Config file (TOML)
    #[arg(long, global = true, env = "TIX_CONFIG")]
    config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Event administration
    Event(event::EventArgs),
    /// Edit leases
    Lock(lock::LockArgs),
    /// Voucher issuance and redemption
    Voucher(voucher::VoucherArgs),
}

#[tokio::main]
async fn main() -> ExitCode {
    setup_logging();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(status) => ExitCode::from(output::exit_code(status)),
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<OutcomeStatus> {
    let config = match &cli.config {
        Some(path) => CoordinationConfig::load(path)?,
        None => CoordinationConfig::default(),
    };
    let store = WalStore::open_with(&cli.store, &config.store)
        .with_context(|| format!("failed to open store at {}", cli.store.display()))?;
    tracing::debug!(store = %cli.store.display(), seq = store.sequence(), "store ready");

    let dispatcher = Dispatcher::spawn(
        TracedNotifyAdapter::new(LogNotifyAdapter::new()),
        &config.notify,
    );
    let coord = SystemCoordinator::system(store, dispatcher.clone(), &config);
    let format = OutputFormat::from_flag(cli.json);

    let result = match cli.command {
        Commands::Event(args) => event::handle(args.command, &coord, format),
        Commands::Lock(args) => lock::handle(args.command, &coord, format),
        Commands::Voucher(args) => voucher::handle(args.command, &coord, format),
    };

    // Deliver whatever was committed, even if the command itself failed
    let stats = dispatcher.shutdown().await;
    tracing::debug!(?stats, "notices flushed");

    result
}

fn setup_logging() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_env("TIX_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
