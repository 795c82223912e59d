//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `hopfollow` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - Ctrl-C cancellation
//! - User-facing output and exit codes
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;
use tokio_util::sync::CancellationToken;

use hopfollow::initialization::init_logger_with;
use hopfollow::{resolve_final_url, Config, Opt};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from(Opt::parse());

    init_logger_with(config.effective_log_level(), config.log_format.clone())
        .context("Failed to initialize logger")?;

    let cancel = CancellationToken::new();
    let ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrl_c.cancel();
        }
    });

    match resolve_final_url(&config, cancel).await {
        Ok(resolution) => {
            println!("{}", resolution.final_url);
            Ok(())
        }
        Err(e) => {
            let code = e.kind().exit_code();
            eprintln!("hopfollow error: {:#}", anyhow::Error::new(e));
            process::exit(code);
        }
    }
}
