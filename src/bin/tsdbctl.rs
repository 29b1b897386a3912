//! tsdbctl CLI Binary
//!
//! Resolves the client configuration from flags, config file and environment,
//! then runs the requested command.

use anyhow::Context;
use clap::Parser;
use std::process;
use tracing::{error, info};
use tsdbctl::cli::{Cli, RunContext};
use tsdbctl::config::{TsdbConfig, DEFAULT_LOG_LEVEL};
use tsdbctl::logging::{init_logging, LoggingConfig};
use tsdbctl::performance::shutdown_default_reporter;

fn main() {
    let cli = Cli::parse();

    let logging_config = build_logging_config(&cli, DEFAULT_LOG_LEVEL);
    let log_handle = match init_logging(Some(&logging_config)) {
        Ok(handle) => handle,
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            process::exit(1);
        }
    };

    let context = match RunContext::new(&cli).context("Failed to resolve configuration") {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("{:#}", e);
            process::exit(1);
        }
    };

    if let Some(level) = resolved_level_change(&cli, context.config()) {
        if let Err(e) = log_handle.set_level(level) {
            eprintln!("Failed to apply log level: {}", e);
            process::exit(1);
        }
    }
    info!("tsdbctl starting");

    let result = context
        .execute(&cli.command)
        .context("Command failed");
    shutdown_default_reporter();

    match result {
        Ok(output) => {
            info!("Command completed successfully");
            println!("{}", output);
        }
        Err(e) => {
            error!("{:#}", e);
            eprintln!("{:#}", e);
            process::exit(1);
        }
    }
}

/// Build logging configuration from a starting level and CLI flags.
/// Precedence: CLI flags override the given level.
fn build_logging_config(cli: &Cli, level: &str) -> LoggingConfig {
    let mut config = LoggingConfig::with_level(level);

    if let Some(ref level) = cli.log_level {
        config.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        config.format = format.clone();
    }
    if let Some(ref output) = cli.log_output {
        config.output = output.clone();
    }

    config
}

/// Level to switch to after resolution: the resolved `log_level`, unless
/// `--log-level` was given or it matches the startup level.
fn resolved_level_change<'a>(cli: &Cli, config: Option<&'a TsdbConfig>) -> Option<&'a str> {
    if cli.log_level.is_some() {
        return None;
    }
    config
        .map(|c| c.log_level.as_str())
        .filter(|level| !level.is_empty() && *level != DEFAULT_LOG_LEVEL)
}
