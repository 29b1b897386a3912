//! CLI parse: clap types for tsdbctl. No behavior beyond collecting overrides.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::cli::output::OutputFormat;
use crate::config::RawOverrides;

/// tsdbctl - time-series database command-line client
#[derive(Parser, Debug)]
#[command(name = "tsdbctl")]
#[command(about = "Time-series database command-line client")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to a YAML configuration file
    #[arg(short = 'g', long)]
    pub config: Option<PathBuf>,

    /// Web API endpoint of the TSDB service (overrides $V3IO_API)
    #[arg(short = 's', long)]
    pub server: Option<String>,

    /// Name of the data container
    #[arg(short = 'c', long)]
    pub container: Option<String>,

    /// Path of the TSDB table within the container
    #[arg(short = 't', long)]
    pub table_path: Option<String>,

    /// Username; requires --password
    #[arg(short = 'u', long, requires = "password")]
    pub username: Option<String>,

    /// Password; requires --username
    #[arg(short = 'p', long, requires = "username")]
    pub password: Option<String>,

    /// Access key (overrides $V3IO_ACCESS_KEY)
    #[arg(short = 'k', long)]
    pub access_key: Option<String>,

    /// Log level (trace, debug, info, warn, error, off); defaults to the config's log level
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr)
    #[arg(long)]
    pub log_output: Option<String>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Print the fully resolved configuration
    ShowConfig {
        /// Output format
        #[arg(long, value_enum, default_value = "yaml")]
        format: OutputFormat,

        /// Print password and access key instead of masking them
        #[arg(long)]
        show_secrets: bool,
    },
    /// Print the ingest benchmark configuration with defaults applied
    IngestConfig {
        /// Config file (overrides $TSDB_BENCH_INGEST_CONFIG)
        #[arg(long)]
        path: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value = "yaml")]
        format: OutputFormat,
    },
}

impl Cli {
    /// Collect the override flags.
    pub fn overrides(&self) -> RawOverrides {
        let mut overrides = RawOverrides::new();
        if let Some(server) = &self.server {
            overrides = overrides.with_endpoint(server.as_str());
        }
        if let Some(container) = &self.container {
            overrides = overrides.with_container(container.as_str());
        }
        if let Some(table_path) = &self.table_path {
            overrides = overrides.with_table_path(table_path.as_str());
        }
        if let (Some(username), Some(password)) = (&self.username, &self.password) {
            overrides = overrides.with_user_password(username.as_str(), password.as_str());
        }
        if let Some(access_key) = &self.access_key {
            overrides = overrides.with_access_key(access_key.as_str());
        }
        overrides
    }
}
