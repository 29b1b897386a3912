//! CLI route: run context and single route table.

use tracing::info;

use crate::bench;
use crate::cli::output::render;
use crate::cli::parse::{Cli, Commands};
use crate::config::{ConfigLoader, ConfigResolver, MetricsReporterConfig, TsdbConfig};
use crate::error::ConfigError;
use crate::performance::ReporterHandle;

/// Shared reporter for one CLI invocation, plus the resolved configuration
/// when the command needs one.
#[derive(Debug)]
pub struct RunContext {
    config: Option<TsdbConfig>,
    reporter: ReporterHandle,
}

impl RunContext {
    /// Load the base config and apply the CLI overrides on top of it, for
    /// commands that use the TSDB configuration.
    pub fn new(cli: &Cli) -> Result<Self, ConfigError> {
        Self::with_resolver(cli, &ConfigResolver::new())
    }

    pub fn with_resolver(cli: &Cli, resolver: &ConfigResolver<'_>) -> Result<Self, ConfigError> {
        if !needs_tsdb_config(&cli.command) {
            return Ok(Self {
                config: None,
                reporter: resolver.reporter(&MetricsReporterConfig::default())?,
            });
        }

        let base = ConfigLoader::load(cli.config.as_deref())?;
        let resolved = resolver.resolve(&cli.overrides(), base)?;
        Ok(Self {
            config: Some(resolved.config),
            reporter: resolved.reporter,
        })
    }

    /// Resolved configuration; `None` for commands that run without one.
    pub fn config(&self) -> Option<&TsdbConfig> {
        self.config.as_ref()
    }

    pub fn reporter(&self) -> &ReporterHandle {
        &self.reporter
    }

    pub fn execute(&self, command: &Commands) -> Result<String, ConfigError> {
        self.reporter.increment_counter("tsdbctl.commands", 1);
        self.reporter.time(command_name(command), || self.dispatch(command))
    }

    fn dispatch(&self, command: &Commands) -> Result<String, ConfigError> {
        match command {
            Commands::ShowConfig {
                format,
                show_secrets,
            } => {
                let config = self.config.as_ref().ok_or_else(|| {
                    ConfigError::Invalid("configuration was not resolved".to_string())
                })?;
                info!(
                    endpoint = %config.web_api_endpoint,
                    credentials = config.credential_mode().name(),
                    "Showing resolved configuration"
                );
                if *show_secrets {
                    render(config, *format)
                } else {
                    render(&config.redacted(), *format)
                }
            }
            Commands::IngestConfig { path, format } => {
                let ingest = bench::load_ingest_config(path.as_deref())?;
                render(&ingest, *format)
            }
        }
    }
}

/// Whether the command reads the resolved TSDB configuration.
pub fn needs_tsdb_config(command: &Commands) -> bool {
    matches!(command, Commands::ShowConfig { .. })
}

/// Timer name for a command.
pub fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::ShowConfig { .. } => "tsdbctl.show_config",
        Commands::IngestConfig { .. } => "tsdbctl.ingest_config",
    }
}
