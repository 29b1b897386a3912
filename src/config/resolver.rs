//! Override resolution: applies [`RawOverrides`] onto a base [`TsdbConfig`].

use tracing::{debug, warn};

use crate::config::sources::environment::{EnvSource, ProcessEnv};
use crate::config::{
    MetricsReporterConfig, RawOverrides, TsdbConfig, DEFAULT_LOG_LEVEL, V3IO_ACCESS_KEY_ENV,
    V3IO_API_ENV,
};
use crate::error::ConfigError;
use crate::performance::{default_registry, ReporterHandle, ReporterRegistry};

/// Fully resolved configuration together with the shared reporter.
#[derive(Debug, Clone)]
pub struct Resolved {
    pub config: TsdbConfig,
    pub reporter: ReporterHandle,
}

/// Merges overrides, base values and environment fallbacks.
///
/// Precedence per field: explicit override, then the base value, then the
/// environment (endpoint and access key only), then a fixed fallback
/// (log level only).
pub struct ConfigResolver<'a> {
    env: Box<dyn EnvSource + 'a>,
    reporters: &'a ReporterRegistry,
}

impl ConfigResolver<'static> {
    /// Resolver over the process environment and the process-wide reporter.
    pub fn new() -> Self {
        Self {
            env: Box::new(ProcessEnv),
            reporters: default_registry(),
        }
    }
}

impl Default for ConfigResolver<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> ConfigResolver<'a> {
    pub fn with_parts(env: impl EnvSource + 'a, reporters: &'a ReporterRegistry) -> Self {
        Self {
            env: Box::new(env),
            reporters,
        }
    }

    /// Apply overrides to `config` in place and obtain the shared reporter.
    ///
    /// A reporter failure is returned after the fields have been applied;
    /// `config` keeps the resolved values.
    pub fn populate(
        &self,
        overrides: &RawOverrides,
        config: &mut TsdbConfig,
    ) -> Result<ReporterHandle, ConfigError> {
        self.apply(overrides, config)?;
        self.reporter(&config.metrics_reporter)
    }

    /// Shared reporter from this resolver's registry, without resolving any fields.
    pub fn reporter(&self, settings: &MetricsReporterConfig) -> Result<ReporterHandle, ConfigError> {
        self.reporters
            .get_or_init(settings)
            .map_err(ConfigError::ReporterInitFailure)
    }

    /// Strict variant: any failure, including the reporter, fails the whole call.
    pub fn resolve(
        &self,
        overrides: &RawOverrides,
        base: TsdbConfig,
    ) -> Result<Resolved, ConfigError> {
        let mut config = base;
        let reporter = self.populate(overrides, &mut config)?;
        Ok(Resolved { config, reporter })
    }

    /// Field resolution only, without touching the reporter.
    pub fn apply(&self, overrides: &RawOverrides, config: &mut TsdbConfig) -> Result<(), ConfigError> {
        self.resolve_endpoint(overrides, config)?;

        if let Some(container) = overrides.container() {
            config.container = container.to_string();
        }
        if let Some(table_path) = overrides.table_path() {
            config.table_path = table_path.to_string();
        }

        if let Some(pair) = overrides.credentials() {
            config.username = pair.username.clone();
            config.password = pair.password.clone();
        }
        self.resolve_access_key(overrides, config);

        if config.log_level.is_empty() {
            config.log_level = DEFAULT_LOG_LEVEL.to_string();
        }

        debug!(
            endpoint = %config.web_api_endpoint,
            container = %config.container,
            credentials = config.credential_mode().name(),
            "Configuration resolved"
        );
        Ok(())
    }

    fn resolve_endpoint(
        &self,
        overrides: &RawOverrides,
        config: &mut TsdbConfig,
    ) -> Result<(), ConfigError> {
        if let Some(endpoint) = overrides.endpoint() {
            config.web_api_endpoint = endpoint.to_string();
        } else if config.web_api_endpoint.is_empty() {
            if let Some(endpoint) = self.env.var(V3IO_API_ENV) {
                debug!(variable = V3IO_API_ENV, "Endpoint taken from environment");
                config.web_api_endpoint = endpoint;
            }
        }

        if config.web_api_endpoint.is_empty() {
            warn!("No web API endpoint from overrides, base config or environment");
            return Err(ConfigError::MissingEndpoint);
        }
        Ok(())
    }

    fn resolve_access_key(&self, overrides: &RawOverrides, config: &mut TsdbConfig) {
        if let Some(access_key) = overrides.access_key() {
            config.access_key = access_key.to_string();
            return;
        }
        // Username/password silences the environment key; only an explicit override beats it.
        if config.has_user_password() || !config.access_key.is_empty() {
            return;
        }
        if let Some(access_key) = self.env.var(V3IO_ACCESS_KEY_ENV) {
            debug!(variable = V3IO_ACCESS_KEY_ENV, "Access key taken from environment");
            config.access_key = access_key;
        }
    }
}
