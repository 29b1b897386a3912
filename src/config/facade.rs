//! Config loader: builds a base [`TsdbConfig`] from defaults, environment and file.

use config::Config;
use std::path::Path;
use tracing::info;

use crate::config::merge::merge_policy;
use crate::config::sources::config_file::{self, ConfigFileLocation};
use crate::config::sources::environment::{self, EnvSource, ProcessEnv};
use crate::config::TsdbConfig;
use crate::error::ConfigError;

/// Loads base configurations. Precedence, lowest first: merge-policy defaults,
/// environment endpoint, config file (or explicit struct).
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load from `path`, $V3IO_TSDB_CONFIG, or ./v3io-tsdb-config.yaml if present.
    pub fn load(path: Option<&Path>) -> Result<TsdbConfig, ConfigError> {
        Self::load_with_env(path, &ProcessEnv)
    }

    /// Load from a specific file, which must exist.
    pub fn load_from_file(path: &Path) -> Result<TsdbConfig, ConfigError> {
        Self::load_with_env(Some(path), &ProcessEnv)
    }

    /// Start from an explicitly constructed config and fill the lower layers around it.
    pub fn load_from_struct(base: &TsdbConfig) -> Result<TsdbConfig, ConfigError> {
        Self::load_from_struct_with_env(base, &ProcessEnv)
    }

    pub fn load_with_env(
        path: Option<&Path>,
        env: &dyn EnvSource,
    ) -> Result<TsdbConfig, ConfigError> {
        let location = config_file::locate(path, env);
        let builder = merge_policy::builder_with_defaults()?;
        let builder = environment::add_to_builder(builder, env)?;
        let builder = config_file::add_to_builder(builder, &location)?;

        let config: TsdbConfig = builder.build()?.try_deserialize()?;
        config.validate()?;

        match &location {
            ConfigFileLocation::Default(path) if !path.exists() => {
                info!("Configuration loaded from defaults and environment")
            }
            _ => info!(config_path = %location.path().display(), "Configuration loaded"),
        }
        Ok(config)
    }

    pub fn load_from_struct_with_env(
        base: &TsdbConfig,
        env: &dyn EnvSource,
    ) -> Result<TsdbConfig, ConfigError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = environment::add_to_builder(builder, env)?;
        let config: TsdbConfig = builder
            .add_source(Config::try_from(base)?)
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }
}
