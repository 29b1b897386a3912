//! Config file source: explicit path, $V3IO_TSDB_CONFIG, or ./v3io-tsdb-config.yaml

use config::builder::DefaultState;
use config::{ConfigBuilder, File, FileFormat};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::config::sources::environment::EnvSource;
use crate::config::{DEFAULT_CONFIG_FILE_NAME, V3IO_TSDB_CONFIG_ENV};
use crate::error::ConfigError;

/// Where the config file path came from. Only the implicit default may be missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigFileLocation {
    Explicit(PathBuf),
    Environment(PathBuf),
    Default(PathBuf),
}

impl ConfigFileLocation {
    pub fn path(&self) -> &Path {
        match self {
            ConfigFileLocation::Explicit(path)
            | ConfigFileLocation::Environment(path)
            | ConfigFileLocation::Default(path) => path,
        }
    }

    fn required(&self) -> bool {
        !matches!(self, ConfigFileLocation::Default(_))
    }
}

/// Pick the config file: explicit path, then environment, then the default name.
pub fn locate(explicit: Option<&Path>, env: &dyn EnvSource) -> ConfigFileLocation {
    if let Some(path) = explicit.filter(|p| !p.as_os_str().is_empty()) {
        return ConfigFileLocation::Explicit(path.to_path_buf());
    }
    if let Some(path) = env.var(V3IO_TSDB_CONFIG_ENV) {
        return ConfigFileLocation::Environment(PathBuf::from(path));
    }
    ConfigFileLocation::Default(PathBuf::from(DEFAULT_CONFIG_FILE_NAME))
}

/// Add the YAML file at `location` to the builder.
///
/// The file is read here rather than by the `config` crate so an unreadable
/// path surfaces as [`ConfigError::ConfigFileUnreadable`] with its I/O cause.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    location: &ConfigFileLocation,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let path = location.path();
    if !location.required() && !path.exists() {
        debug!(config_path = %path.display(), "No default config file, skipping");
        return Ok(builder);
    }

    let content =
        std::fs::read_to_string(path).map_err(|source| ConfigError::ConfigFileUnreadable {
            path: path.to_path_buf(),
            source,
        })?;
    debug!(config_path = %path.display(), "Loading config file");
    Ok(builder.add_source(File::from_str(&content, FileFormat::Yaml)))
}
