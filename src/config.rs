//! Configuration System
//!
//! Layered configuration for the TSDB client. A base [`TsdbConfig`] is built by
//! [`ConfigLoader`] from defaults, environment variables and a YAML file; the
//! [`ConfigResolver`] then applies command-line [`RawOverrides`] on top of it.

use serde::{Deserialize, Serialize};

mod facade;
mod merge;
mod overrides;
mod resolver;
mod sources;

pub use facade::ConfigLoader;
pub use overrides::{RawOverrides, UserPassword};
pub use resolver::{ConfigResolver, Resolved};
pub use sources::environment::{EnvSource, ProcessEnv};

/// Environment variable holding the web API endpoint.
pub const V3IO_API_ENV: &str = "V3IO_API";

/// Environment variable holding the access key.
pub const V3IO_ACCESS_KEY_ENV: &str = "V3IO_ACCESS_KEY";

/// Environment variable naming the TSDB configuration file.
pub const V3IO_TSDB_CONFIG_ENV: &str = "V3IO_TSDB_CONFIG";

/// Configuration file looked up in the working directory when none is named.
pub const DEFAULT_CONFIG_FILE_NAME: &str = "v3io-tsdb-config.yaml";

/// Log level applied when nothing else set one.
pub const DEFAULT_LOG_LEVEL: &str = "info";

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

const MASK: &str = "*****";

/// Root configuration structure. Empty strings mean "unset".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TsdbConfig {
    /// Web API endpoint of the TSDB service
    #[serde(skip_serializing_if = "String::is_empty")]
    pub web_api_endpoint: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub container: String,

    /// Path of the table inside the container
    #[serde(skip_serializing_if = "String::is_empty")]
    pub table_path: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub username: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub password: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub access_key: String,

    /// Log level: trace, debug, info, warn, error, off
    #[serde(skip_serializing_if = "String::is_empty")]
    pub log_level: String,

    /// Performance metrics reporter settings
    pub metrics_reporter: MetricsReporterConfig,
}

/// Performance metrics reporter configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsReporterConfig {
    /// Emit a final report when the reporter is torn down
    pub report_on_shutdown: bool,

    /// Report destination: log, stdout, stderr
    pub output: String,
}

impl Default for MetricsReporterConfig {
    fn default() -> Self {
        Self {
            report_on_shutdown: false,
            output: "log".to_string(),
        }
    }
}

/// Which credentials a resolved configuration carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialMode<'a> {
    None,
    UserPassword { username: &'a str, password: &'a str },
    AccessKey(&'a str),
}

impl CredentialMode<'_> {
    pub fn name(&self) -> &'static str {
        match self {
            CredentialMode::None => "none",
            CredentialMode::UserPassword { .. } => "username/password",
            CredentialMode::AccessKey(_) => "access-key",
        }
    }
}

impl TsdbConfig {
    /// True when both username and password are populated.
    pub fn has_user_password(&self) -> bool {
        !self.username.is_empty() && !self.password.is_empty()
    }

    /// Credential view. A populated access key takes precedence, since an
    /// explicitly supplied key always survives resolution.
    pub fn credential_mode(&self) -> CredentialMode<'_> {
        if !self.access_key.is_empty() {
            CredentialMode::AccessKey(&self.access_key)
        } else if self.has_user_password() {
            CredentialMode::UserPassword {
                username: &self.username,
                password: &self.password,
            }
        } else {
            CredentialMode::None
        }
    }

    /// Copy with secrets masked, for display.
    pub fn redacted(&self) -> TsdbConfig {
        let mask = |value: &str| {
            if value.is_empty() {
                String::new()
            } else {
                MASK.to_string()
            }
        };
        TsdbConfig {
            password: mask(&self.password),
            access_key: mask(&self.access_key),
            ..self.clone()
        }
    }

    /// Validate values that have a closed set of accepted spellings.
    pub fn validate(&self) -> Result<(), crate::error::ConfigError> {
        if !self.log_level.is_empty() && !LOG_LEVELS.contains(&self.log_level.as_str()) {
            return Err(crate::error::ConfigError::Invalid(format!(
                "log_level '{}' (must be one of {})",
                self.log_level,
                LOG_LEVELS.join(", ")
            )));
        }
        crate::performance::ReportOutput::parse(&self.metrics_reporter.output)
            .map_err(|e| crate::error::ConfigError::Invalid(e.to_string()))?;
        Ok(())
    }
}
