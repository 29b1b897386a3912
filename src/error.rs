//! Error types for tsdbctl configuration resolution.

use std::path::PathBuf;
use thiserror::Error;

/// Longest raw document prefix carried by a parse error.
const SNIPPET_LIMIT: usize = 256;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(
        "No web API endpoint configured: pass --server, set it in the config file, or export V3IO_API"
    )]
    MissingEndpoint,

    #[error("Unable to initialize performance metrics reporter")]
    ReporterInitFailure(#[source] ReporterError),

    #[error("Failed to load config from file {}", path.display())]
    ConfigFileUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unable to parse configuration: {snippet}")]
    ConfigParseError {
        snippet: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Configuration source error")]
    Source(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to render output: {0}")]
    Render(String),
}

impl ConfigError {
    /// Build a parse error, keeping only a bounded prefix of the raw document.
    pub fn parse(raw: &[u8], source: serde_yaml::Error) -> Self {
        let text = String::from_utf8_lossy(raw);
        let snippet = match text.char_indices().nth(SNIPPET_LIMIT) {
            Some((cut, _)) => format!("{}...", &text[..cut]),
            None => text.into_owned(),
        };
        ConfigError::ConfigParseError { snippet, source }
    }
}

/// Performance reporter errors
#[derive(Debug, Error)]
pub enum ReporterError {
    #[error("Invalid metrics reporter output: {0} (must be 'log', 'stdout' or 'stderr')")]
    InvalidOutput(String),

    #[error("Metrics reporter factory failed: {0}")]
    Factory(String),
}
