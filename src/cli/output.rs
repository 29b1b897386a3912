//! CLI output: rendering of configurations for the CLI surface.

use serde::Serialize;

use crate::error::ConfigError;

/// Rendering format for printed configurations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Yaml,
    Json,
}

/// Render a serializable value in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> Result<String, ConfigError> {
    match format {
        OutputFormat::Yaml => serde_yaml::to_string(value)
            .map(|s| s.trim_end().to_string())
            .map_err(|e| ConfigError::Render(e.to_string())),
        OutputFormat::Json => {
            serde_json::to_string_pretty(value).map_err(|e| ConfigError::Render(e.to_string()))
        }
    }
}
