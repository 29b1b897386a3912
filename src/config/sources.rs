//! Configuration sources: environment and YAML file.

pub mod config_file;
pub mod environment;
