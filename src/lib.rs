//! tsdbctl: Layered Configuration for the TSDB Client
//!
//! Resolves the client configuration from command-line overrides, a loaded
//! base configuration, environment variables and built-in defaults, and loads
//! the workload parameters used by ingest benchmarks.

pub mod bench;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod performance;
