//! Benchmark ingest configuration
//!
//! Workload parameters for ingest benchmarks, read from a YAML file whose keys
//! are PascalCase and case-sensitive. Only `StartTimeOffset` and `BatchSize`
//! receive defaults; every other field stays at zero when omitted.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::config::{ConfigLoader, EnvSource, ProcessEnv, TsdbConfig, DEFAULT_CONFIG_FILE_NAME};
use crate::error::ConfigError;

/// Environment variable naming the ingest benchmark config file.
pub const TSDB_BENCH_INGEST_CONFIG_ENV: &str = "TSDB_BENCH_INGEST_CONFIG";

/// Directory holding benchmark fixtures, relative to the working directory.
pub const DEFAULT_TEST_CONFIG_DIR: &str = "testdata";

/// Ingest config file name inside [`DEFAULT_TEST_CONFIG_DIR`].
pub const DEFAULT_INGEST_CONFIG_FILE_NAME: &str = "tsdb-bench-test-config.yaml";

pub const DEFAULT_START_TIME_OFFSET: &str = "48h";
pub const DEFAULT_BATCH_SIZE: i64 = 64;

fn is_zero(value: &i64) -> bool {
    *value == 0
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// Parameters of one ingest benchmark run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct BenchmarkIngestConfig {
    #[serde(skip_serializing_if = "is_false")]
    pub verbose: bool,

    /// How far back the generated samples start, e.g. "48h"
    #[serde(skip_serializing_if = "String::is_empty")]
    pub start_time_offset: String,

    #[serde(skip_serializing_if = "is_zero")]
    pub sample_step_size: i64,

    #[serde(skip_serializing_if = "is_zero")]
    pub names_count: i64,

    #[serde(skip_serializing_if = "is_zero")]
    pub names_diversity: i64,

    #[serde(skip_serializing_if = "is_zero")]
    pub labels_count: i64,

    #[serde(skip_serializing_if = "is_zero")]
    pub labels_diversity: i64,

    #[serde(skip_serializing_if = "is_zero")]
    pub label_values_count: i64,

    #[serde(skip_serializing_if = "is_zero")]
    pub labels_value_diversity: i64,

    #[serde(skip_serializing_if = "is_false")]
    pub append_one_by_one: bool,

    #[serde(skip_serializing_if = "is_zero")]
    pub batch_size: i64,

    #[serde(skip_serializing_if = "is_false")]
    pub cleanup_after_test: bool,
}

impl BenchmarkIngestConfig {
    /// Fill the two fields that have fixed defaults.
    pub fn init_defaults(&mut self) {
        if self.start_time_offset.is_empty() {
            self.start_time_offset = DEFAULT_START_TIME_OFFSET.to_string();
        }
        if self.batch_size == 0 {
            self.batch_size = DEFAULT_BATCH_SIZE;
        }
    }
}

/// Pick the ingest config path: override, then environment, then testdata default.
pub fn ingest_config_path(path_override: Option<&Path>, env: &dyn EnvSource) -> PathBuf {
    if let Some(path) = path_override.filter(|p| !p.as_os_str().is_empty()) {
        return path.to_path_buf();
    }
    if let Some(path) = env.var(TSDB_BENCH_INGEST_CONFIG_ENV) {
        return PathBuf::from(path);
    }
    Path::new(DEFAULT_TEST_CONFIG_DIR).join(DEFAULT_INGEST_CONFIG_FILE_NAME)
}

/// Load the ingest benchmark config and apply its defaults.
pub fn load_ingest_config(
    path_override: Option<&Path>,
) -> Result<BenchmarkIngestConfig, ConfigError> {
    load_ingest_config_with_env(path_override, &ProcessEnv)
}

pub fn load_ingest_config_with_env(
    path_override: Option<&Path>,
    env: &dyn EnvSource,
) -> Result<BenchmarkIngestConfig, ConfigError> {
    let path = ingest_config_path(path_override, env);
    let data = std::fs::read(&path).map_err(|source| ConfigError::ConfigFileUnreadable {
        path: path.clone(),
        source,
    })?;
    debug!(config_path = %path.display(), "Loading ingest benchmark config");
    load_ingest_config_from_data(&data)
}

/// Parse raw YAML and apply defaults. An empty document yields all defaults.
pub fn load_ingest_config_from_data(data: &[u8]) -> Result<BenchmarkIngestConfig, ConfigError> {
    let value: serde_yaml::Value =
        serde_yaml::from_slice(data).map_err(|e| ConfigError::parse(data, e))?;
    let mut config = if value.is_null() {
        BenchmarkIngestConfig::default()
    } else {
        serde_yaml::from_value(value).map_err(|e| ConfigError::parse(data, e))?
    };
    config.init_defaults();
    Ok(config)
}

/// Load the ingest config together with the TSDB config stored beside it in testdata.
pub fn load_benchmark_configs() -> Result<(BenchmarkIngestConfig, TsdbConfig), ConfigError> {
    let ingest = load_ingest_config(None)?;
    let tsdb =
        ConfigLoader::load_from_file(&Path::new(DEFAULT_TEST_CONFIG_DIR).join(DEFAULT_CONFIG_FILE_NAME))?;
    Ok((ingest, tsdb))
}
