//! Environment source: variable lookup and the endpoint default it contributes.

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use std::collections::HashMap;
use tracing::debug;

use crate::config::V3IO_API_ENV;

/// Read access to environment variables. Empty values count as unset.
pub trait EnvSource {
    fn var(&self, key: &str) -> Option<String>;
}

/// The real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok().filter(|value| !value.is_empty())
    }
}

impl EnvSource for HashMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).filter(|value| !value.is_empty()).cloned()
    }
}

impl<E: EnvSource + ?Sized> EnvSource for &E {
    fn var(&self, key: &str) -> Option<String> {
        (**self).var(key)
    }
}

/// Add the environment endpoint as a default, so file values still win over it.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    env: &dyn EnvSource,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    match env.var(V3IO_API_ENV) {
        Some(endpoint) => {
            debug!(variable = V3IO_API_ENV, endpoint = %endpoint, "Endpoint default from environment");
            builder.set_default("web_api_endpoint", endpoint)
        }
        None => Ok(builder),
    }
}
