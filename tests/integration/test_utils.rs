//! Shared test utilities for integration tests
//!
//! Centralizes mutation of the process environment so tests that set
//! V3IO_* variables do not race each other when run in parallel.

use std::sync::Mutex;

/// Global mutex to serialize environment variable access across all tests
static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Variables any test in this binary may touch.
const MANAGED_VARS: &[&str] = &[
    "V3IO_API",
    "V3IO_ACCESS_KEY",
    "V3IO_TSDB_CONFIG",
    "TSDB_BENCH_INGEST_CONFIG",
];

/// Environment variable state, restored when dropped
struct EnvState {
    saved: Vec<(&'static str, Option<String>)>,
}

impl EnvState {
    fn capture() -> Self {
        Self {
            saved: MANAGED_VARS
                .iter()
                .map(|name| (*name, std::env::var(name).ok()))
                .collect(),
        }
    }
}

impl Drop for EnvState {
    fn drop(&mut self) {
        for (name, value) in &self.saved {
            match value {
                Some(orig) => std::env::set_var(name, orig),
                None => std::env::remove_var(name),
            }
        }
    }
}

/// Run `f` with exactly `vars` set among the managed variables.
///
/// All managed variables not listed are removed for the duration of `f`, and
/// the original environment is restored afterwards, even if `f` panics.
///
/// # Example
/// ```ignore
/// with_env(&[("V3IO_API", "host-from-env:123")], || {
///     // V3IO_API is set, V3IO_ACCESS_KEY is not
/// });
/// ```
pub fn with_env<F, R>(vars: &[(&str, &str)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let _env_state = EnvState::capture();

    for name in MANAGED_VARS {
        std::env::remove_var(name);
    }
    for (name, value) in vars {
        std::env::set_var(name, value);
    }

    f()
}
