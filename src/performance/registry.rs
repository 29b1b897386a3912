//! Lazily initialised, shared reporter handle.

use parking_lot::RwLock;
use std::sync::{Arc, OnceLock};
use tracing::debug;

use crate::config::MetricsReporterConfig;
use crate::error::ReporterError;
use crate::performance::PerformanceReporter;

/// Shared reference to the process reporter.
pub type ReporterHandle = Arc<PerformanceReporter>;

type ReporterFactory =
    Box<dyn Fn(&MetricsReporterConfig) -> Result<PerformanceReporter, ReporterError> + Send + Sync>;

/// Holds at most one reporter. The first successful initialisation wins and
/// every later caller receives the same handle until [`ReporterRegistry::reset`].
pub struct ReporterRegistry {
    factory: ReporterFactory,
    slot: RwLock<Option<ReporterHandle>>,
}

impl std::fmt::Debug for ReporterRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReporterRegistry")
            .field("initialized", &self.slot.read().is_some())
            .finish()
    }
}

impl Default for ReporterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ReporterRegistry {
    pub fn new() -> Self {
        Self::with_factory(PerformanceReporter::new)
    }

    pub fn with_factory<F>(factory: F) -> Self
    where
        F: Fn(&MetricsReporterConfig) -> Result<PerformanceReporter, ReporterError>
            + Send
            + Sync
            + 'static,
    {
        Self {
            factory: Box::new(factory),
            slot: RwLock::new(None),
        }
    }

    /// Return the existing handle, or build one from `config`. A failed build
    /// leaves the registry empty so a later call may retry.
    pub fn get_or_init(
        &self,
        config: &MetricsReporterConfig,
    ) -> Result<ReporterHandle, ReporterError> {
        if let Some(handle) = self.slot.read().as_ref() {
            return Ok(Arc::clone(handle));
        }

        let mut slot = self.slot.write();
        if let Some(handle) = slot.as_ref() {
            return Ok(Arc::clone(handle));
        }
        let handle = Arc::new((self.factory)(config)?);
        debug!(output = ?handle.output(), "Performance reporter initialized");
        *slot = Some(Arc::clone(&handle));
        Ok(handle)
    }

    pub fn current(&self) -> Option<ReporterHandle> {
        self.slot.read().clone()
    }

    /// Inject a handle, returning the one it replaced.
    pub fn install(&self, handle: ReporterHandle) -> Option<ReporterHandle> {
        self.slot.write().replace(handle)
    }

    /// Teardown: drop the held handle after running its shutdown hook.
    pub fn reset(&self) -> Option<ReporterHandle> {
        let taken = self.slot.write().take();
        if let Some(handle) = &taken {
            handle.shutdown();
        }
        taken
    }
}

/// The process-wide registry.
pub fn default_registry() -> &'static ReporterRegistry {
    static DEFAULT: OnceLock<ReporterRegistry> = OnceLock::new();
    DEFAULT.get_or_init(ReporterRegistry::new)
}

/// Shared reporter with default settings, created on first use.
pub fn default_reporter_instance() -> Result<ReporterHandle, ReporterError> {
    default_registry().get_or_init(&MetricsReporterConfig::default())
}

pub fn shutdown_default_reporter() {
    default_registry().reset();
}
