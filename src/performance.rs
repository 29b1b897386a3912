//! Performance metrics: the reporter and its process-wide registry.

mod registry;
mod reporter;

pub use registry::{
    default_registry, default_reporter_instance, shutdown_default_reporter, ReporterHandle,
    ReporterRegistry,
};
pub use reporter::{MetricsSnapshot, PerformanceReporter, ReportOutput, TimerStats};
