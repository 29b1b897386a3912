//! Counters and timers recorded by CLI commands and benchmark runs.

use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::time::{Duration, Instant};
use tracing::info;

use crate::config::MetricsReporterConfig;
use crate::error::ReporterError;

/// Report destination
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportOutput {
    Log,
    Stdout,
    Stderr,
}

impl ReportOutput {
    pub fn parse(output: &str) -> Result<Self, ReporterError> {
        match output {
            "log" => Ok(ReportOutput::Log),
            "stdout" => Ok(ReportOutput::Stdout),
            "stderr" => Ok(ReportOutput::Stderr),
            other => Err(ReporterError::InvalidOutput(other.to_string())),
        }
    }
}

/// Aggregate of all durations recorded under one timer name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimerStats {
    pub count: u64,
    pub total: Duration,
    pub max: Duration,
}

impl TimerStats {
    fn record(&mut self, elapsed: Duration) {
        self.count += 1;
        self.total += elapsed;
        self.max = self.max.max(elapsed);
    }

    pub fn mean(&self) -> Duration {
        if self.count == 0 {
            return Duration::ZERO;
        }
        let nanos = self.total.as_nanos() / u128::from(self.count);
        Duration::from_nanos(u64::try_from(nanos).unwrap_or(u64::MAX))
    }
}

/// Point-in-time copy of the reporter's metrics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub counters: BTreeMap<String, u64>,
    pub timers: BTreeMap<String, TimerStats>,
}

impl MetricsSnapshot {
    pub fn is_empty(&self) -> bool {
        self.counters.is_empty() && self.timers.is_empty()
    }

    /// One line per metric, counters first, each group in name order.
    pub fn lines(&self) -> Vec<String> {
        let counters = self
            .counters
            .iter()
            .map(|(name, value)| format!("counter {} = {}", name, value));
        let timers = self.timers.iter().map(|(name, stats)| {
            format!(
                "timer {} count={} mean={:?} max={:?}",
                name,
                stats.count,
                stats.mean(),
                stats.max
            )
        });
        counters.chain(timers).collect()
    }
}

/// Thread-safe metrics sink shared by everything in the process.
#[derive(Debug)]
pub struct PerformanceReporter {
    output: ReportOutput,
    report_on_shutdown: bool,
    counters: Mutex<BTreeMap<String, u64>>,
    timers: Mutex<BTreeMap<String, TimerStats>>,
}

impl PerformanceReporter {
    pub fn new(config: &MetricsReporterConfig) -> Result<Self, ReporterError> {
        Ok(Self {
            output: ReportOutput::parse(&config.output)?,
            report_on_shutdown: config.report_on_shutdown,
            counters: Mutex::new(BTreeMap::new()),
            timers: Mutex::new(BTreeMap::new()),
        })
    }

    pub fn output(&self) -> ReportOutput {
        self.output
    }

    pub fn increment_counter(&self, name: &str, delta: u64) {
        *self.counters.lock().entry(name.to_string()).or_insert(0) += delta;
    }

    pub fn record_duration(&self, name: &str, elapsed: Duration) {
        self.timers
            .lock()
            .entry(name.to_string())
            .or_default()
            .record(elapsed);
    }

    /// Run `f`, recording its wall time under `name`.
    pub fn time<R>(&self, name: &str, f: impl FnOnce() -> R) -> R {
        let start = Instant::now();
        let result = f();
        self.record_duration(name, start.elapsed());
        result
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            counters: self.counters.lock().clone(),
            timers: self.timers.lock().clone(),
        }
    }

    /// Write the current snapshot to the configured output.
    pub fn report(&self) {
        let snapshot = self.snapshot();
        if snapshot.is_empty() {
            return;
        }
        for line in snapshot.lines() {
            match self.output {
                ReportOutput::Log => info!(target: "tsdbctl::performance", "{}", line),
                ReportOutput::Stdout => println!("{}", line),
                ReportOutput::Stderr => eprintln!("{}", line),
            }
        }
    }

    /// Teardown hook: final report when configured.
    pub fn shutdown(&self) {
        if self.report_on_shutdown {
            self.report();
        }
    }
}
