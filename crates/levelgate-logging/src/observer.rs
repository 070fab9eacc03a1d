//! Reporting of configuration reload failures

use levelgate_core::ConfigParseError;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

/// Receives reload failures that must not reach the log call path
pub trait ReloadObserver: Send + Sync {
    /// Called once per category whose section in snapshot `version` failed to parse
    fn on_reload_error(&self, error: &ConfigParseError, version: u64);
}

/// Reports failures as tracing warnings
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl ReloadObserver for TracingObserver {
    fn on_reload_error(&self, error: &ConfigParseError, version: u64) {
        tracing::warn!(
            category = error.category(),
            key = error.key(),
            version,
            "Keeping previous log levels: {}",
            error
        );
    }
}

/// Counts failures and remembers the latest one
#[derive(Debug, Default)]
pub struct CountingObserver {
    failures: AtomicU64,
    last: Mutex<Option<(ConfigParseError, u64)>>,
}

impl CountingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of failures reported so far
    pub fn failures(&self) -> u64 {
        self.failures.load(Ordering::Relaxed)
    }

    /// Most recent failure and the snapshot version it came from
    pub fn last_error(&self) -> Option<(ConfigParseError, u64)> {
        self.last.lock().clone()
    }
}

impl ReloadObserver for CountingObserver {
    fn on_reload_error(&self, error: &ConfigParseError, version: u64) {
        self.failures.fetch_add(1, Ordering::Relaxed);
        *self.last.lock() = Some((error.clone(), version));
    }
}

#[cfg(test)]
#[path = "observer/observer_tests.rs"]
mod observer_tests;
