//! Gating log calls before they reach the inner sink

use crate::filter::ReloadableCategoryFilter;
use crate::registry::FilterRegistry;
use crate::sink::{EventId, LogSink, Record, ScopeGuard};
use levelgate_core::Severity;
use std::error::Error;
use std::fmt;
use std::sync::Arc;

/// Wraps a sink and drops every call its category filter rejects
///
/// A rejected call returns before any formatting and never reaches the inner
/// sink. An accepted call is forwarded unmodified.
pub struct FilteringSink {
    inner: Arc<dyn LogSink>,
    registry: Arc<FilterRegistry>,
}

impl FilteringSink {
    pub fn new<S: LogSink + 'static>(inner: S, registry: Arc<FilterRegistry>) -> Self {
        Self {
            inner: Arc::new(inner),
            registry,
        }
    }

    pub fn registry(&self) -> &Arc<FilterRegistry> {
        &self.registry
    }

    /// Filter shared by every caller of `category`
    pub fn filter_for(&self, category: &str) -> Arc<ReloadableCategoryFilter> {
        self.registry.filter_for(category)
    }

    /// Whether `category` currently lets `severity` through
    pub fn allows(&self, category: &str, severity: Severity) -> bool {
        self.filter_for(category).allows(severity)
    }

    /// Always true
    ///
    /// The real decision is made once, inside [`log_event`](Self::log_event).
    /// Callers that skip building arguments based on this will not save any
    /// work.
    pub fn is_enabled(&self, _severity: Severity) -> bool {
        true
    }

    /// Log through the filter of `category`
    ///
    /// Named apart from [`LogSink::log`] so calls through an `Arc<FilteringSink>`
    /// resolve to this method.
    pub fn log_event(
        &self,
        category: &str,
        severity: Severity,
        event_id: EventId,
        args: fmt::Arguments<'_>,
        error: Option<&(dyn Error + 'static)>,
    ) {
        if !self.allows(category, severity) {
            return;
        }

        let record = Record::new(category, severity, args)
            .with_event_id(event_id)
            .with_error(error);
        self.forward(&record);
    }

    /// Hand a record that already passed its filter to the inner sink
    pub(crate) fn forward(&self, record: &Record<'_>) {
        self.inner.log(record);
    }

    /// Gate an already-built record
    pub fn dispatch(&self, record: &Record<'_>) {
        if self.allows(record.category(), record.severity()) {
            self.forward(record);
        }
    }

    /// Open a scope on the inner sink; never filtered
    pub fn begin_scope(&self, category: &str, state: &dyn fmt::Display) -> ScopeGuard {
        self.inner.begin_scope(category, state)
    }

    /// Create a logger handle for `category`
    ///
    /// The handle keeps the category's filter, so configuration changes reach
    /// it without creating a new handle.
    pub fn create_logger(&self, category: &str) -> Logger {
        Logger {
            filter: self.registry.filter_for(category),
            inner: Arc::clone(&self.inner),
        }
    }
}

impl LogSink for FilteringSink {
    fn log(&self, record: &Record<'_>) {
        self.dispatch(record);
    }

    fn begin_scope(&self, category: &str, state: &dyn fmt::Display) -> ScopeGuard {
        FilteringSink::begin_scope(self, category, state)
    }
}

impl fmt::Debug for FilteringSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilteringSink")
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

/// Logging handle bound to one category
#[derive(Clone)]
pub struct Logger {
    filter: Arc<ReloadableCategoryFilter>,
    inner: Arc<dyn LogSink>,
}

impl Logger {
    pub fn category(&self) -> &str {
        self.filter.category()
    }

    /// Always true; see [`FilteringSink::is_enabled`]
    pub fn is_enabled(&self, _severity: Severity) -> bool {
        true
    }

    pub fn log(&self, severity: Severity, args: fmt::Arguments<'_>) {
        self.log_event(severity, EventId::default(), args, None);
    }

    pub fn log_error(
        &self,
        severity: Severity,
        args: fmt::Arguments<'_>,
        error: &(dyn Error + 'static),
    ) {
        self.log_event(severity, EventId::default(), args, Some(error));
    }

    pub fn log_event(
        &self,
        severity: Severity,
        event_id: EventId,
        args: fmt::Arguments<'_>,
        error: Option<&(dyn Error + 'static)>,
    ) {
        if !self.filter.allows(severity) {
            return;
        }

        let record = Record::new(self.filter.category(), severity, args)
            .with_event_id(event_id)
            .with_error(error);
        self.inner.log(&record);
    }

    pub fn trace(&self, args: fmt::Arguments<'_>) {
        self.log(Severity::Trace, args);
    }

    pub fn debug(&self, args: fmt::Arguments<'_>) {
        self.log(Severity::Debug, args);
    }

    pub fn information(&self, args: fmt::Arguments<'_>) {
        self.log(Severity::Information, args);
    }

    pub fn warning(&self, args: fmt::Arguments<'_>) {
        self.log(Severity::Warning, args);
    }

    pub fn error(&self, args: fmt::Arguments<'_>) {
        self.log(Severity::Error, args);
    }

    pub fn critical(&self, args: fmt::Arguments<'_>) {
        self.log(Severity::Critical, args);
    }

    /// Open a scope on the inner sink; never filtered
    pub fn begin_scope(&self, state: &dyn fmt::Display) -> ScopeGuard {
        self.inner.begin_scope(self.filter.category(), state)
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("filter", &self.filter)
            .finish_non_exhaustive()
    }
}
