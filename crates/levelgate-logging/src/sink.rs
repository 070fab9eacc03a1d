//! Sink interface the filtering layer sits in front of

use levelgate_core::Severity;
use std::any::Any;
use std::error::Error;
use std::fmt;
use std::sync::Arc;

/// Numeric identifier and optional name of a log event
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct EventId {
    pub id: i32,
    pub name: Option<&'static str>,
}

impl EventId {
    pub const fn new(id: i32) -> Self {
        Self { id, name: None }
    }

    pub const fn named(id: i32, name: &'static str) -> Self {
        Self {
            id,
            name: Some(name),
        }
    }
}

/// One log call, borrowed for the duration of the call
#[derive(Clone, Copy)]
pub struct Record<'a> {
    category: &'a str,
    severity: Severity,
    event_id: EventId,
    args: fmt::Arguments<'a>,
    error: Option<&'a (dyn Error + 'static)>,
}

impl<'a> Record<'a> {
    pub fn new(category: &'a str, severity: Severity, args: fmt::Arguments<'a>) -> Self {
        Self {
            category,
            severity,
            event_id: EventId::default(),
            args,
            error: None,
        }
    }

    pub fn with_event_id(mut self, event_id: EventId) -> Self {
        self.event_id = event_id;
        self
    }

    pub fn with_error(mut self, error: Option<&'a (dyn Error + 'static)>) -> Self {
        self.error = error;
        self
    }

    pub fn category(&self) -> &'a str {
        self.category
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn event_id(&self) -> EventId {
        self.event_id
    }

    /// Unformatted message; formatting is up to the sink
    pub fn args(&self) -> fmt::Arguments<'a> {
        self.args
    }

    pub fn error(&self) -> Option<&'a (dyn Error + 'static)> {
        self.error
    }
}

impl fmt::Debug for Record<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Record")
            .field("category", &self.category)
            .field("severity", &self.severity)
            .field("event_id", &self.event_id)
            .field("message", &self.args)
            .field("error", &self.error.map(ToString::to_string))
            .finish()
    }
}

/// Keeps a sink scope open until dropped
#[must_use = "the scope ends when the guard is dropped"]
pub struct ScopeGuard(Option<Box<dyn Any>>);

impl ScopeGuard {
    /// Guard for a sink without scope support
    pub fn noop() -> Self {
        Self(None)
    }

    /// Guard holding sink-specific state until dropped
    pub fn new<T: 'static>(state: T) -> Self {
        Self(Some(Box::new(state)))
    }

    pub fn is_noop(&self) -> bool {
        self.0.is_none()
    }
}

impl fmt::Debug for ScopeGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ScopeGuard").field(&!self.is_noop()).finish()
    }
}

/// Downstream consumer of log records
///
/// Formatting and transport belong to the implementation; the filtering layer
/// only decides whether `log` is called.
pub trait LogSink: Send + Sync {
    fn log(&self, record: &Record<'_>);

    fn begin_scope(&self, _category: &str, _state: &dyn fmt::Display) -> ScopeGuard {
        ScopeGuard::noop()
    }
}

impl<S: LogSink + ?Sized> LogSink for Arc<S> {
    fn log(&self, record: &Record<'_>) {
        (**self).log(record)
    }

    fn begin_scope(&self, category: &str, state: &dyn fmt::Display) -> ScopeGuard {
        (**self).begin_scope(category, state)
    }
}

/// Sink that re-emits records as tracing events
///
/// `Critical` has no tracing level of its own; it is emitted at `ERROR` with
/// `critical = true`. Do not install it under a subscriber that also carries a
/// [`CategoryFilterLayer`](crate::CategoryFilterLayer) feeding this sink.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

macro_rules! emit {
    ($level:expr, $record:expr, $($extra:tt)*) => {
        tracing::event!(
            $level,
            category = $record.category(),
            event_id = $record.event_id().id,
            error = $record.error().map(tracing::field::display),
            $($extra)*
        )
    };
}

impl LogSink for TracingSink {
    fn log(&self, record: &Record<'_>) {
        use tracing::Level;

        let message = record.args();
        match record.severity() {
            Severity::Trace => emit!(Level::TRACE, record, "{}", message),
            Severity::Debug => emit!(Level::DEBUG, record, "{}", message),
            Severity::Information => emit!(Level::INFO, record, "{}", message),
            Severity::Warning => emit!(Level::WARN, record, "{}", message),
            Severity::Error => emit!(Level::ERROR, record, "{}", message),
            Severity::Critical => emit!(Level::ERROR, record, critical = true, "{}", message),
            Severity::None => {}
        }
    }

    fn begin_scope(&self, category: &str, state: &dyn fmt::Display) -> ScopeGuard {
        let span = tracing::info_span!("scope", category, state = %state);
        ScopeGuard::new(span.entered())
    }
}
