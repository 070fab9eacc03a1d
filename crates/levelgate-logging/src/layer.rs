//! Tracing layer that routes events through a [`FilteringSink`]

use crate::filtering::FilteringSink;
use crate::sink::Record;
use levelgate_core::Severity;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::Context;
use tracing_subscriber::registry::LookupSpan;

/// Tracing layer that uses each event's target as its category
///
/// The layer reports every callsite as enabled; the category filter is
/// consulted once in `on_event`, before the message is formatted.
pub struct CategoryFilterLayer {
    sink: FilteringSink,
}

impl CategoryFilterLayer {
    pub fn new(sink: FilteringSink) -> Self {
        Self { sink }
    }

    pub fn sink(&self) -> &FilteringSink {
        &self.sink
    }

    /// Convert tracing Level to our Severity
    fn convert_level(level: &Level) -> Severity {
        match *level {
            Level::TRACE => Severity::Trace,
            Level::DEBUG => Severity::Debug,
            Level::INFO => Severity::Information,
            Level::WARN => Severity::Warning,
            Level::ERROR => Severity::Error,
        }
    }
}

impl<S> Layer<S> for CategoryFilterLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let severity = Self::convert_level(metadata.level());
        let category = metadata.target();

        let filter = self.sink.filter_for(category);
        if !filter.allows(severity) {
            return;
        }

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);
        let message = visitor.finish();

        self.sink
            .forward(&Record::new(category, severity, format_args!("{message}")));
    }

    fn enabled(&self, _metadata: &tracing::Metadata<'_>, _ctx: Context<'_, S>) -> bool {
        true
    }
}

/// Collects the message field followed by the other fields as `key=value`
#[derive(Default)]
struct MessageVisitor {
    message: Option<String>,
    fields: Vec<String>,
}

impl MessageVisitor {
    fn finish(self) -> String {
        let mut parts = Vec::with_capacity(self.fields.len() + 1);
        parts.extend(self.message);
        parts.extend(self.fields);
        parts.join(" ")
    }
}

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = Some(format!("{:?}", value));
        } else {
            self.fields.push(format!("{}={:?}", field.name(), value));
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_string());
        } else {
            self.fields.push(format!("{}={}", field.name(), value));
        }
    }
}

#[cfg(test)]
#[path = "layer/layer_tests.rs"]
mod layer_tests;
