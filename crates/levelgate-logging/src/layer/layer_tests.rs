#![allow(non_snake_case)]

use super::*;
use crate::registry::FilterRegistry;
use crate::sink::{LogSink, Record};
use crate::store::ConfigStore;
use levelgate_core::{ConfigSection, ConfigSnapshot};
use parking_lot::Mutex;
use std::sync::Arc;
use tracing_subscriber::prelude::*;

#[derive(Default)]
struct RecordingSink {
    records: Mutex<Vec<(String, Severity, String)>>,
}

impl LogSink for RecordingSink {
    fn log(&self, record: &Record<'_>) {
        self.records.lock().push((
            record.category().to_string(),
            record.severity(),
            record.args().to_string(),
        ));
    }
}

fn layer_with(snapshot: ConfigSnapshot) -> (CategoryFilterLayer, Arc<RecordingSink>, Arc<ConfigStore>) {
    let store = Arc::new(ConfigStore::new(snapshot));
    let registry = Arc::new(FilterRegistry::new(Arc::clone(&store)));
    let inner = Arc::new(RecordingSink::default());
    let sink = FilteringSink::new(Arc::clone(&inner), registry);
    (CategoryFilterLayer::new(sink), inner, store)
}

// CategoryFilterLayer tests

#[test]
fn CategoryFilterLayer___convert_level___trace() {
    assert_eq!(CategoryFilterLayer::convert_level(&Level::TRACE), Severity::Trace);
}

#[test]
fn CategoryFilterLayer___convert_level___info_is_information() {
    assert_eq!(
        CategoryFilterLayer::convert_level(&Level::INFO),
        Severity::Information
    );
}

#[test]
fn CategoryFilterLayer___convert_level___warn_is_warning() {
    assert_eq!(CategoryFilterLayer::convert_level(&Level::WARN), Severity::Warning);
}

#[test]
fn CategoryFilterLayer___convert_level___error() {
    assert_eq!(CategoryFilterLayer::convert_level(&Level::ERROR), Severity::Error);
}

#[test]
fn CategoryFilterLayer___target_threshold___filters_below_level() {
    let (layer, inner, _store) = layer_with(ConfigSnapshot::from_sections([(
        "Net.Client",
        ConfigSection::scalar("Warning"),
    )]));
    let subscriber = tracing_subscriber::registry().with(layer);

    tracing::subscriber::with_default(subscriber, || {
        tracing::info!(target: "Net.Client", "Info message");
        tracing::debug!(target: "Net.Client", "Debug message");
        tracing::warn!(target: "Net.Client", "Warn message");
        tracing::info!(target: "Db", "Other category");
    });

    let records = inner.records.lock().clone();
    assert_eq!(
        records,
        vec![
            ("Net.Client".to_string(), Severity::Warning, "Warn message".to_string()),
            ("Db".to_string(), Severity::Information, "Other category".to_string()),
        ]
    );
}

#[test]
fn CategoryFilterLayer___disabled_target___drops_everything() {
    let (layer, inner, _store) = layer_with(ConfigSnapshot::from_sections([(
        "Net.Client",
        ConfigSection::new().with_enabled(false),
    )]));
    let subscriber = tracing_subscriber::registry().with(layer);

    tracing::subscriber::with_default(subscriber, || {
        tracing::error!(target: "Net.Client", "Error message");
    });

    assert!(inner.records.lock().is_empty());
}

#[test]
fn CategoryFilterLayer___reload___applies_to_following_events() {
    let (layer, inner, store) = layer_with(ConfigSnapshot::empty());
    let subscriber = tracing_subscriber::registry().with(layer);

    tracing::subscriber::with_default(subscriber, || {
        tracing::debug!(target: "Net.Client", "before");
        store.publish(ConfigSnapshot::from_sections([(
            "Net.Client",
            ConfigSection::scalar("Error"),
        )]));
        tracing::debug!(target: "Net.Client", "after");
    });

    // The store's own publish event is routed through the layer too
    let messages: Vec<_> = inner
        .records
        .lock()
        .iter()
        .filter(|r| r.0 == "Net.Client")
        .map(|r| r.2.clone())
        .collect();
    assert_eq!(messages, vec!["before".to_string()]);
}

#[test]
fn CategoryFilterLayer___structured_fields___included_in_message() {
    let (layer, inner, _store) = layer_with(ConfigSnapshot::empty());
    let subscriber = tracing_subscriber::registry().with(layer);

    tracing::subscriber::with_default(subscriber, || {
        tracing::info!(target: "Cache", cache_size = 100, name = "lru", "Cache started");
    });

    let records = inner.records.lock().clone();
    let message = &records[0].2;
    assert!(message.starts_with("Cache started"), "{message}");
    assert!(message.contains("cache_size=100"), "{message}");
    assert!(message.contains("name=lru"), "{message}");
}

#[test]
fn CategoryFilterLayer___message_only___no_extra_fields() {
    let (layer, inner, _store) = layer_with(ConfigSnapshot::empty());
    let subscriber = tracing_subscriber::registry().with(layer);

    tracing::subscriber::with_default(subscriber, || {
        tracing::info!(target: "Cache", "Simple message");
    });

    assert_eq!(inner.records.lock()[0].2, "Simple message");
}

/// Publishes a rejecting configuration while the event is being formatted
struct ReloadOnFormat<'a>(&'a ConfigStore);

impl std::fmt::Debug for ReloadOnFormat<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.publish(ConfigSnapshot::from_sections([(
            "Net.Client",
            ConfigSection::new().with_enabled(false),
        )]));
        f.write_str("reloaded")
    }
}

#[test]
fn CategoryFilterLayer___reload_while_formatting___delivers_approved_event() {
    let (layer, inner, store) = layer_with(ConfigSnapshot::empty());
    let subscriber = tracing_subscriber::registry().with(layer);

    tracing::subscriber::with_default(subscriber, || {
        tracing::warn!(target: "Net.Client", trigger = ?ReloadOnFormat(&store), "approved");
        tracing::warn!(target: "Net.Client", "after");
    });

    let messages: Vec<_> = inner
        .records
        .lock()
        .iter()
        .filter(|r| r.0 == "Net.Client")
        .map(|r| r.2.clone())
        .collect();
    assert_eq!(messages, vec!["approved trigger=reloaded".to_string()]);
}
