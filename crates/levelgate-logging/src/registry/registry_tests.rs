#![allow(non_snake_case)]

use super::*;
use crate::engine::Lookup;
use crate::observer::CountingObserver;
use levelgate_core::{ConfigSection, ConfigSnapshot, Severity};

fn registry() -> FilterRegistry {
    let store = ConfigStore::new(ConfigSnapshot::from_sections([
        ("Net", ConfigSection::scalar("Warning")),
        ("Db", ConfigSection::new().with_enabled(false)),
    ]));
    FilterRegistry::new(Arc::new(store))
}

#[test]
fn FilterRegistry___new___is_empty() {
    let registry = registry();

    assert!(registry.is_empty());
    assert!(registry.get("Net").is_none());
}

#[test]
fn FilterRegistry___filter_for___creates_on_first_use() {
    let registry = registry();

    let filter = registry.filter_for("Net");

    assert_eq!(filter.category(), "Net");
    assert!(registry.contains("Net"));
    assert_eq!(registry.len(), 1);
}

#[test]
fn FilterRegistry___filter_for_twice___returns_same_instance() {
    let registry = registry();

    let first = registry.filter_for("Db");
    let second = registry.filter_for("Db");

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(registry.store().subscriber_count(), 1);
}

#[test]
fn FilterRegistry___filters___follow_store_reloads() {
    let registry = registry();
    let filter = registry.filter_for("Db");
    assert!(!filter.allows(Severity::Critical));

    registry.store().publish(ConfigSnapshot::empty());

    assert!(filter.allows(Severity::Critical));
}

#[test]
fn FilterRegistry___with_engine___applies_to_new_filters() {
    let registry = registry().with_engine(FilterEngine::hierarchical());

    let filter = registry.filter_for("Net.Client");

    assert!(!filter.allows(Severity::Information));
    assert!(filter.allows(Severity::Warning));
    assert_eq!(registry.engine.lookup(), Lookup::Hierarchical);
}

#[test]
fn FilterRegistry___with_observer___receives_reload_errors() {
    let observer = Arc::new(CountingObserver::new());
    let registry = registry().with_observer(Arc::clone(&observer) as Arc<dyn ReloadObserver>);
    let _filter = registry.filter_for("Net");

    registry.store().publish(ConfigSnapshot::from_sections([(
        "Net",
        ConfigSection::scalar("Loud"),
    )]));

    assert_eq!(observer.failures(), 1);
}

#[test]
fn FilterRegistry___categories___lists_created_filters() {
    let registry = registry();
    registry.filter_for("Net");
    registry.filter_for("Cache");

    let mut categories = registry.categories();
    categories.sort();

    assert_eq!(categories, vec!["Cache".to_string(), "Net".to_string()]);
}
