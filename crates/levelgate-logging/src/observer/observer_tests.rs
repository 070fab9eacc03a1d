#![allow(non_snake_case)]

use super::*;

fn error() -> ConfigParseError {
    ConfigParseError::UnknownSeverity {
        category: "Net".into(),
        key: "minimumLevel".into(),
        value: "Loud".into(),
    }
}

#[test]
fn CountingObserver___new___has_no_failures() {
    let observer = CountingObserver::new();

    assert_eq!(observer.failures(), 0);
    assert!(observer.last_error().is_none());
}

#[test]
fn CountingObserver___on_reload_error___counts_and_keeps_last() {
    let observer = CountingObserver::new();

    observer.on_reload_error(&error(), 3);
    observer.on_reload_error(&error(), 4);

    assert_eq!(observer.failures(), 2);
    assert_eq!(observer.last_error(), Some((error(), 4)));
}

#[test]
fn TracingObserver___on_reload_error___does_not_panic_without_subscriber() {
    TracingObserver.on_reload_error(&error(), 1);
}
