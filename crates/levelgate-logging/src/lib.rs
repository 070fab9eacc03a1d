//! levelgate-logging - Live-reloadable category filtering
//!
//! This crate provides:
//! - [`ConfigStore`] holding the current snapshot and notifying subscribers
//! - [`FilterEngine`] resolving a category to its [`LevelSet`]
//! - [`ReloadableCategoryFilter`] caching one category's set across reloads
//! - [`FilterRegistry`] owning one filter per category
//! - [`FilteringSink`] and [`Logger`] gating calls before the inner [`LogSink`]
//! - [`CategoryFilterLayer`] applying the same gate to tracing events

mod engine;
mod filter;
mod filtering;
mod layer;
mod observer;
mod registry;
mod sink;
mod store;

pub use engine::{FilterEngine, Lookup};
pub use filter::{ReloadOutcome, ReloadableCategoryFilter};
pub use filtering::{FilteringSink, Logger};
pub use layer::CategoryFilterLayer;
pub use observer::{CountingObserver, ReloadObserver, TracingObserver};
pub use registry::FilterRegistry;
pub use sink::{EventId, LogSink, Record, ScopeGuard, TracingSink};
pub use store::{ConfigStore, Subscription};

pub use levelgate_core::{
    CategoryRule, ConfigParseError, ConfigSection, ConfigSnapshot, FilterError, FilterResult,
    LevelSet, Severity,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        CategoryFilterLayer, ConfigSnapshot, ConfigStore, FilterRegistry, FilteringSink, LogSink,
        Logger, Record, Severity,
    };
}
