//! # levelgate
//!
//! Per-category severity filtering placed in front of an existing log sink.
//!
//! levelgate decides whether a `(category, severity)` pair reaches the sink,
//! and lets that decision change at runtime:
//! - Threshold, explicit-set and disabled rules per category
//! - Live reload from JSON or TOML documents, without recreating loggers
//! - Lock-free gate on the log path (one atomic load)
//! - Malformed reloads keep the previous levels and are reported, never thrown
//!
//! ## Quick Start
//!
//! ```ignore
//! use levelgate::prelude::*;
//! use std::sync::Arc;
//!
//! let store = Arc::new(ConfigStore::from_json_slice(br#"{
//!     "Logging": {
//!         "Net.Client": { "enabled": true, "minimumLevel": "Error" },
//!         "Audit": { "levels": ["Trace", "Error"] }
//!     }
//! }"#)?);
//! let registry = Arc::new(FilterRegistry::new(Arc::clone(&store)));
//! let sink = FilteringSink::new(TracingSink, registry);
//!
//! let logger = sink.create_logger("Net.Client");
//! logger.warning(format_args!("dropped"));
//! logger.critical(format_args!("delivered"));
//!
//! // Later, when the settings file changes:
//! store.reload_json(br#"{ "Net.Client": { "enabled": false } }"#)?;
//! logger.critical(format_args!("dropped now"));
//! ```
//!
//! ## Tracing
//!
//! ```ignore
//! use tracing_subscriber::prelude::*;
//!
//! let layer = CategoryFilterLayer::new(FilteringSink::new(my_sink, registry));
//! tracing_subscriber::registry().with(layer).init();
//!
//! tracing::warn!(target: "Net.Client", "gated by the Net.Client rule");
//! ```
//!
//! ## Crate Structure
//!
//! This is a facade crate that re-exports from:
//! - [`levelgate_core`] - Severities, level sets, rules and snapshots
//! - [`levelgate_logging`] - Store, filters, registry, sinks and the tracing layer

// Re-export core types
pub use levelgate_core::{
    CategoryRule, ConfigParseError, ConfigSection, ConfigSnapshot, FilterError, FilterResult,
    LevelSet, Severity, UnknownSeverity,
};

// Re-export filtering types
pub use levelgate_logging::{
    CategoryFilterLayer, ConfigStore, CountingObserver, EventId, FilterEngine, FilterRegistry,
    FilteringSink, LogSink, Logger, Lookup, Record, ReloadObserver, ReloadOutcome,
    ReloadableCategoryFilter, ScopeGuard, Subscription, TracingObserver, TracingSink,
};

// Re-export common dependencies that hosts need
pub use tracing;
pub use tracing_subscriber;

/// Prelude module for convenient imports.
///
/// Use `use levelgate::prelude::*;` to import commonly used types.
pub mod prelude {
    pub use crate::{
        CategoryFilterLayer, ConfigSnapshot, ConfigStore, FilterRegistry, FilteringSink, LogSink,
        Logger, Record, Severity, TracingSink,
    };
}
