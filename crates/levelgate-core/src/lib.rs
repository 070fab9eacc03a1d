//! levelgate-core - Severities, level sets and category rules
//!
//! This crate provides the value types the filtering engine works on:
//! - [`Severity`] ordered severity enumeration with its name table
//! - [`LevelSet`] immutable set of enabled severities
//! - [`CategoryRule`] parsed filtering policy for one category
//! - [`ConfigSection`] and [`ConfigSnapshot`] configuration views
//! - [`ConfigParseError`] and [`FilterError`] for error handling

mod error;
mod level_set;
mod rule;
mod section;
mod severity;
mod snapshot;

pub use error::{ConfigParseError, FilterError, FilterResult, UnknownSeverity};
pub use level_set::LevelSet;
pub use rule::CategoryRule;
pub use section::ConfigSection;
pub use severity::Severity;
pub use snapshot::ConfigSnapshot;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        CategoryRule, ConfigParseError, ConfigSection, ConfigSnapshot, FilterError, FilterResult,
        LevelSet, Severity,
    };
}
