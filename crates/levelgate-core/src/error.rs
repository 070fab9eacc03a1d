//! Error types for levelgate configuration

use thiserror::Error;

/// Result type alias for configuration loading
pub type FilterResult<T> = Result<T, FilterError>;

/// A severity name that is not in the name table
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown severity name: {0:?}")]
pub struct UnknownSeverity(pub String);

/// Failure to turn one category's section into a rule
///
/// Always scoped to a single category: the other categories of the same
/// snapshot are unaffected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigParseError {
    /// A severity name did not match any known severity
    #[error("category {category:?}: unknown severity {value:?} in {key}")]
    UnknownSeverity {
        category: String,
        key: String,
        value: String,
    },

    /// A key held a value of the wrong shape
    #[error("category {category:?}: invalid value for {key}: {found}")]
    InvalidValue {
        category: String,
        key: String,
        found: String,
    },
}

impl ConfigParseError {
    /// Category the failing section belongs to
    pub fn category(&self) -> &str {
        match self {
            ConfigParseError::UnknownSeverity { category, .. } => category,
            ConfigParseError::InvalidValue { category, .. } => category,
        }
    }

    /// Key holding the offending value
    pub fn key(&self) -> &str {
        match self {
            ConfigParseError::UnknownSeverity { key, .. } => key,
            ConfigParseError::InvalidValue { key, .. } => key,
        }
    }
}

/// Error type for loading configuration documents
#[derive(Error, Debug)]
pub enum FilterError {
    /// A category section could not be parsed
    #[error(transparent)]
    Parse(#[from] ConfigParseError),

    /// The document as a whole was unreadable or had the wrong shape
    #[error("configuration document error: {0}")]
    Document(String),
}

impl From<serde_json::Error> for FilterError {
    fn from(err: serde_json::Error) -> Self {
        FilterError::Document(err.to_string())
    }
}

impl From<toml::de::Error> for FilterError {
    fn from(err: toml::de::Error) -> Self {
        FilterError::Document(err.to_string())
    }
}

#[cfg(test)]
#[path = "error/error_tests.rs"]
mod error_tests;
