//! Raw configuration section for one category

use crate::error::ConfigParseError;
use serde_json::{Map, Value};

pub(crate) const ENABLED_KEY: &str = "enabled";
pub(crate) const MINIMUM_LEVEL_KEY: &str = "minimumLevel";
pub(crate) const LEVELS_KEY: &str = "levels";
pub(crate) const VALUE_KEY: &str = "value";

/// Already-resolved configuration values addressed by a category name
///
/// This is what the configuration collaborator hands over: booleans, strings
/// and string lists, not yet interpreted as severities. Interpretation is
/// [`CategoryRule::parse`](crate::CategoryRule::parse).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigSection {
    /// Scalar form (`"Net.Client": "Warning"`)
    pub value: Option<String>,

    /// `enabled` key; absent means enabled
    pub enabled: Option<bool>,

    /// `minimumLevel` key
    pub minimum_level: Option<String>,

    /// `levels` key
    pub levels: Option<Vec<String>>,
}

impl ConfigSection {
    /// Create an empty section (resolves to the permissive default)
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a section in scalar form
    pub fn scalar(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            ..Self::default()
        }
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = Some(enabled);
        self
    }

    pub fn with_minimum_level(mut self, level: impl Into<String>) -> Self {
        self.minimum_level = Some(level.into());
        self
    }

    pub fn with_levels<I, S>(mut self, levels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.levels = Some(levels.into_iter().map(Into::into).collect());
        self
    }

    /// Whether the section carries no recognized key at all
    pub fn is_empty(&self) -> bool {
        self.value.is_none()
            && self.enabled.is_none()
            && self.minimum_level.is_none()
            && self.levels.is_none()
    }

    /// Read a section from a JSON value
    ///
    /// Accepts a string (scalar form) or an object with `enabled`,
    /// `minimumLevel` and `levels`. `enabled` may be a boolean or the strings
    /// `"true"`/`"false"`. Unknown keys are ignored; `null` means absent.
    pub fn from_json(category: &str, value: &Value) -> Result<Self, ConfigParseError> {
        match value {
            Value::Null => Ok(Self::new()),
            Value::String(s) => Ok(Self::scalar(s.clone())),
            Value::Object(map) => {
                let mut section = Self::new();

                if let Some(enabled) = find_key(map, ENABLED_KEY) {
                    section.enabled = Some(parse_bool(category, enabled)?);
                }

                if let Some(level) = find_key(map, MINIMUM_LEVEL_KEY) {
                    let level = level
                        .as_str()
                        .ok_or_else(|| invalid(category, MINIMUM_LEVEL_KEY, level))?;
                    section.minimum_level = Some(level.to_string());
                }

                if let Some(levels) = find_key(map, LEVELS_KEY) {
                    let items = levels
                        .as_array()
                        .ok_or_else(|| invalid(category, LEVELS_KEY, levels))?;
                    let names = items
                        .iter()
                        .map(|item| {
                            item.as_str()
                                .map(str::to_string)
                                .ok_or_else(|| invalid(category, LEVELS_KEY, item))
                        })
                        .collect::<Result<Vec<_>, _>>()?;
                    section.levels = Some(names);
                }

                Ok(section)
            }
            other => Err(invalid(category, VALUE_KEY, other)),
        }
    }
}

/// Key lookup ignores ASCII case, so `MinimumLevel` and `minimumLevel` both match.
fn find_key<'v>(map: &'v Map<String, Value>, key: &str) -> Option<&'v Value> {
    map.iter()
        .find(|(name, value)| name.eq_ignore_ascii_case(key) && !value.is_null())
        .map(|(_, value)| value)
}

fn parse_bool(category: &str, value: &Value) -> Result<bool, ConfigParseError> {
    match value {
        Value::Bool(b) => Ok(*b),
        Value::String(s) if s.trim().eq_ignore_ascii_case("true") => Ok(true),
        Value::String(s) if s.trim().eq_ignore_ascii_case("false") => Ok(false),
        other => Err(invalid(category, ENABLED_KEY, other)),
    }
}

fn invalid(category: &str, key: &str, found: &Value) -> ConfigParseError {
    ConfigParseError::InvalidValue {
        category: category.to_string(),
        key: key.to_string(),
        found: found.to_string(),
    }
}
