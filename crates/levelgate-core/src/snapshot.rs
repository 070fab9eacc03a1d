//! Immutable configuration snapshots

use crate::error::{ConfigParseError, FilterError, FilterResult};
use crate::rule::CategoryRule;
use crate::section::ConfigSection;
use serde_json::Value;
use std::collections::BTreeMap;

/// Conventional wrapper object in settings files
const LOGGING_ROOT: &str = "Logging";

/// Immutable view of the filtering configuration at one point in time
///
/// Each category entry is parsed independently: a malformed category keeps
/// its error in its own slot and the rest of the snapshot stays usable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigSnapshot {
    version: u64,
    rules: BTreeMap<String, Result<CategoryRule, ConfigParseError>>,
}

impl ConfigSnapshot {
    /// Snapshot with no categories (every category gets the permissive default)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a snapshot from already-resolved sections
    pub fn from_sections<I, K>(sections: I) -> Self
    where
        I: IntoIterator<Item = (K, ConfigSection)>,
        K: Into<String>,
    {
        let rules = sections
            .into_iter()
            .map(|(category, section)| {
                let category = category.into();
                let rule = CategoryRule::parse(&category, &section);
                (category, rule)
            })
            .collect();

        Self { version: 0, rules }
    }

    /// Build a snapshot from a JSON document
    ///
    /// The document maps category names to sections. A document whose only
    /// key is `"Logging"` (in any case) is unwrapped first.
    pub fn from_json_slice(bytes: &[u8]) -> FilterResult<Self> {
        let document: Value = serde_json::from_slice(bytes)?;
        Self::from_document(document)
    }

    /// Build a snapshot from a TOML document (same layout as JSON)
    pub fn from_toml_str(text: &str) -> FilterResult<Self> {
        let document: Value = toml::from_str(text)?;
        Self::from_document(document)
    }

    fn from_document(document: Value) -> FilterResult<Self> {
        let Value::Object(mut root) = document else {
            return Err(FilterError::Document(
                "expected a map of category sections".to_string(),
            ));
        };

        let wrapper = match root.iter().next() {
            Some((key, Value::Object(_)))
                if root.len() == 1 && key.eq_ignore_ascii_case(LOGGING_ROOT) =>
            {
                Some(key.clone())
            }
            _ => None,
        };
        if let Some(key) = wrapper {
            if let Some(Value::Object(inner)) = root.remove(&key) {
                root = inner;
            }
        }

        let rules = root
            .into_iter()
            .map(|(category, value)| {
                let rule = ConfigSection::from_json(&category, &value)
                    .and_then(|section| CategoryRule::parse(&category, &section));
                (category, rule)
            })
            .collect();

        Ok(Self { version: 0, rules })
    }

    /// Same snapshot stamped with a publication version
    #[must_use]
    pub fn with_version(mut self, version: u64) -> Self {
        self.version = version;
        self
    }

    /// Publication version (0 until published)
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Rule lookup by category name
    ///
    /// An exact match wins; otherwise names are compared ignoring ASCII case.
    /// When several configured names differ only by case, the first in sorted
    /// order is used.
    pub fn rule(&self, category: &str) -> Option<&Result<CategoryRule, ConfigParseError>> {
        self.rules.get(category).or_else(|| {
            self.rules
                .iter()
                .find(|(name, _)| name.eq_ignore_ascii_case(category))
                .map(|(_, rule)| rule)
        })
    }

    pub fn contains(&self, category: &str) -> bool {
        self.rule(category).is_some()
    }

    /// Configured category names, sorted
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }

    /// Every category whose section failed to parse
    pub fn errors(&self) -> impl Iterator<Item = &ConfigParseError> {
        self.rules.values().filter_map(|rule| rule.as_ref().err())
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
