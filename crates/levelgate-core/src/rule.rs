//! Filtering policy for one category

use crate::error::ConfigParseError;
use crate::level_set::LevelSet;
use crate::section::{ConfigSection, LEVELS_KEY, MINIMUM_LEVEL_KEY, VALUE_KEY};
use crate::severity::Severity;

/// Parsed filtering policy for one category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryRule {
    /// Nothing passes
    Disabled,

    /// Every severity at or above the minimum passes
    Threshold(Severity),

    /// Exactly the listed severities pass
    ExplicitSet(LevelSet),
}

impl CategoryRule {
    /// Rule applied to categories with no configuration
    pub const PERMISSIVE: CategoryRule = CategoryRule::Threshold(Severity::Trace);

    /// Interpret a section
    ///
    /// Precedence: `enabled = false`, then the scalar value or `minimumLevel`
    /// (scalar first), then a non-empty `levels`, then the permissive default.
    /// An empty `levels` list counts as absent. Keys that lose are never
    /// parsed, so a disabled section cannot fail.
    pub fn parse(category: &str, section: &ConfigSection) -> Result<Self, ConfigParseError> {
        if section.enabled == Some(false) {
            return Ok(CategoryRule::Disabled);
        }

        let threshold = match (&section.value, &section.minimum_level) {
            (Some(value), _) => Some((VALUE_KEY, value)),
            (None, Some(level)) => Some((MINIMUM_LEVEL_KEY, level)),
            (None, None) => None,
        };

        if let Some((key, name)) = threshold {
            return parse_severity(category, key, name).map(CategoryRule::Threshold);
        }

        match &section.levels {
            Some(names) if !names.is_empty() => names
                .iter()
                .map(|name| parse_severity(category, LEVELS_KEY, name))
                .collect::<Result<LevelSet, _>>()
                .map(CategoryRule::ExplicitSet),
            _ => Ok(CategoryRule::PERMISSIVE),
        }
    }

    /// Expand the rule into the concrete set it allows
    pub fn level_set(&self) -> LevelSet {
        match self {
            CategoryRule::Disabled => LevelSet::empty(),
            CategoryRule::Threshold(min) => LevelSet::at_least(*min),
            CategoryRule::ExplicitSet(set) => *set,
        }
    }
}

impl Default for CategoryRule {
    fn default() -> Self {
        CategoryRule::PERMISSIVE
    }
}

fn parse_severity(category: &str, key: &str, name: &str) -> Result<Severity, ConfigParseError> {
    Severity::from_name(name).ok_or_else(|| ConfigParseError::UnknownSeverity {
        category: category.to_string(),
        key: key.to_string(),
        value: name.to_string(),
    })
}
