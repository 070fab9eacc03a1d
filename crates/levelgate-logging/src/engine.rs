//! Category to level-set resolution

use levelgate_core::{CategoryRule, ConfigParseError, ConfigSnapshot, LevelSet};

/// How a category name is matched against configured rules
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Lookup {
    /// Exact name, then the permissive default
    #[default]
    Exact,

    /// Exact name, then each parent (`Net.Client.Http` -> `Net.Client` -> `Net`),
    /// then the permissive default
    Hierarchical,
}

/// Resolves the rule that applies to a category in a snapshot
///
/// Resolution is pure: the same snapshot and category always give the same
/// answer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterEngine {
    lookup: Lookup,
}

impl FilterEngine {
    /// Exact-name engine
    pub const fn flat() -> Self {
        Self {
            lookup: Lookup::Exact,
        }
    }

    /// Engine that falls back to parent categories
    pub const fn hierarchical() -> Self {
        Self {
            lookup: Lookup::Hierarchical,
        }
    }

    pub const fn lookup(&self) -> Lookup {
        self.lookup
    }

    /// Rule that applies to `category`
    pub fn resolve_rule(
        &self,
        snapshot: &ConfigSnapshot,
        category: &str,
    ) -> Result<CategoryRule, ConfigParseError> {
        let mut name = Some(category);
        while let Some(current) = name {
            if let Some(rule) = snapshot.rule(current) {
                return rule.clone();
            }
            name = match self.lookup {
                Lookup::Exact => None,
                Lookup::Hierarchical => parent(current),
            };
        }
        Ok(CategoryRule::PERMISSIVE)
    }

    /// Set of severities `category` lets through
    pub fn resolve(
        &self,
        snapshot: &ConfigSnapshot,
        category: &str,
    ) -> Result<LevelSet, ConfigParseError> {
        self.resolve_rule(snapshot, category)
            .map(|rule| rule.level_set())
    }
}

/// Parent category name, splitting on `.`, `/` or `::`
fn parent(category: &str) -> Option<&str> {
    let idx = category.rfind(['.', '/', ':'])?;
    let parent = category[..idx].trim_end_matches(':');
    (!parent.is_empty()).then_some(parent)
}
