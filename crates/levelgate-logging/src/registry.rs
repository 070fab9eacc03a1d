//! One filter per category

use crate::engine::FilterEngine;
use crate::filter::ReloadableCategoryFilter;
use crate::observer::{ReloadObserver, TracingObserver};
use crate::store::ConfigStore;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::Arc;

/// Owns the [`ReloadableCategoryFilter`] of every category seen so far
///
/// Created by the host next to its [`ConfigStore`] and passed to whatever
/// creates loggers; there is no global instance.
pub struct FilterRegistry {
    filters: DashMap<String, Arc<ReloadableCategoryFilter>>,
    store: Arc<ConfigStore>,
    engine: FilterEngine,
    observer: Arc<dyn ReloadObserver>,
}

impl FilterRegistry {
    /// Create a registry with the flat engine and the tracing observer
    pub fn new(store: Arc<ConfigStore>) -> Self {
        Self {
            filters: DashMap::new(),
            store,
            engine: FilterEngine::flat(),
            observer: Arc::new(TracingObserver),
        }
    }

    /// Use another resolution engine for filters created from now on
    pub fn with_engine(mut self, engine: FilterEngine) -> Self {
        self.engine = engine;
        self
    }

    /// Use another observer for filters created from now on
    pub fn with_observer(mut self, observer: Arc<dyn ReloadObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn store(&self) -> &Arc<ConfigStore> {
        &self.store
    }

    /// Get the filter for `category`, creating it on first use
    ///
    /// Concurrent first uses all get the same filter. A losing candidate is
    /// dropped, which also drops its subscription.
    pub fn filter_for(&self, category: &str) -> Arc<ReloadableCategoryFilter> {
        if let Some(filter) = self.filters.get(category) {
            return Arc::clone(filter.value());
        }

        // Built outside the map lock: construction subscribes and may report errors
        let candidate = Arc::new(ReloadableCategoryFilter::new(
            category,
            &self.store,
            self.engine,
            Arc::clone(&self.observer),
        ));

        let (filter, created) = match self.filters.entry(category.to_string()) {
            Entry::Occupied(entry) => (Arc::clone(entry.get()), false),
            Entry::Vacant(entry) => (Arc::clone(entry.insert(candidate).value()), true),
        };

        // Logged after the shard lock is released: the event may come back
        // through a layer that looks up its own category here
        if created {
            tracing::trace!(category, "Created category filter");
        }
        filter
    }

    pub fn get(&self, category: &str) -> Option<Arc<ReloadableCategoryFilter>> {
        self.filters.get(category).map(|r| r.clone())
    }

    pub fn contains(&self, category: &str) -> bool {
        self.filters.contains_key(category)
    }

    /// Categories with a filter, in no particular order
    pub fn categories(&self) -> Vec<String> {
        self.filters.iter().map(|r| r.key().clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

impl std::fmt::Debug for FilterRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterRegistry")
            .field("filters", &self.filters.len())
            .field("engine", &self.engine)
            .finish()
    }
}

#[cfg(test)]
#[path = "registry/registry_tests.rs"]
mod registry_tests;
