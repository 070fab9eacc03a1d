//! Per-category filter that follows configuration reloads

use crate::engine::FilterEngine;
use crate::observer::ReloadObserver;
use crate::store::{ConfigStore, Subscription};
use levelgate_core::{ConfigSnapshot, LevelSet, Severity};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Low byte holds the level bits, the rest the snapshot version
const LEVEL_BITS: u64 = 0xFF;
const VERSION_SHIFT: u32 = 8;

const fn pack(version: u64, levels: u64) -> u64 {
    (version << VERSION_SHIFT) | (levels & LEVEL_BITS)
}

/// Result of applying one snapshot to a filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadOutcome {
    /// The resolved set replaced the cached one
    Applied,

    /// The section failed to parse; the cached set was kept and the error reported
    Rejected,

    /// A newer snapshot had already been applied
    Stale,
}

struct FilterState {
    category: String,
    /// `pack(version, bits)`, read with one load and replaced with one CAS
    packed: AtomicU64,
    engine: FilterEngine,
    observer: Arc<dyn ReloadObserver>,
}

impl FilterState {
    fn apply(&self, snapshot: &ConfigSnapshot) -> ReloadOutcome {
        let version = snapshot.version();
        let resolved = self.engine.resolve(snapshot, &self.category);

        let swapped = self
            .packed
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |current| {
                if current >> VERSION_SHIFT > version {
                    return None;
                }
                let levels = match &resolved {
                    Ok(set) => u64::from(set.bits()),
                    Err(_) => current & LEVEL_BITS,
                };
                Some(pack(version, levels))
            });

        match (swapped, resolved) {
            (Err(_), _) => {
                tracing::trace!(category = %self.category, version, "Ignoring stale snapshot");
                ReloadOutcome::Stale
            }
            (Ok(_), Ok(_)) => ReloadOutcome::Applied,
            (Ok(_), Err(err)) => {
                self.observer.on_reload_error(&err, version);
                ReloadOutcome::Rejected
            }
        }
    }
}

/// Cached level set for one category, kept current by store notifications
///
/// [`allows`](Self::allows) is a single atomic load and never blocks. A reload
/// replaces the whole set at once, and a snapshot older than the one already
/// applied is ignored. Dropping the filter unsubscribes it.
pub struct ReloadableCategoryFilter {
    state: Arc<FilterState>,
    _subscription: Subscription,
}

impl ReloadableCategoryFilter {
    /// Create a filter and resolve it against the store's current snapshot
    ///
    /// If the current section is malformed the filter starts with the
    /// permissive default and the error goes to `observer`.
    pub fn new(
        category: impl Into<String>,
        store: &ConfigStore,
        engine: FilterEngine,
        observer: Arc<dyn ReloadObserver>,
    ) -> Self {
        let state = Arc::new(FilterState {
            category: category.into(),
            packed: AtomicU64::new(pack(0, u64::from(LevelSet::all().bits()))),
            engine,
            observer,
        });

        // Subscribe before the first resolve so no publish falls in between
        let subscriber = Arc::clone(&state);
        let subscription = store.subscribe(move |snapshot| {
            subscriber.apply(snapshot);
        });
        state.apply(&store.current());

        Self {
            state,
            _subscription: subscription,
        }
    }

    pub fn category(&self) -> &str {
        &self.state.category
    }

    /// Whether a record of `severity` passes
    #[inline]
    pub fn allows(&self, severity: Severity) -> bool {
        self.level_set().contains(severity)
    }

    /// Currently cached set
    pub fn level_set(&self) -> LevelSet {
        let packed = self.state.packed.load(Ordering::Acquire);
        LevelSet::from_bits((packed & LEVEL_BITS) as u8)
    }

    /// Version of the last snapshot applied or rejected
    pub fn version(&self) -> u64 {
        self.state.packed.load(Ordering::Acquire) >> VERSION_SHIFT
    }

    /// Apply a snapshot directly, as a store notification would
    pub fn apply(&self, snapshot: &ConfigSnapshot) -> ReloadOutcome {
        self.state.apply(snapshot)
    }
}

impl std::fmt::Debug for ReloadableCategoryFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReloadableCategoryFilter")
            .field("category", &self.category())
            .field("levels", &self.level_set())
            .field("version", &self.version())
            .finish()
    }
}
