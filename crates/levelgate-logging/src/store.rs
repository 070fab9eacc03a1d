//! Live configuration snapshots and change subscriptions

use arc_swap::ArcSwap;
use levelgate_core::{CategoryRule, ConfigParseError, ConfigSnapshot, FilterResult};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

type SnapshotCallback = Arc<dyn Fn(&Arc<ConfigSnapshot>) + Send + Sync>;

#[derive(Default)]
struct Subscribers {
    entries: RwLock<Vec<(u64, SnapshotCallback)>>,
    next_id: AtomicU64,
}

/// Holds the current [`ConfigSnapshot`] and pushes every new one to subscribers
///
/// Each published snapshot is stamped with a version greater than every
/// earlier one. Loads are lock-free.
pub struct ConfigStore {
    current: ArcSwap<ConfigSnapshot>,
    next_version: AtomicU64,
    subscribers: Arc<Subscribers>,
}

impl ConfigStore {
    /// Create a store whose first snapshot has version 0
    pub fn new(initial: ConfigSnapshot) -> Self {
        Self {
            current: ArcSwap::from_pointee(initial.with_version(0)),
            next_version: AtomicU64::new(1),
            subscribers: Arc::new(Subscribers::default()),
        }
    }

    /// Create a store from a JSON document
    pub fn from_json_slice(bytes: &[u8]) -> FilterResult<Self> {
        Ok(Self::new(ConfigSnapshot::from_json_slice(bytes)?))
    }

    /// The newest published snapshot
    pub fn current(&self) -> Arc<ConfigSnapshot> {
        self.current.load_full()
    }

    /// Version of the newest published snapshot
    pub fn version(&self) -> u64 {
        self.current.load().version()
    }

    /// Rule configured for exactly `category` in the current snapshot
    pub fn rule(&self, category: &str) -> Option<Result<CategoryRule, ConfigParseError>> {
        self.current.load().rule(category).cloned()
    }

    /// Replace the configuration and notify every subscriber
    ///
    /// Returns the version stamped on the snapshot. Concurrent publishers never
    /// move `current()` back to an older version.
    pub fn publish(&self, snapshot: ConfigSnapshot) -> u64 {
        let version = self.next_version.fetch_add(1, Ordering::SeqCst);
        let snapshot = Arc::new(snapshot.with_version(version));

        self.current.rcu(|current| {
            if current.version() > version {
                Arc::clone(current)
            } else {
                Arc::clone(&snapshot)
            }
        });

        tracing::debug!(
            version,
            categories = snapshot.len(),
            errors = snapshot.errors().count(),
            "Published logging configuration"
        );

        // Callbacks run without the subscriber lock so they may subscribe or drop
        let callbacks: Vec<SnapshotCallback> = self
            .subscribers
            .entries
            .read()
            .iter()
            .map(|(_, callback)| Arc::clone(callback))
            .collect();
        for callback in callbacks {
            callback(&snapshot);
        }

        version
    }

    /// Parse a JSON document and publish it
    ///
    /// A document that cannot be read leaves the store untouched.
    pub fn reload_json(&self, bytes: &[u8]) -> FilterResult<u64> {
        let snapshot = ConfigSnapshot::from_json_slice(bytes)?;
        Ok(self.publish(snapshot))
    }

    /// Parse a TOML document and publish it
    pub fn reload_toml(&self, text: &str) -> FilterResult<u64> {
        let snapshot = ConfigSnapshot::from_toml_str(text)?;
        Ok(self.publish(snapshot))
    }

    /// Register a change callback
    ///
    /// The callback stays registered until the returned [`Subscription`] is
    /// dropped.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&Arc<ConfigSnapshot>) + Send + Sync + 'static,
    {
        let id = self.subscribers.next_id.fetch_add(1, Ordering::Relaxed);
        let callback: SnapshotCallback = Arc::new(callback);
        self.subscribers.entries.write().push((id, callback));

        Subscription {
            id,
            subscribers: Arc::downgrade(&self.subscribers),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.entries.read().len()
    }
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new(ConfigSnapshot::empty())
    }
}

/// Registration of a change callback; unregisters on drop
#[must_use = "dropping a Subscription unregisters its callback"]
pub struct Subscription {
    id: u64,
    subscribers: Weak<Subscribers>,
}

impl Subscription {
    pub fn id(&self) -> u64 {
        self.id
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(subscribers) = self.subscribers.upgrade() {
            subscribers.entries.write().retain(|(id, _)| *id != self.id);
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}
