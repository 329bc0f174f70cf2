use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::watch;

use crate::config::StoreConfig;
use crate::entry::Entry;

/// Internal shared state for the store
struct StoreInner {
    data: DashMap<String, Entry>,
    /// TTL applied uniformly to every entry
    ttl: Duration,
    /// Sender to signal shutdown to the sweep task
    shutdown_tx: watch::Sender<bool>,
}

/// Thread-safe in-memory clipboard store with a fixed TTL
///
/// Uses `DashMap` for sharded concurrent access. Reads never block other
/// reads, and writes only block access to the shard holding the key being
/// written.
///
/// Expiration is enforced twice over:
///
/// - **lazily**: a `get` that finds an entry older than the TTL removes it
///   and reports the identifier as absent;
/// - **proactively**: a background sweep task, spawned at construction,
///   periodically removes every expired entry so that write-once,
///   never-read keys do not accumulate.
///
/// The sweep task runs for the lifetime of the store and is stopped when
/// the store is dropped.
///
/// # Example
///
/// ```rust,no_run
/// use clipboard_core::{Store, StoreConfig};
/// use std::time::Duration;
///
/// #[tokio::main]
/// async fn main() {
///     let config = StoreConfig::default()
///         .with_ttl(Duration::from_secs(600))
///         .with_sweep_interval(Duration::from_secs(30));
///     let store = Store::with_config(config);
///
///     store.set("note1", "hello");
///     assert_eq!(store.get("note1"), Some("hello".to_string()));
/// }
/// ```
#[derive(Clone)]
pub struct Store {
    inner: Arc<StoreInner>,
}

impl Store {
    /// Creates a new store with default configuration
    ///
    /// # Panics
    ///
    /// Panics if called outside of a Tokio runtime context. The store
    /// requires a runtime to spawn its background sweep task.
    pub fn new() -> Self {
        Self::with_config(StoreConfig::default())
    }

    /// Creates a new store with custom configuration
    ///
    /// # Panics
    ///
    /// Panics if called outside of a Tokio runtime context. The store
    /// requires a runtime to spawn its background sweep task.
    pub fn with_config(config: StoreConfig) -> Self {
        // Verify that a Tokio runtime is available before proceeding.
        // This provides a clear error message instead of a cryptic panic
        // from tokio::spawn.
        if tokio::runtime::Handle::try_current().is_err() {
            panic!(
                "clipboard_core::Store requires a Tokio runtime. \
                 Ensure you are calling Store::new() or Store::with_config() \
                 from within a #[tokio::main] or #[tokio::test] context, \
                 or from code running on a Tokio runtime."
            );
        }

        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let inner = Arc::new(StoreInner {
            data: DashMap::new(),
            ttl: config.ttl,
            shutdown_tx,
        });

        // Spawn the background sweep task
        let sweep_inner = Arc::clone(&inner);
        tokio::spawn(Self::sweep_task(
            sweep_inner,
            config.sweep_interval,
            shutdown_rx,
        ));

        Self { inner }
    }

    /// Background task that periodically removes expired entries
    async fn sweep_task(
        inner: Arc<StoreInner>,
        interval: Duration,
        mut shutdown_rx: watch::Receiver<bool>,
    ) {
        let mut ticker = tokio::time::interval(interval);
        // Skip the first immediate tick - we want to wait for the interval first
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    Self::sweep_internal(&inner);
                }
                _ = shutdown_rx.changed() => {
                    if *shutdown_rx.borrow() {
                        // Shutdown signal received
                        break;
                    }
                }
            }
        }
    }

    /// Internal sweep logic (shared between manual and background sweeps)
    fn sweep_internal(inner: &StoreInner) -> usize {
        let mut removed_count = 0;

        inner.data.retain(|_, entry| {
            if entry.is_expired(inner.ttl) {
                removed_count += 1;
                false
            } else {
                true
            }
        });

        if removed_count > 0 {
            tracing::debug!(removed = removed_count, "sweep reclaimed expired entries");
        }

        removed_count
    }

    /// Stores a value under the given identifier
    ///
    /// If the identifier already holds an entry, the entry is replaced
    /// whole and its age resets to zero. Concurrent writes to the same
    /// identifier serialize on the shard lock; the last one to acquire it
    /// wins. This operation cannot fail.
    pub fn set(&self, id: impl Into<String>, value: impl Into<Arc<str>>) {
        let entry = Entry::new(value, Instant::now());
        self.inner.data.insert(id.into(), entry);
    }

    /// Retrieves a value by identifier
    ///
    /// Returns `None` if the identifier was never set or its entry has
    /// expired. An expired entry discovered here is removed as a side
    /// effect; a read of a live entry leaves it untouched and does NOT
    /// extend its TTL.
    pub fn get(&self, id: &str) -> Option<String> {
        let entry = self.inner.data.get(id)?;

        if entry.value().is_expired(self.inner.ttl) {
            // Drop the read reference before removing
            drop(entry);
            // remove_if re-checks expiry under the shard's write lock, so a
            // fresh entry written concurrently for the same id is never
            // deleted; the removal is a no-op if the entry is already gone.
            self.inner
                .data
                .remove_if(id, |_, entry| entry.is_expired(self.inner.ttl));
            return None;
        }

        Some(entry.value().value().to_string())
    }

    /// Stores a value recorded at an arbitrary instant (for testing expiry)
    #[cfg(test)]
    fn set_recorded_at(&self, id: impl Into<String>, value: impl Into<Arc<str>>, at: Instant) {
        let entry = Entry::new(value, at);
        self.inner.data.insert(id.into(), entry);
    }

    /// Manually triggers a sweep of all expired entries
    ///
    /// Returns the number of entries removed.
    ///
    /// Note: This is also done automatically by the background task.
    pub fn sweep(&self) -> usize {
        Self::sweep_internal(&self.inner)
    }

    /// Returns the number of entries in the store (including expired ones
    /// not yet reclaimed)
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.data.len()
    }

    /// Returns `true` if the store is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.data.is_empty()
    }

    /// Returns the TTL applied to every entry
    pub fn ttl(&self) -> Duration {
        self.inner.ttl
    }

    /// Gracefully shuts down the background sweep task
    ///
    /// This is called automatically when the store is dropped,
    /// but can be called manually if needed.
    pub fn shutdown(&self) {
        let _ = self.inner.shutdown_tx.send(true);
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for StoreInner {
    fn drop(&mut self) {
        // Signal the sweep task to stop when the store is dropped
        let _ = self.shutdown_tx.send(true);
    }
}
