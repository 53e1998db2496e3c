//! TTL Store
//!
//! Every entry lives for the same TTL. Reads never look at expiry; expired
//! entries disappear when [`TtlStore::cleanup`] runs, either from the
//! background sweep task or from the caller.

use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use std::thread;

use tokio::runtime::Handle;
use tokio::task::{self, JoinHandle};
use tokio_util::sync::CancellationToken;
use tracing::warn;

use crate::cache::clamp_ttl;
use crate::tasks::{spawn_cleanup_task, spawn_cleanup_thread};

// == TTL Entry ==
#[derive(Debug, Clone)]
struct TtlEntry<V> {
    value: V,
    expires_at: Instant,
}

// == TTL Entries ==
/// Concurrent map shared between a store and its sweep task.
#[derive(Debug)]
pub(crate) struct TtlEntries<V> {
    map: DashMap<String, TtlEntry<V>>,
}

impl<V> TtlEntries<V> {
    pub(crate) fn new() -> Self {
        Self {
            map: DashMap::new(),
        }
    }

    // == Cleanup ==
    /// Removes every entry whose expiry has passed and returns how many
    /// were removed. Shards are locked one at a time.
    pub(crate) fn cleanup(&self) -> usize {
        let now = Instant::now();
        let mut removed = 0;
        self.map.retain(|_, entry| {
            let keep = entry.expires_at > now;
            if !keep {
                removed += 1;
            }
            keep
        });
        removed
    }
}

// == Sweeper ==
/// Where the background sweep of a store runs.
#[derive(Debug)]
enum Sweeper {
    /// Task on the runtime the store was created in
    Task(JoinHandle<()>),
    /// Dedicated thread, for stores created outside a runtime
    Thread(thread::JoinHandle<()>),
}

impl Sweeper {
    fn is_finished(&self) -> bool {
        match self {
            Sweeper::Task(handle) => handle.is_finished(),
            Sweeper::Thread(handle) => handle.is_finished(),
        }
    }
}

// == TTL Store ==
/// Unbounded store with a single TTL and a background sweep every `ttl / 2`.
///
/// `get` returns whatever is stored, even past its expiry, until the next
/// sweep removes it. The sweep stops on [`TtlStore::stop`],
/// [`TtlStore::shutdown`], or when the store is dropped.
///
/// # Example
/// ```no_run
/// # async fn demo() {
/// use std::time::Duration;
/// use boundcache::TtlStore;
///
/// let store = TtlStore::new(Duration::from_secs(30));
/// store.set("session".to_string(), 42u64);
/// assert_eq!(store.get("session"), Some(42));
/// # }
/// ```
#[derive(Debug)]
pub struct TtlStore<V> {
    entries: Arc<TtlEntries<V>>,
    ttl: Duration,
    cancel: CancellationToken,
    sweeper: Option<Sweeper>,
}

impl<V> TtlStore<V>
where
    V: Clone + Send + Sync + 'static,
{
    // == Constructor ==
    /// Creates a store and starts its background sweep.
    ///
    /// Inside a Tokio runtime the sweep is a task on that runtime; outside
    /// one it runs on a dedicated `ttl-sweep` thread.
    ///
    /// # Arguments
    /// * `ttl` - Lifetime of every entry, clamped to
    ///   [`MIN_TTL`](crate::cache::MIN_TTL); sweeps run every `ttl / 2`
    pub fn new(ttl: Duration) -> Self {
        let mut store = Self::with_manual_sweep(ttl);
        let entries = store.entries.clone();
        let interval = store.sweep_interval();
        let cancel = store.cancel.clone();

        store.sweeper = if Handle::try_current().is_ok() {
            Some(Sweeper::Task(spawn_cleanup_task(entries, interval, cancel)))
        } else {
            match spawn_cleanup_thread(entries, interval, cancel) {
                Ok(handle) => Some(Sweeper::Thread(handle)),
                Err(err) => {
                    warn!(error = %err, "Failed to start TTL sweep thread, sweep must be driven by cleanup()");
                    None
                }
            }
        };

        store
    }

    /// Creates a store without a background sweep task.
    pub fn with_manual_sweep(ttl: Duration) -> Self {
        Self {
            entries: Arc::new(TtlEntries::new()),
            ttl: clamp_ttl(ttl),
            cancel: CancellationToken::new(),
            sweeper: None,
        }
    }

    // == Get ==
    /// Returns the stored value without checking its expiry.
    pub fn get(&self, key: &str) -> Option<V> {
        self.entries.map.get(key).map(|entry| entry.value.clone())
    }

    // == Set ==
    /// Stores `value` until `now + ttl`, replacing any previous entry.
    pub fn set(&self, key: String, value: V) {
        let entry = TtlEntry {
            value,
            expires_at: Instant::now() + self.ttl,
        };
        self.entries.map.insert(key, entry);
    }
}

impl<V> TtlStore<V> {
    /// Deletes the entry for `key` if present.
    pub fn remove(&self, key: &str) {
        self.entries.map.remove(key);
    }

    /// Sweeps expired entries now. Safe to call alongside the background
    /// task and concurrent reads and writes.
    pub fn cleanup(&self) -> usize {
        self.entries.cleanup()
    }

    /// Signals the background sweep to stop without waiting for it.
    /// Entries are kept.
    pub fn stop(&self) {
        self.cancel.cancel();
    }

    /// Stops the background sweep and waits until it has exited.
    pub async fn shutdown(&mut self) {
        self.cancel.cancel();

        let result = match self.sweeper.take() {
            Some(Sweeper::Task(handle)) => handle.await,
            Some(Sweeper::Thread(handle)) => task::spawn_blocking(move || {
                if handle.join().is_err() {
                    warn!("TTL sweep thread panicked");
                }
            })
            .await,
            None => Ok(()),
        };

        if let Err(err) = result {
            warn!(error = %err, "TTL sweep did not exit cleanly");
        }
    }

    /// Returns `true` while a background sweep is scheduled and running.
    pub fn is_sweeping(&self) -> bool {
        !self.cancel.is_cancelled()
            && self
                .sweeper
                .as_ref()
                .is_some_and(|sweeper| !sweeper.is_finished())
    }

    /// Lifetime given to every entry on `set`.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Period of the background sweep, half the TTL.
    pub fn sweep_interval(&self) -> Duration {
        self.ttl / 2
    }

    /// Number of stored entries, including expired ones not yet swept.
    pub fn len(&self) -> usize {
        self.entries.map.len()
    }

    /// Returns `true` when no entries are stored.
    pub fn is_empty(&self) -> bool {
        self.entries.map.is_empty()
    }
}

impl<V> Drop for TtlStore<V> {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
