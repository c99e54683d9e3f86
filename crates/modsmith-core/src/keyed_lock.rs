//! Per-feature pipeline locking
//!
//! Serializes the full create/refine/delete pipeline per feature name.
//! Operations against different names never contend; two operations
//! against the same name can no longer interleave at the file-write or
//! registry-transition steps. Idle entries are pruned on release, so the
//! table only ever holds keys with an active holder or waiter.

use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Keyed mutex over feature names
#[derive(Debug, Clone, Default)]
pub struct KeyedLock {
    locks: Arc<DashMap<String, Arc<Mutex<()>>>>,
}

/// Holds the lock for one key; releasing prunes the table entry when no
/// other task is holding or waiting on it
#[must_use = "the key is unlocked as soon as the guard is dropped"]
pub struct KeyedGuard {
    key: String,
    locks: Arc<DashMap<String, Arc<Mutex<()>>>>,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for KeyedGuard {
    fn drop(&mut self) {
        // Release before the table check so a waiter can proceed
        self.guard.take();
        // Waiters and concurrent acquirers hold clones of the Arc;
        // strong count 1 means only the table itself still does.
        // `remove_if` runs under the shard lock `entry` also takes, so
        // an acquirer either clones first (count > 1, entry kept) or
        // finds the entry gone and creates a fresh one.
        self.locks
            .remove_if(&self.key, |_, lock| Arc::strong_count(lock) == 1);
    }
}

impl KeyedLock {
    /// Create empty lock table
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the lock for a key, waiting if another holder is active
    pub async fn acquire(&self, key: &str) -> KeyedGuard {
        let lock = self
            .locks
            .entry(key.to_string())
            .or_default()
            .clone();
        let guard = lock.lock_owned().await;
        KeyedGuard {
            key: key.to_string(),
            locks: self.locks.clone(),
            guard: Some(guard),
        }
    }
}
