//! # State Storage
//!
//! The storage collaborator only needs two guarantees: state is loaded before an
//! activation's first call, and saved when the activation asks. Payloads are opaque
//! strings (JSON produced by the host); the store never interprets them.
//!
//! [`MemoryStore`] is the default store. It also lets tests slow writes down and
//! inject failures.

use crate::framework::entity::ActorEntity;
use crate::framework::error::StorageError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tracing::{debug, warn};

/// Key-value persistence service with load-on-activation and save-on-demand semantics.
#[async_trait]
pub trait StateStore: Send + Sync + 'static {
    /// Load the payload stored for `kind/key`, if any.
    async fn read(&self, kind: &str, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the payload stored for `kind/key`.
    async fn write(&self, kind: &str, key: &str, payload: String) -> Result<(), StorageError>;
}

/// In-process store keyed by `(kind, key)`.
#[derive(Default)]
pub struct MemoryStore {
    records: Mutex<HashMap<(String, String), String>>,
    latency: Duration,
    writes: AtomicUsize,
    failing_writes: AtomicUsize,
    failing_reads: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every write sleeps for `latency` before completing.
    pub fn with_latency(latency: Duration) -> Self {
        Self {
            latency,
            ..Self::default()
        }
    }

    /// Reject the next `count` writes.
    pub fn fail_next_writes(&self, count: usize) {
        self.failing_writes.store(count, Ordering::SeqCst);
    }

    /// Reject the next `count` reads.
    pub fn fail_next_reads(&self, count: usize) {
        self.failing_reads.store(count, Ordering::SeqCst);
    }

    /// Number of physical write attempts so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Decode the last persisted state of one entity.
    pub fn snapshot<E: ActorEntity>(&self, key: &E::Key) -> Option<E> {
        let records = self.records();
        let payload = records.get(&(E::KIND.to_string(), key.to_string()))?;
        serde_json::from_str(payload).ok()
    }

    fn records(&self) -> MutexGuard<'_, HashMap<(String, String), String>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn take_one(counter: &AtomicUsize) -> bool {
    counter
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
        .is_ok()
}

#[async_trait]
impl StateStore for MemoryStore {
    async fn read(&self, kind: &str, key: &str) -> Result<Option<String>, StorageError> {
        if take_one(&self.failing_reads) {
            warn!(kind, key, "Injected read failure");
            return Err(StorageError::ReadFailed {
                kind: kind.to_string(),
                key: key.to_string(),
            });
        }
        Ok(self.records().get(&(kind.to_string(), key.to_string())).cloned())
    }

    async fn write(&self, kind: &str, key: &str, payload: String) -> Result<(), StorageError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        if take_one(&self.failing_writes) {
            warn!(kind, key, "Injected write failure");
            return Err(StorageError::WriteRejected {
                kind: kind.to_string(),
                key: key.to_string(),
            });
        }
        debug!(kind, key, bytes = payload.len(), "Stored");
        self.records()
            .insert((kind.to_string(), key.to_string()), payload);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_read_returns_last_write() {
        let store = MemoryStore::new();
        assert_eq!(store.read("post", "p1").await.unwrap(), None);

        store.write("post", "p1", "a".into()).await.unwrap();
        store.write("post", "p1", "b".into()).await.unwrap();

        assert_eq!(store.read("post", "p1").await.unwrap().as_deref(), Some("b"));
        assert_eq!(store.read("account", "p1").await.unwrap(), None);
        assert_eq!(store.write_count(), 2);
    }

    #[tokio::test]
    async fn test_injected_failures_are_consumed() {
        let store = MemoryStore::new();
        store.fail_next_writes(1);
        store.fail_next_reads(1);

        assert!(store.write("post", "p1", "a".into()).await.is_err());
        assert!(store.write("post", "p1", "b".into()).await.is_ok());
        assert!(store.read("post", "p1").await.is_err());
        assert_eq!(store.read("post", "p1").await.unwrap().as_deref(), Some("b"));
    }
}
