//! # Write Coalescer
//!
//! Single-flight persistence for one activation.
//!
//! At most one physical write is in flight per activation. Every mutating call still
//! waits for a write that started *after* its own mutation:
//!
//! ```text
//! persist()
//!   ├─ nothing outstanding ──► start write W, mark it outstanding, await W
//!   └─ W outstanding ────────► await W (ignore its failure)
//!                              ├─ marker still W ──► clear it
//!                              └─ await the current outstanding write,
//!                                 starting one if none is outstanding
//! on completion: clear the marker if it still refers to the finished write
//! ```
//!
//! A burst of mutations arriving while one write runs collapses onto a single follow-up
//! write. A caller arriving after the previous write finished always starts a fresh one.
//! The failure of the write a caller awaits for its own result is reported to it; the
//! failure of a write it only queued behind is not.

use crate::framework::error::StorageError;
use futures::future::{BoxFuture, FutureExt, Shared};
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::debug;

pub type WriteResult = Result<(), StorageError>;

type Writer = Arc<dyn Fn() -> BoxFuture<'static, WriteResult> + Send + Sync>;

#[derive(Clone)]
struct Write {
    generation: u64,
    future: Shared<BoxFuture<'static, WriteResult>>,
}

#[derive(Default)]
struct Slot {
    outstanding: Option<Write>,
    generation: u64,
}

enum Entry {
    Started(Write),
    Queued(Write),
}

/// Mutex-guarded slot holding the outstanding write of one activation.
#[derive(Clone)]
pub struct WriteCoalescer {
    slot: Arc<Mutex<Slot>>,
    writer: Writer,
}

impl WriteCoalescer {
    /// `writer` performs one physical write each time it is invoked.
    pub fn new<F, Fut>(writer: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = WriteResult> + Send + 'static,
    {
        Self {
            slot: Arc::new(Mutex::new(Slot::default())),
            writer: Arc::new(move || writer().boxed()),
        }
    }

    /// Persist, sharing an in-flight write where possible.
    ///
    /// The decision to start or queue is taken when this is called, not when the
    /// returned future is first polled.
    pub fn persist(&self) -> impl Future<Output = WriteResult> + Send + 'static {
        let entry = {
            let mut slot = self.lock();
            match &slot.outstanding {
                Some(write) => Entry::Queued(write.clone()),
                None => Entry::Started(self.start(&mut slot)),
            }
        };
        let this = self.clone();

        async move {
            let write = match entry {
                Entry::Started(write) => write,
                Entry::Queued(previous) => {
                    debug!(generation = previous.generation, "Waiting behind in-flight write");
                    let _ = previous.future.clone().await;
                    this.current_after(previous.generation)
                }
            };
            let result = write.future.clone().await;
            this.clear(write.generation);
            result
        }
    }

    /// True while a physical write is outstanding.
    pub fn is_writing(&self) -> bool {
        self.lock().outstanding.is_some()
    }

    fn start(&self, slot: &mut Slot) -> Write {
        slot.generation += 1;
        let generation = slot.generation;
        debug!(generation, "Write started");

        let task = tokio::spawn((self.writer)());
        let future = async move {
            task.await
                .unwrap_or_else(|e| Err(StorageError::Interrupted(e.to_string())))
        }
        .boxed()
        .shared();

        let write = Write { generation, future };
        slot.outstanding = Some(write.clone());
        write
    }

    fn current_after(&self, finished: u64) -> Write {
        let mut slot = self.lock();
        if matches!(&slot.outstanding, Some(w) if w.generation == finished) {
            slot.outstanding = None;
        }
        match &slot.outstanding {
            Some(write) => write.clone(),
            None => self.start(&mut slot),
        }
    }

    fn clear(&self, finished: u64) {
        let mut slot = self.lock();
        if matches!(&slot.outstanding, Some(w) if w.generation == finished) {
            slot.outstanding = None;
        }
    }

    fn lock(&self) -> MutexGuard<'_, Slot> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::{mpsc, oneshot};

    type Gate = oneshot::Sender<WriteResult>;

    /// A coalescer whose writes block until the test releases them.
    fn gated() -> (WriteCoalescer, Arc<AtomicUsize>, mpsc::UnboundedReceiver<Gate>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let (gates_tx, gates_rx) = mpsc::unbounded_channel();
        let counter = calls.clone();
        let coalescer = WriteCoalescer::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            let (gate, released) = oneshot::channel();
            let _ = gates_tx.send(gate);
            async move {
                released
                    .await
                    .unwrap_or_else(|_| Err(StorageError::Interrupted("gate dropped".into())))
            }
        });
        (coalescer, calls, gates_rx)
    }

    async fn settle() {
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test]
    async fn test_concurrent_persists_share_one_follow_up_write() {
        let (coalescer, calls, mut gates) = gated();

        let first = tokio::spawn(coalescer.persist());
        let second = tokio::spawn(coalescer.persist());
        let third = tokio::spawn(coalescer.persist());

        let w1 = gates.recv().await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(coalescer.is_writing());
        w1.send(Ok(())).unwrap();

        // second and third both queued behind w1; exactly one follow-up write covers them
        let w2 = gates.recv().await.unwrap();
        settle().await;
        w2.send(Ok(())).unwrap();

        assert_eq!(first.await.unwrap(), Ok(()));
        assert_eq!(second.await.unwrap(), Ok(()));
        assert_eq!(third.await.unwrap(), Ok(()));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert!(!coalescer.is_writing());
    }

    #[tokio::test]
    async fn test_failure_reaches_only_the_caller_awaiting_that_write() {
        let (coalescer, calls, mut gates) = gated();

        let first = tokio::spawn(coalescer.persist());
        let second = tokio::spawn(coalescer.persist());

        let w1 = gates.recv().await.unwrap();
        w1.send(Err(StorageError::WriteRejected {
            kind: "test".into(),
            key: "k".into(),
        }))
        .unwrap();

        let w2 = gates.recv().await.unwrap();
        w2.send(Ok(())).unwrap();

        assert!(matches!(
            first.await.unwrap(),
            Err(StorageError::WriteRejected { .. })
        ));
        assert_eq!(second.await.unwrap(), Ok(()));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_sequential_persists_each_write() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let coalescer = WriteCoalescer::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            async { Ok(()) }
        });

        coalescer.persist().await.unwrap();
        coalescer.persist().await.unwrap();
        coalescer.persist().await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_first_write_starts_before_being_polled() {
        let (coalescer, calls, mut gates) = gated();

        let pending = coalescer.persist();
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        gates.recv().await.unwrap().send(Ok(())).unwrap();
        assert_eq!(pending.await, Ok(()));
    }
}
