//! # Entity Host
//!
//! This module defines the `EntityActor`, the task that hosts one activation of an
//! entity. It implements the "Server" side of the actor model: it owns the entity
//! state and the receiving half of the mailbox.

use crate::framework::activation::Activation;
use crate::framework::client::EntityRef;
use crate::framework::coalescer::WriteCoalescer;
use crate::framework::entity::{ActorEntity, Turn};
use crate::framework::error::StorageError;
use crate::framework::message::Envelope;
use crate::framework::storage::StateStore;
use futures::stream::{FuturesUnordered, StreamExt};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error, info};

/// Hosts a single entity instance.
///
/// # Concurrency Model
/// Only this task ever touches the entity, so the state needs no lock. Each call's
/// synchronous portion runs to completion before the next message is taken.
///
/// Unlike a strictly sequential actor, a call that has to wait on a peer does not block
/// the mailbox: its continuation is parked in `in_flight` and polled alongside new
/// messages. Two accounts that follow each other at the same moment both make progress
/// instead of waiting on one another forever.
///
/// # Lifecycle
/// 1. **Activate**: load state from the store (default state if nothing was stored).
/// 2. **Serve**: handle calls, answer snapshot requests from pending writes.
/// 3. **Stop**: on `Envelope::Stop` or when every handle is gone, drain the mailbox,
///    let suspended continuations finish, then exit.
///
/// Continuations re-enter the entity through a follow-up channel owned by the host, not
/// through the mailbox. A call accepted before the stop therefore still completes all of
/// its follow-up turns.
pub struct EntityActor<E: ActorEntity> {
    key: E::Key,
    receiver: mpsc::Receiver<Envelope<E>>,
    buffer_size: usize,
    store: Arc<dyn StateStore>,
}

impl<E: ActorEntity> EntityActor<E> {
    /// Creates the host and the first handle to it.
    ///
    /// * `buffer_size` - mailbox capacity. Callers wait for room when it is full.
    pub fn new(
        key: E::Key,
        store: Arc<dyn StateStore>,
        buffer_size: usize,
    ) -> (Self, EntityRef<E>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            key: key.clone(),
            receiver,
            buffer_size,
            store,
        };
        (actor, EntityRef::new(key, sender))
    }

    /// Runs the activation until it is stopped.
    ///
    /// # Context Injection
    /// `context` is handed to the entity on every call through [`Activation::context`].
    pub async fn run(mut self, context: E::Context) {
        let entity_type = E::KIND;
        let key = self.key.clone();

        let mut entity = match self.load().await {
            Ok(entity) => entity,
            Err(e) => {
                error!(entity_type, %key, error = %e, "Activation failed");
                return;
            }
        };
        info!(entity_type, %key, "Activated");

        let (snapshot_sender, mut snapshots) = mpsc::unbounded_channel();
        let (follow_up_sender, mut follow_ups) = mpsc::channel(self.buffer_size);
        let activation = Activation::new(
            key.clone(),
            context,
            self.coalescer(snapshot_sender),
            follow_up_sender,
        );
        let mut in_flight = FuturesUnordered::new();
        let mut accepting = true;

        while accepting || !in_flight.is_empty() {
            let envelope = tokio::select! {
                envelope = self.receiver.recv(), if accepting => match envelope {
                    Some(envelope) => envelope,
                    None => {
                        accepting = false;
                        continue;
                    }
                },
                Some(envelope) = follow_ups.recv() => envelope,
                Some(respond_to) = snapshots.recv() => {
                    let _ = respond_to.send(entity.clone());
                    continue;
                }
                Some(()) = in_flight.next(), if !in_flight.is_empty() => continue,
            };

            match envelope {
                Envelope::Call(request) => {
                    debug!(entity_type, %key, ?request, "Call");
                    if let Turn::Suspended(continuation) = entity.handle(request, &activation) {
                        in_flight.push(continuation);
                    }
                }
                Envelope::Stop => {
                    debug!(entity_type, %key, "Stop requested");
                    self.receiver.close();
                }
            }
        }

        info!(entity_type, %key, "Deactivated");
    }

    async fn load(&self) -> Result<E, StorageError> {
        let payload = self.store.read(E::KIND, &self.key.to_string()).await?;
        match payload {
            Some(payload) => serde_json::from_str(&payload)
                .map_err(|e| StorageError::Serialization(e.to_string())),
            None => Ok(E::default()),
        }
    }

    /// One physical write: snapshot the state through the host loop, then store it.
    ///
    /// Snapshots travel on their own channel, so buffered calls drained after a stop
    /// still persist.
    fn coalescer(&self, snapshots: mpsc::UnboundedSender<oneshot::Sender<E>>) -> WriteCoalescer {
        let store = self.store.clone();
        let key = self.key.to_string();

        WriteCoalescer::new(move || {
            let snapshots = snapshots.clone();
            let store = store.clone();
            let key = key.clone();
            async move {
                let (respond_to, response) = oneshot::channel();
                snapshots
                    .send(respond_to)
                    .map_err(|_| StorageError::Detached)?;
                let snapshot = response.await.map_err(|_| StorageError::Detached)?;
                let payload = serde_json::to_string(&snapshot)
                    .map_err(|e| StorageError::Serialization(e.to_string()))?;
                store.write(E::KIND, &key, payload).await
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::error::FrameworkError;
    use crate::framework::message::Response;
    use crate::framework::storage::MemoryStore;
    use serde::{Deserialize, Serialize};
    use thiserror::Error;

    #[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
    struct Counter {
        value: u32,
    }

    #[derive(Debug, Error)]
    enum CounterError {
        #[error(transparent)]
        Framework(#[from] FrameworkError),
        #[error(transparent)]
        Storage(#[from] StorageError),
    }

    #[derive(Debug)]
    enum CounterRequest {
        Increment(Response<u32, CounterError>),
        Read(Response<u32, CounterError>),
        /// Waits for `release`, then increments through a follow-up turn.
        IncrementLater {
            release: oneshot::Receiver<()>,
            respond_to: Response<u32, CounterError>,
        },
    }

    impl ActorEntity for Counter {
        type Key = String;
        type Request = CounterRequest;
        type Context = ();
        const KIND: &'static str = "counter";

        fn handle(&mut self, request: CounterRequest, cx: &Activation<Self>) -> Turn {
            match request {
                CounterRequest::Increment(respond_to) => {
                    self.value += 1;
                    cx.persist_and_reply(respond_to, self.value)
                }
                CounterRequest::Read(respond_to) => Turn::reply(respond_to, Ok(self.value)),
                CounterRequest::IncrementLater {
                    release,
                    respond_to,
                } => {
                    let this = cx.this();
                    Turn::reply_with(respond_to, async move {
                        let _ = release.await;
                        this.call(CounterRequest::Increment).await
                    })
                }
            }
        }
    }

    fn spawn(store: Arc<MemoryStore>) -> EntityRef<Counter> {
        let (actor, handle) = EntityActor::<Counter>::new("c1".to_string(), store, 8);
        tokio::spawn(actor.run(()));
        handle
    }

    #[tokio::test]
    async fn test_state_is_persisted_and_reloaded() {
        let store = Arc::new(MemoryStore::new());
        let counter = spawn(store.clone());

        counter.call(CounterRequest::Increment).await.unwrap();
        let value: u32 = counter.call(CounterRequest::Increment).await.unwrap();
        assert_eq!(value, 2);
        assert_eq!(
            store.snapshot::<Counter>(&"c1".to_string()),
            Some(Counter { value: 2 })
        );

        counter.stop().await;
        let reactivated = spawn(store);
        let value: u32 = reactivated.call(CounterRequest::Read).await.unwrap();
        assert_eq!(value, 2);
    }

    #[tokio::test]
    async fn test_suspended_call_does_not_block_mailbox() {
        let counter = spawn(Arc::new(MemoryStore::new()));
        let (release, released) = oneshot::channel();

        let later = {
            let counter = counter.clone();
            tokio::spawn(async move {
                counter
                    .call(|respond_to| CounterRequest::IncrementLater {
                        release: released,
                        respond_to,
                    })
                    .await
            })
        };

        // served while the earlier call is parked
        let value: u32 = counter.call(CounterRequest::Increment).await.unwrap();
        assert_eq!(value, 1);

        release.send(()).unwrap();
        assert_eq!(later.await.unwrap().unwrap(), 2);
    }

    #[tokio::test]
    async fn test_suspended_call_completes_after_stop() {
        let store = Arc::new(MemoryStore::new());
        let counter = spawn(store.clone());
        let (release, released) = oneshot::channel();

        let later = {
            let counter = counter.clone();
            tokio::spawn(async move {
                counter
                    .call(|respond_to| CounterRequest::IncrementLater {
                        release: released,
                        respond_to,
                    })
                    .await
            })
        };
        // the parked call is ahead of this read in the mailbox
        tokio::task::yield_now().await;
        let value: u32 = counter.call(CounterRequest::Read).await.unwrap();
        assert_eq!(value, 0);

        counter.stop().await;
        while !counter.is_closed() {
            tokio::task::yield_now().await;
        }
        release.send(()).unwrap();

        let value: u32 = later.await.unwrap().unwrap();
        assert_eq!(value, 1);
        assert_eq!(
            store.snapshot::<Counter>(&"c1".to_string()),
            Some(Counter { value: 1 })
        );
    }

    #[tokio::test]
    async fn test_calls_fail_after_stop() {
        let counter = spawn(Arc::new(MemoryStore::new()));
        counter.call(CounterRequest::Increment).await.unwrap();

        counter.stop().await;
        while !counter.is_closed() {
            tokio::task::yield_now().await;
        }
        let result: Result<u32, CounterError> = counter.call(CounterRequest::Read).await;
        assert!(matches!(
            result,
            Err(CounterError::Framework(
                FrameworkError::ActorClosed | FrameworkError::ActorDropped
            ))
        ));
    }

    #[tokio::test]
    async fn test_activation_failure_closes_mailbox() {
        let store = Arc::new(MemoryStore::new());
        store.fail_next_reads(1);
        let counter = spawn(store);

        let result: Result<u32, CounterError> = counter.call(CounterRequest::Read).await;
        assert!(result.is_err());
    }
}
