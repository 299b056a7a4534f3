//! # Activation
//!
//! What a running entity sees of its host while handling a call.

use crate::framework::client::EntityRef;
use crate::framework::coalescer::{WriteCoalescer, WriteResult};
use crate::framework::entity::{ActorEntity, Turn};
use crate::framework::error::StorageError;
use crate::framework::message::{Envelope, Response};
use std::future::Future;
use tokio::sync::mpsc;

/// Per-activation services handed to [`ActorEntity::handle`].
pub struct Activation<E: ActorEntity> {
    key: E::Key,
    context: E::Context,
    coalescer: WriteCoalescer,
    follow_ups: mpsc::Sender<Envelope<E>>,
}

impl<E: ActorEntity> Activation<E> {
    pub(crate) fn new(
        key: E::Key,
        context: E::Context,
        coalescer: WriteCoalescer,
        follow_ups: mpsc::Sender<Envelope<E>>,
    ) -> Self {
        Self {
            key,
            context,
            coalescer,
            follow_ups,
        }
    }

    pub fn key(&self) -> &E::Key {
        &self.key
    }

    pub fn context(&self) -> &E::Context {
        &self.context
    }

    /// A handle to this activation, used by continuations to run a follow-up turn.
    ///
    /// Calls made through it bypass the mailbox, so they are still served after a stop
    /// for as long as the continuation that sent them is running.
    pub fn this(&self) -> EntityRef<E> {
        EntityRef::new(self.key.clone(), self.follow_ups.clone())
    }

    /// Persist the current state through the coalescer.
    pub fn persist(&self) -> impl Future<Output = WriteResult> + Send + 'static {
        self.coalescer.persist()
    }

    /// Persist, then reply `value` (or the write failure) to the caller.
    pub fn persist_and_reply<T, Err>(&self, respond_to: Response<T, Err>, value: T) -> Turn
    where
        T: Send + 'static,
        Err: From<StorageError> + Send + 'static,
    {
        let persist = self.persist();
        Turn::reply_with(respond_to, async move {
            persist.await?;
            Ok(value)
        })
    }
}
