//! # Generic Handle
//!
//! This module defines the generic handle used to call an activation.

use crate::framework::entity::ActorEntity;
use crate::framework::error::FrameworkError;
use crate::framework::message::{Envelope, Response};
use tokio::sync::{mpsc, oneshot};

/// A type-safe handle to one activation of `E`.
///
/// Holds the entity key and the sending half of its mailbox, so cloning is cheap.
/// Domain clients (`AccountClient`, `PostClient`) wrap it and expose one method per call.
pub struct EntityRef<E: ActorEntity> {
    key: E::Key,
    sender: mpsc::Sender<Envelope<E>>,
}

impl<E: ActorEntity> Clone for EntityRef<E> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            sender: self.sender.clone(),
        }
    }
}

impl<E: ActorEntity> EntityRef<E> {
    pub fn new(key: E::Key, sender: mpsc::Sender<Envelope<E>>) -> Self {
        Self { key, sender }
    }

    pub fn key(&self) -> &E::Key {
        &self.key
    }

    /// True once the activation stopped accepting calls.
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }

    /// Send a request built around a fresh reply channel and wait for the reply.
    pub async fn call<T, Err>(
        &self,
        request: impl FnOnce(Response<T, Err>) -> E::Request,
    ) -> Result<T, Err>
    where
        Err: From<FrameworkError>,
    {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(Envelope::Call(request(respond_to)))
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    /// Ask the activation to stop. Does nothing if it already stopped.
    pub async fn stop(&self) {
        let _ = self.sender.send(Envelope::Stop).await;
    }
}
