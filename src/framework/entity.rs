//! # ActorEntity Trait
//!
//! The `ActorEntity` trait is the contract every addressable entity (Account, Post, …)
//! implements to be hosted by an [`EntityActor`](crate::framework::EntityActor).
//!
//! # Architecture Note
//! The entity type *is* its persisted state: it is `Clone + Default + Serialize +
//! DeserializeOwned`, so the host can load it on activation and snapshot it for every write.
//!
//! Handling is split in two:
//! 1. [`ActorEntity::handle`] runs **synchronously** with exclusive `&mut` access.
//!    This is where the entity reads and mutates its state.
//! 2. It may return a [`Turn::Suspended`] future. That future is `'static`: it cannot
//!    touch the state. It awaits peers and storage, and when it needs the state again
//!    it sends a new request to its own mailbox.
//!
//! While a continuation is suspended the host keeps serving the mailbox, which is
//! what makes an entity reentrant.

use crate::framework::activation::Activation;
use crate::framework::message::Response;
use futures::future::BoxFuture;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::{Debug, Display};
use std::future::Future;
use std::hash::Hash;

/// Trait that any entity must implement to be hosted by `EntityActor`.
pub trait ActorEntity:
    Clone + Default + Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// The key that addresses one instance (username, post id, …).
    type Key: Eq + Hash + Clone + Send + Sync + Display + Debug + 'static;

    /// Enum of every call this entity accepts. Each variant carries its own reply channel.
    type Request: Send + Debug + 'static;

    /// The runtime context (dependencies) injected into the activation.
    /// Use `()` if no dependencies are needed.
    type Context: Clone + Send + Sync + 'static;

    /// Storage namespace for this entity kind.
    const KIND: &'static str;

    /// Run the synchronous portion of one call.
    fn handle(&mut self, request: Self::Request, cx: &Activation<Self>) -> Turn;
}

/// Outcome of the synchronous portion of a call.
pub enum Turn {
    /// The call already replied.
    Complete,
    /// The call continues in a future the host polls alongside its mailbox.
    Suspended(BoxFuture<'static, ()>),
}

impl Turn {
    pub fn suspend(continuation: impl Future<Output = ()> + Send + 'static) -> Self {
        Turn::Suspended(Box::pin(continuation))
    }

    /// Reply right away.
    pub fn reply<T, E>(respond_to: Response<T, E>, result: Result<T, E>) -> Self {
        let _ = respond_to.send(result);
        Turn::Complete
    }

    /// Reply with whatever `work` resolves to.
    pub fn reply_with<T, E, F>(respond_to: Response<T, E>, work: F) -> Self
    where
        T: Send + 'static,
        E: Send + 'static,
        F: Future<Output = Result<T, E>> + Send + 'static,
    {
        Turn::suspend(async move {
            let _ = respond_to.send(work.await);
        })
    }
}
