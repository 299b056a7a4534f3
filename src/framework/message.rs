//! # Generic Messages
//!
//! This module defines what travels through an activation's mailbox.

use crate::framework::entity::ActorEntity;
use tokio::sync::oneshot;

/// Type alias for the one-shot reply channel carried by every request.
pub type Response<T, E> = oneshot::Sender<Result<T, E>>;

/// Internal message type delivered to an `EntityActor`.
///
/// - **Call**: a domain request, handled by [`ActorEntity::handle`].
/// - **Stop**: close the mailbox, drain it and exit once continuations finish.
pub enum Envelope<E: ActorEntity> {
    Call(E::Request),
    Stop,
}
