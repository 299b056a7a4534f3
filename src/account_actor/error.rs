//! Error types for the Account actor.

use crate::framework::{FrameworkError, StorageError};
use crate::post_actor::PostError;
use thiserror::Error;

/// Errors that can occur during account operations.
///
/// Failures of peer accounts are returned unchanged, so a failed `add_follower` on the
/// target surfaces to the caller of `follow_user` as the target's own error.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AccountError {
    /// An account cannot follow itself.
    #[error("Account cannot follow itself")]
    SelfFollow,

    /// Creating the post entity failed.
    #[error("Post error: {0}")]
    Post(#[from] PostError),

    /// Persisting the account failed.
    #[error("Account storage error: {0}")]
    Storage(#[from] StorageError),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunication(#[from] FrameworkError),
}
