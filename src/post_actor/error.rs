//! Error types for the Post actor.

use crate::framework::{FrameworkError, StorageError};
use crate::model::PostId;
use thiserror::Error;

/// Errors that can occur during post operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PostError {
    /// The post was never created.
    #[error("Post not found: {0}")]
    NotFound(PostId),

    /// Persisting the post failed.
    #[error("Post storage error: {0}")]
    Storage(#[from] StorageError),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunication(#[from] FrameworkError),
}
