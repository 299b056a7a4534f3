//! # Framework Errors
//!
//! This module defines the error types shared by every actor hosted by the framework.
//! Actor-specific error enums wrap these with `#[from]` so a failure in the plumbing
//! (closed mailbox, failed write) travels to the caller without being flattened to a string.

use thiserror::Error;

/// Errors raised by the hosting runtime itself.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FrameworkError {
    /// The target activation no longer accepts calls.
    #[error("Actor closed")]
    ActorClosed,

    /// The activation went away before answering.
    #[error("Actor dropped response channel")]
    ActorDropped,

    /// The directory was shut down; no new activations are handed out.
    #[error("Directory closed")]
    DirectoryClosed,

    /// An activation task panicked or was aborted.
    #[error("Actor task failed: {0}")]
    TaskFailed(String),
}

/// Errors raised by the state store or by the persistence path leading to it.
///
/// `Clone` is required: one physical write is shared by every caller that joined it.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StorageError {
    #[error("Write rejected for {kind}/{key}")]
    WriteRejected { kind: String, key: String },

    #[error("Read failed for {kind}/{key}")]
    ReadFailed { kind: String, key: String },

    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The write could not reach the activation to snapshot its state.
    #[error("Activation detached from its mailbox")]
    Detached,

    #[error("Write task interrupted: {0}")]
    Interrupted(String),
}
