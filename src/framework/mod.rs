//! Generic hosting runtime for keyed, reentrant entities.
//!
//! This module provides the building blocks every entity kind is hosted with: the
//! per-instance mailbox loop, handles, lazy activation by key, and single-flight
//! persistence.
//!
//! # Main Components
//!
//! - [`ActorEntity`] - Trait that entity types implement to be hosted
//! - [`EntityActor`] - The task that owns one activation and its mailbox
//! - [`EntityRef`] - Cloneable handle with a generic request/reply `call`
//! - [`Activation`] - Key, context, self handle and persistence seen by a running entity
//! - [`WriteCoalescer`] - At most one physical write in flight per activation
//! - [`Registry`] - Activates one `EntityActor` per key on first lookup
//! - [`StateStore`] / [`MemoryStore`] - The storage collaborator
//! - [`FrameworkError`] / [`StorageError`] - Common error types
//!
//! # Testing
//!
//! See [`mock`] for handles backed by a test-controlled mailbox.

pub mod activation;
pub mod actor;
pub mod client;
pub mod coalescer;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod registry;
pub mod storage;

// Re-export core types for convenience
pub use activation::Activation;
pub use actor::EntityActor;
pub use client::EntityRef;
pub use coalescer::{WriteCoalescer, WriteResult};
pub use entity::{ActorEntity, Turn};
pub use error::{FrameworkError, StorageError};
pub use message::{Envelope, Response};
pub use registry::Registry;
pub use storage::{MemoryStore, StateStore};
