//! Post-specific request types and entity implementation.

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::framework::{Registry, StateStore};
use crate::model::Post;
use std::sync::Arc;

/// Creates the registry that activates posts on first lookup.
pub fn new(store: Arc<dyn StateStore>, mailbox_capacity: usize) -> Registry<Post> {
    Registry::new(store, mailbox_capacity)
}
