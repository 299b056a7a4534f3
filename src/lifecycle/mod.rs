//! Runtime orchestration and lifecycle management.
//!
//! # Main Components
//!
//! - [`SocialSystem`] - The facade that wires the directory and assembles feeds
//! - [`ActorDirectory`] - Production directory over one registry per entity kind
//! - [`SystemConfig`] - Runtime settings, overridable from the environment
//! - [`setup_tracing`] - Initializes the tracing/logging infrastructure

pub mod config;
pub mod directory;
pub mod social_system;
pub mod tracing;

pub use config::*;
pub use directory::*;
pub use social_system::*;
pub use self::tracing::setup_tracing;
