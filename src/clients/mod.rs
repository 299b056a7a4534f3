//! Type-safe wrappers around [`EntityRef`](crate::framework::EntityRef), and the
//! [`Directory`] that hands them out.

pub mod account_client;
pub mod actor_client;
pub mod directory;
pub mod post_client;

pub use account_client::*;
pub use actor_client::*;
pub use directory::*;
pub use post_client::*;
