//! Pure data structures. [`Account`] and [`Post`] are the persisted states hosted by
//! the framework (see [`ActorEntity`](crate::framework::ActorEntity)).

pub mod account;
pub mod post;
pub mod tags;

pub use account::*;
pub use post::*;
pub use tags::extract_tags;
