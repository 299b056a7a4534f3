//! # Social Feed
//!
//! > **A social-feed backend built from keyed, reentrant actors.**
//!
//! Every user account and every post is an independently addressable entity that owns its
//! state, serializes its own mutations and talks to other entities only through
//! asynchronous request/reply calls.
//!
//! ## Core Concepts
//!
//! ### Lazy activation
//! Entities are never created explicitly. The first lookup of a username or post id
//! through the [`Directory`](clients::Directory) activates it: its state is loaded from
//! the [`StateStore`](framework::StateStore) (or defaulted) before the first call runs.
//!
//! ### Reentrancy
//! An account following another must wait for the peer to record it as a follower. While
//! it waits, the account keeps serving its mailbox, so two accounts following each other
//! at the same moment both complete. A handler mutates state only in its synchronous step;
//! changes after an await are sent back to the entity as a new call.
//!
//! ### Write coalescing
//! Every mutation persists before it replies. At most one physical write per entity is in
//! flight, and a burst of mutations collapses onto a single follow-up write. See
//! [`framework::coalescer`].
//!
//! ## Module Tour
//!
//! ### 1. The Engine ([`framework`])
//! The generic host: [`EntityActor`](framework::EntityActor), [`Registry`](framework::Registry),
//! [`WriteCoalescer`](framework::WriteCoalescer), and the [`ActorEntity`](framework::ActorEntity)
//! trait entities implement.
//!
//! ### 2. The Data ([`model`])
//! [`Account`](model::Account) with its bounded recency caches, [`Post`](model::Post) with
//! likes and comments, and [`extract_tags`](model::extract_tags).
//!
//! ### 3. The Behaviour ([`account_actor`], [`post_actor`])
//! Request enums, error types and the `ActorEntity` implementations: follow-graph
//! maintenance and the publish fan-out live in [`account_actor`].
//!
//! ### 4. The Interface ([`clients`])
//! [`AccountClient`](clients::AccountClient) and [`PostClient`](clients::PostClient) wrap the
//! generic handle with one method per call.
//!
//! ### 5. The Orchestrator ([`lifecycle`])
//! [`SocialSystem`](lifecycle::SocialSystem) wires everything over a store, assembles feeds
//! and shuts the system down.
//!
//! ## Running
//!
//! ```bash
//! RUST_LOG=info cargo run
//! cargo test
//! ```

pub mod account_actor;
pub mod clients;
pub mod framework;
pub mod lifecycle;
pub mod model;
pub mod post_actor;
