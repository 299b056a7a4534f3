//! # Observability & Tracing
//!
//! The [`setup_tracing`] function initializes structured logging with the `tracing` crate.
//!
//! ## Configuration
//!
//! Log levels come from `RUST_LOG`. The output uses a compact format without module
//! paths (`with_target(false)`); every event from the host loop carries `entity_type`
//! and `key` fields instead.
//!
//! ```bash
//! # Activations, publishes, shutdown
//! RUST_LOG=info cargo run
//!
//! # Every call, write and fan-out, with payloads
//! RUST_LOG=debug cargo run
//!
//! # Only the hosting runtime
//! RUST_LOG=social_feed::framework=debug cargo run
//! ```
//!
//! ## What Gets Traced
//!
//! - **Activation lifecycle**: `Activated`, `Stop requested`, `Deactivated`, `Activation failed`
//! - **Calls**: one `Call` event per request with its `Debug` payload
//! - **Persistence**: `Write started` with its generation, writes queued behind it, `Stored`
//! - **Client spans**: every client method is `#[instrument]`ed with the entity key
//!
//! A publish with two followers at `RUST_LOG=debug` reads:
//!
//! ```text
//! DEBUG publish_post{username="alice"}: publish_post called text="hello #go #systems"
//! DEBUG Call entity_type="account" key=alice request=PublishPost { .. }
//! INFO  Activated entity_type="post" key=5b0c..
//! DEBUG Write started generation=1
//! DEBUG Fanning out author=alice post_id=5b0c.. followers=2
//! INFO  Published author=alice post_id=5b0c.. followers=2
//! ```
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // entity_type/key fields identify the source
        .compact()
        .init();
}
