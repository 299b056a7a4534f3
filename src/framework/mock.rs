//! # Mocking Utilities
//!
//! Testing an entity that calls peers is easiest when the peers are not real actors.
//! [`create_mock_ref`] returns a handle whose mailbox the test owns: the test reads the
//! requests the entity under test sends and answers them through the reply channel each
//! request carries. Error injection is just replying `Err(..)`.
//!
//! ```rust,ignore
//! let (bob, mut bob_mailbox) = create_mock_ref::<Account>("bob".to_string(), 8);
//! directory.insert(AccountClient::new(bob));
//!
//! match expect_call(&mut bob_mailbox).await {
//!     Some(AccountRequest::AddFollower { username, respond_to }) => {
//!         assert_eq!(username, "alice");
//!         respond_to.send(Ok(())).unwrap();
//!     }
//!     other => panic!("unexpected request: {other:?}"),
//! }
//! ```

use crate::framework::client::EntityRef;
use crate::framework::entity::ActorEntity;
use crate::framework::message::Envelope;
use tokio::sync::mpsc;

/// Creates a handle backed by a mailbox the caller controls.
pub fn create_mock_ref<E: ActorEntity>(
    key: E::Key,
    buffer_size: usize,
) -> (EntityRef<E>, mpsc::Receiver<Envelope<E>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (EntityRef::new(key, sender), receiver)
}

/// Waits for the next call on a mock mailbox, skipping stop messages.
///
/// Returns `None` once every handle to the mailbox is gone.
pub async fn expect_call<E: ActorEntity>(
    receiver: &mut mpsc::Receiver<Envelope<E>>,
) -> Option<E::Request> {
    while let Some(envelope) = receiver.recv().await {
        if let Envelope::Call(request) = envelope {
            return Some(request);
        }
    }
    None
}
