use crate::framework::{ActorEntity, EntityRef};
use async_trait::async_trait;

/// Operations every domain client shares, whatever entity it addresses.
#[async_trait]
pub trait ActorClient<E: ActorEntity>: Send + Sync {
    /// Access the inner generic handle.
    fn inner(&self) -> &EntityRef<E>;

    /// The key of the addressed entity.
    fn key(&self) -> &E::Key {
        self.inner().key()
    }

    /// True once the addressed activation stopped accepting calls.
    fn is_closed(&self) -> bool {
        self.inner().is_closed()
    }

    /// Ask the activation to stop after draining its mailbox.
    #[tracing::instrument(skip(self), fields(key = %self.key()))]
    async fn stop(&self) {
        tracing::debug!("Sending stop");
        self.inner().stop().await;
    }
}
