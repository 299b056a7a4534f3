//! # Activation Registry
//!
//! Keyed directory of live activations for one entity kind. The first lookup of a key
//! spawns its [`EntityActor`]; later lookups return the same handle. Entities are never
//! explicitly created or destroyed through the registry.

use crate::framework::actor::EntityActor;
use crate::framework::client::EntityRef;
use crate::framework::entity::ActorEntity;
use crate::framework::error::FrameworkError;
use crate::framework::storage::StateStore;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::task::JoinHandle;
use tracing::{debug, info};

struct Live<E: ActorEntity> {
    handle: EntityRef<E>,
    task: JoinHandle<()>,
}

struct Activations<E: ActorEntity> {
    live: HashMap<E::Key, Live<E>>,
    closed: bool,
}

/// Lazily activates one `EntityActor` per key.
pub struct Registry<E: ActorEntity> {
    activations: Mutex<Activations<E>>,
    store: Arc<dyn StateStore>,
    mailbox_capacity: usize,
}

impl<E: ActorEntity> Registry<E> {
    pub fn new(store: Arc<dyn StateStore>, mailbox_capacity: usize) -> Self {
        Self {
            activations: Mutex::new(Activations {
                live: HashMap::new(),
                closed: false,
            }),
            store,
            mailbox_capacity,
        }
    }

    /// Return the handle for `key`, activating it with `context` if needed.
    ///
    /// An activation whose mailbox closed (failed load) is replaced, and its task handle
    /// dropped with it.
    pub fn resolve(&self, key: &E::Key, context: E::Context) -> Result<EntityRef<E>, FrameworkError> {
        let mut activations = self.lock();
        if activations.closed {
            return Err(FrameworkError::DirectoryClosed);
        }
        if let Some(live) = activations.live.get(key) {
            if !live.handle.is_closed() {
                return Ok(live.handle.clone());
            }
        }

        let (actor, handle) = EntityActor::<E>::new(key.clone(), self.store.clone(), self.mailbox_capacity);
        let task = tokio::spawn(actor.run(context));
        let replaced = activations.live.insert(
            key.clone(),
            Live {
                handle: handle.clone(),
                task,
            },
        );
        debug!(
            entity_type = E::KIND,
            %key,
            replaced = replaced.is_some(),
            active = activations.live.len(),
            "Activation registered"
        );
        Ok(handle)
    }

    pub fn active_count(&self) -> usize {
        self.lock().live.len()
    }

    /// Stop every activation and wait for their tasks.
    ///
    /// Lookups fail with [`FrameworkError::DirectoryClosed`] from here on.
    pub async fn shutdown(&self) -> Result<(), FrameworkError> {
        let live = {
            let mut activations = self.lock();
            activations.closed = true;
            std::mem::take(&mut activations.live)
        };
        info!(entity_type = E::KIND, active = live.len(), "Stopping activations");

        for activation in live.values() {
            activation.handle.stop().await;
        }

        for Live { handle, task } in live.into_values() {
            drop(handle);
            task.await
                .map_err(|e| FrameworkError::TaskFailed(e.to_string()))?;
        }
        Ok(())
    }

    fn lock(&self) -> MutexGuard<'_, Activations<E>> {
        self.activations.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
