use crate::clients::{AccountClient, Directory, PostClient};
use crate::framework::{FrameworkError, Registry, StateStore};
use crate::lifecycle::SystemConfig;
use crate::model::{Account, Post, PostId};
use std::sync::{Arc, Weak};
use tracing::info;

/// Production [`Directory`]: one [`Registry`] per entity kind over a shared store.
///
/// # Context Injection
/// Every account is activated with the same `Arc<dyn Directory>` as its context. That
/// context only holds a weak reference back here, so activations never keep the directory
/// alive; once it is dropped, peer lookups fail with [`FrameworkError::DirectoryClosed`].
pub struct ActorDirectory {
    accounts: Registry<Account>,
    posts: Registry<Post>,
    context: Arc<dyn Directory>,
}

impl ActorDirectory {
    pub fn new(store: Arc<dyn StateStore>, config: SystemConfig) -> Arc<Self> {
        Arc::new_cyclic(|this: &Weak<ActorDirectory>| Self {
            accounts: crate::account_actor::new(store.clone(), config.mailbox_capacity),
            posts: crate::post_actor::new(store, config.mailbox_capacity),
            context: Arc::new(Detached(this.clone())),
        })
    }

    /// Number of live activations, accounts and posts together.
    pub fn active_count(&self) -> usize {
        self.accounts.active_count() + self.posts.active_count()
    }

    /// Stops accounts first, so their in-flight calls can still reach posts, then posts.
    pub async fn shutdown(&self) -> Result<(), FrameworkError> {
        info!("Stopping accounts");
        self.accounts.shutdown().await?;
        info!("Stopping posts");
        self.posts.shutdown().await
    }
}

impl Directory for ActorDirectory {
    fn account(&self, username: &str) -> Result<AccountClient, FrameworkError> {
        self.accounts
            .resolve(&username.to_string(), self.context.clone())
            .map(AccountClient::new)
    }

    fn post(&self, id: PostId) -> Result<PostClient, FrameworkError> {
        self.posts.resolve(&id, ()).map(PostClient::new)
    }
}

/// The context handed to accounts.
struct Detached(Weak<ActorDirectory>);

impl Detached {
    fn upgrade(&self) -> Result<Arc<ActorDirectory>, FrameworkError> {
        self.0.upgrade().ok_or(FrameworkError::DirectoryClosed)
    }
}

impl Directory for Detached {
    fn account(&self, username: &str) -> Result<AccountClient, FrameworkError> {
        self.upgrade()?.account(username)
    }

    fn post(&self, id: PostId) -> Result<PostClient, FrameworkError> {
        self.upgrade()?.post(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::ActorClient;
    use crate::framework::MemoryStore;

    fn directory() -> Arc<ActorDirectory> {
        ActorDirectory::new(Arc::new(MemoryStore::new()), SystemConfig::default())
    }

    #[tokio::test]
    async fn test_same_key_resolves_to_same_activation() {
        let directory = directory();
        let first = directory.account("alice").unwrap();
        first.follow_user("bob").await.unwrap();

        let second = directory.account("alice").unwrap();
        assert_eq!(second.get_following_list().await.unwrap(), vec!["bob"]);
        // alice and bob
        assert_eq!(directory.active_count(), 2);
    }

    #[tokio::test]
    async fn test_lookups_fail_after_shutdown() {
        let directory = directory();
        let alice = directory.account("alice").unwrap();
        directory.shutdown().await.unwrap();

        assert!(alice.is_closed());
        assert!(matches!(
            directory.account("alice"),
            Err(FrameworkError::DirectoryClosed)
        ));
        assert!(matches!(
            directory.post(PostId::new()),
            Err(FrameworkError::DirectoryClosed)
        ));
    }

    #[tokio::test]
    async fn test_accounts_do_not_keep_directory_alive() {
        let directory = directory();
        let alice = directory.account("alice").unwrap();
        drop(directory);

        let result = alice.follow_user("bob").await;
        assert!(matches!(
            result,
            Err(crate::account_actor::AccountError::ActorCommunication(
                FrameworkError::DirectoryClosed
            ))
        ));
    }
}
