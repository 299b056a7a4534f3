use crate::account_actor::AccountError;
use crate::clients::{AccountClient, Directory, PostClient};
use crate::framework::{FrameworkError, MemoryStore, StateStore};
use crate::lifecycle::{ActorDirectory, SystemConfig};
use crate::model::{PostId, PostSummary};
use crate::post_actor::PostError;
use futures::future::try_join_all;
use std::sync::Arc;
use tracing::{info, instrument};

/// Entry point used by an edge layer (HTTP handlers, the demo binary, tests).
///
/// `SocialSystem` is responsible for:
/// - **Wiring**: building the [`ActorDirectory`] over a state store
/// - **Lookup**: handing out account and post clients by key
/// - **Read models**: assembling [`PostSummary`] listings for feeds
/// - **Lifecycle**: stopping every activation on [`shutdown`](Self::shutdown)
///
/// # Example
///
/// ```ignore
/// let system = SocialSystem::new();
///
/// system.account("bob")?.follow_user("alice").await?;
/// let post_id = system.account("alice")?.publish_post("hello #go").await?;
/// let feed = system.received_feed("bob", 10, 0).await?;
///
/// system.shutdown().await?;
/// ```
pub struct SocialSystem {
    directory: Arc<ActorDirectory>,
}

impl SocialSystem {
    /// In-memory system configured from the environment.
    pub fn new() -> Self {
        Self::with_store(Arc::new(MemoryStore::new()), SystemConfig::from_env())
    }

    pub fn with_store(store: Arc<dyn StateStore>, config: SystemConfig) -> Self {
        info!(?config, "Starting social system");
        Self {
            directory: ActorDirectory::new(store, config),
        }
    }

    pub fn account(&self, username: &str) -> Result<AccountClient, FrameworkError> {
        self.directory.account(username)
    }

    pub fn post(&self, id: PostId) -> Result<PostClient, FrameworkError> {
        self.directory.post(id)
    }

    /// Content, counters and whether `viewer` liked the post.
    #[instrument(skip(self))]
    pub async fn post_summary(&self, post_id: PostId, viewer: &str) -> Result<PostSummary, PostError> {
        let post = self.post(post_id)?;
        let (view, likes, comments) =
            tokio::try_join!(post.get_post(), post.get_likes(), post.get_comments())?;

        Ok(PostSummary {
            id: post_id,
            content: view.content,
            timestamp: view.timestamp,
            author: view.author,
            comment_count: comments.len(),
            like_count: likes.len(),
            liked_by_viewer: likes.contains(viewer),
        })
    }

    /// A window of `owner`'s published posts, as seen by `viewer`.
    #[instrument(skip(self))]
    pub async fn published_feed(
        &self,
        owner: &str,
        viewer: &str,
        count: i32,
        start: i32,
    ) -> Result<Vec<PostSummary>, AccountError> {
        let ids = self.account(owner)?.get_published_posts(count, start).await?;
        self.summaries(ids, viewer).await
    }

    /// A window of the posts `owner` received from accounts it follows.
    #[instrument(skip(self))]
    pub async fn received_feed(
        &self,
        owner: &str,
        count: i32,
        start: i32,
    ) -> Result<Vec<PostSummary>, AccountError> {
        let ids = self.account(owner)?.get_received_posts(count, start).await?;
        self.summaries(ids, owner).await
    }

    async fn summaries(
        &self,
        ids: Vec<PostId>,
        viewer: &str,
    ) -> Result<Vec<PostSummary>, AccountError> {
        let summaries = try_join_all(ids.into_iter().map(|id| self.post_summary(id, viewer))).await?;
        Ok(summaries)
    }

    /// Stops every activation and waits for them to exit.
    ///
    /// Calls made afterwards fail with [`FrameworkError::ActorClosed`] or
    /// [`FrameworkError::DirectoryClosed`].
    pub async fn shutdown(&self) -> Result<(), FrameworkError> {
        info!("Shutting down system...");
        self.directory.shutdown().await?;
        info!("System shutdown complete.");
        Ok(())
    }
}

impl Default for SocialSystem {
    fn default() -> Self {
        Self::new()
    }
}
