use crate::account_actor::{AccountError, AccountRequest};
use crate::clients::actor_client::ActorClient;
use crate::framework::EntityRef;
use crate::model::{Account, PostId};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with one Account activation.
#[derive(Clone)]
pub struct AccountClient {
    inner: EntityRef<Account>,
}

impl AccountClient {
    pub fn new(inner: EntityRef<Account>) -> Self {
        Self { inner }
    }

    pub fn username(&self) -> &str {
        self.inner.key()
    }

    /// Follow `target`. The target records the follower first; on failure nothing changes here.
    #[instrument(skip(self), fields(username = %self.username()))]
    pub async fn follow_user(&self, target: &str) -> Result<(), AccountError> {
        debug!("Sending request");
        let target = target.to_string();
        self.inner
            .call(|respond_to| AccountRequest::FollowUser { target, respond_to })
            .await
    }

    #[instrument(skip(self), fields(username = %self.username()))]
    pub async fn unfollow_user(&self, target: &str) -> Result<(), AccountError> {
        debug!("Sending request");
        let target = target.to_string();
        self.inner
            .call(|respond_to| AccountRequest::UnfollowUser { target, respond_to })
            .await
    }

    #[instrument(skip(self), fields(username = %self.username()))]
    pub async fn get_following_list(&self) -> Result<Vec<String>, AccountError> {
        self.inner.call(AccountRequest::GetFollowingList).await
    }

    #[instrument(skip(self), fields(username = %self.username()))]
    pub async fn get_followers_list(&self) -> Result<Vec<String>, AccountError> {
        self.inner.call(AccountRequest::GetFollowersList).await
    }

    /// Publish a post and notify every follower. Returns the new post's id.
    #[instrument(skip(self, text), fields(username = %self.username()))]
    pub async fn publish_post(&self, text: impl Into<String>) -> Result<PostId, AccountError> {
        let text = text.into();
        debug!(?text, "publish_post called");
        self.inner
            .call(|respond_to| AccountRequest::PublishPost { text, respond_to })
            .await
    }

    #[instrument(skip(self), fields(username = %self.username()))]
    pub async fn get_published_posts(
        &self,
        count: i32,
        start: i32,
    ) -> Result<Vec<PostId>, AccountError> {
        self.inner
            .call(|respond_to| AccountRequest::GetPublishedPosts {
                count,
                start,
                respond_to,
            })
            .await
    }

    #[instrument(skip(self), fields(username = %self.username()))]
    pub async fn get_received_posts(
        &self,
        count: i32,
        start: i32,
    ) -> Result<Vec<PostId>, AccountError> {
        self.inner
            .call(|respond_to| AccountRequest::GetReceivedPosts {
                count,
                start,
                respond_to,
            })
            .await
    }

    /// Peer call: `username` started following this account.
    #[instrument(skip(self), fields(username = %self.username()))]
    pub async fn add_follower(&self, follower: &str) -> Result<(), AccountError> {
        debug!("Sending request");
        let username = follower.to_string();
        self.inner
            .call(|respond_to| AccountRequest::AddFollower {
                username,
                respond_to,
            })
            .await
    }

    /// Peer call: `username` stopped following this account.
    #[instrument(skip(self), fields(username = %self.username()))]
    pub async fn remove_follower(&self, follower: &str) -> Result<(), AccountError> {
        debug!("Sending request");
        let username = follower.to_string();
        self.inner
            .call(|respond_to| AccountRequest::RemoveFollower {
                username,
                respond_to,
            })
            .await
    }

    /// Peer call: a followed account published `post_id`.
    #[instrument(skip(self), fields(username = %self.username()))]
    pub async fn notify_new_post(&self, post_id: PostId) -> Result<(), AccountError> {
        self.inner
            .call(|respond_to| AccountRequest::NotifyNewPost {
                post_id,
                respond_to,
            })
            .await
    }
}

#[async_trait]
impl ActorClient<Account> for AccountClient {
    fn inner(&self) -> &EntityRef<Account> {
        &self.inner
    }
}
