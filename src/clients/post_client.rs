use crate::clients::actor_client::ActorClient;
use crate::framework::EntityRef;
use crate::model::{Comment, CommentId, Post, PostId, PostView};
use crate::post_actor::{PostError, PostRequest};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::BTreeSet;
use tracing::{debug, instrument};

/// Client for interacting with one Post activation.
#[derive(Clone)]
pub struct PostClient {
    inner: EntityRef<Post>,
}

impl PostClient {
    pub fn new(inner: EntityRef<Post>) -> Self {
        Self { inner }
    }

    pub fn id(&self) -> PostId {
        *self.inner.key()
    }

    #[instrument(skip(self, content), fields(post_id = %self.id()))]
    pub async fn create_post(
        &self,
        content: String,
        author: String,
        timestamp: DateTime<Utc>,
    ) -> Result<(), PostError> {
        debug!(?content, "create_post called");
        self.inner
            .call(|respond_to| PostRequest::Create {
                content,
                author,
                timestamp,
                respond_to,
            })
            .await
    }

    #[instrument(skip(self), fields(post_id = %self.id()))]
    pub async fn get_post(&self) -> Result<PostView, PostError> {
        self.inner.call(PostRequest::Get).await
    }

    #[instrument(skip(self), fields(post_id = %self.id()))]
    pub async fn like(&self, username: &str) -> Result<(), PostError> {
        debug!("Sending request");
        let username = username.to_string();
        self.inner
            .call(|respond_to| PostRequest::Like {
                username,
                respond_to,
            })
            .await
    }

    #[instrument(skip(self), fields(post_id = %self.id()))]
    pub async fn unlike(&self, username: &str) -> Result<(), PostError> {
        debug!("Sending request");
        let username = username.to_string();
        self.inner
            .call(|respond_to| PostRequest::Unlike {
                username,
                respond_to,
            })
            .await
    }

    #[instrument(skip(self), fields(post_id = %self.id()))]
    pub async fn get_likes(&self) -> Result<BTreeSet<String>, PostError> {
        self.inner.call(PostRequest::GetLikes).await
    }

    /// Append a comment. Returns its id.
    #[instrument(skip(self, text), fields(post_id = %self.id()))]
    pub async fn comment(&self, author: &str, text: &str) -> Result<CommentId, PostError> {
        debug!("Sending request");
        let author = author.to_string();
        let text = text.to_string();
        self.inner
            .call(|respond_to| PostRequest::Comment {
                author,
                text,
                respond_to,
            })
            .await
    }

    #[instrument(skip(self), fields(post_id = %self.id()))]
    pub async fn delete_comment(&self, id: CommentId) -> Result<(), PostError> {
        debug!("Sending request");
        self.inner
            .call(|respond_to| PostRequest::DeleteComment { id, respond_to })
            .await
    }

    #[instrument(skip(self), fields(post_id = %self.id()))]
    pub async fn get_comments(&self) -> Result<Vec<Comment>, PostError> {
        self.inner.call(PostRequest::GetComments).await
    }
}

#[async_trait]
impl ActorClient<Post> for PostClient {
    fn inner(&self) -> &EntityRef<Post> {
        &self.inner
    }
}
