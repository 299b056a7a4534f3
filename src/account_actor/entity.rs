//! [`ActorEntity`] implementation for [`Account`].
//!
//! # Turns
//! Local calls mutate, persist and reply. Calls that involve a peer (follow, unfollow,
//! publish) return a continuation: it awaits the peer, then applies the local change by
//! sending a continuation request back to this account. A failed peer call therefore
//! leaves the local state untouched.

use crate::account_actor::{AccountError, AccountRequest};
use crate::clients::Directory;
use crate::framework::{Activation, ActorEntity, EntityRef, Turn};
use crate::model::{Account, PostId};
use chrono::Utc;
use futures::future::join_all;
use std::sync::Arc;
use tracing::{debug, info};

impl ActorEntity for Account {
    type Key = String;
    type Request = AccountRequest;
    type Context = Arc<dyn Directory>;
    const KIND: &'static str = "account";

    fn handle(&mut self, request: AccountRequest, cx: &Activation<Self>) -> Turn {
        match request {
            AccountRequest::FollowUser { target, respond_to } => {
                if &target == cx.key() {
                    return Turn::reply(respond_to, Err(AccountError::SelfFollow));
                }
                let me = cx.key().clone();
                let directory = cx.context().clone();
                let this = cx.this();
                Turn::reply_with(respond_to, async move {
                    directory.account(&target)?.add_follower(&me).await?;
                    this.call(|respond_to| AccountRequest::RecordSubscription { target, respond_to })
                        .await
                })
            }
            AccountRequest::UnfollowUser { target, respond_to } => {
                let me = cx.key().clone();
                let directory = cx.context().clone();
                let this = cx.this();
                Turn::reply_with(respond_to, async move {
                    directory.account(&target)?.remove_follower(&me).await?;
                    this.call(|respond_to| AccountRequest::ForgetSubscription { target, respond_to })
                        .await
                })
            }
            AccountRequest::GetFollowingList(respond_to) => {
                Turn::reply(respond_to, Ok(self.subscriptions.iter().cloned().collect()))
            }
            AccountRequest::GetFollowersList(respond_to) => {
                Turn::reply(respond_to, Ok(self.followers.iter().cloned().collect()))
            }
            AccountRequest::PublishPost { text, respond_to } => {
                let me = cx.key().clone();
                let directory = cx.context().clone();
                let this = cx.this();
                Turn::reply_with(respond_to, async move {
                    publish(this, directory, me, text).await
                })
            }
            AccountRequest::GetPublishedPosts {
                count,
                start,
                respond_to,
            } => Turn::reply(respond_to, Ok(self.my_published.window(count, start))),
            AccountRequest::GetReceivedPosts {
                count,
                start,
                respond_to,
            } => Turn::reply(respond_to, Ok(self.recent_received.window(count, start))),
            AccountRequest::AddFollower {
                username,
                respond_to,
            } => {
                self.followers.insert(username);
                cx.persist_and_reply(respond_to, ())
            }
            AccountRequest::RemoveFollower {
                username,
                respond_to,
            } => {
                self.followers.remove(&username);
                cx.persist_and_reply(respond_to, ())
            }
            AccountRequest::NotifyNewPost {
                post_id,
                respond_to,
            } => {
                self.recent_received.push(post_id);
                cx.persist_and_reply(respond_to, ())
            }
            AccountRequest::RecordSubscription { target, respond_to } => {
                self.subscriptions.insert(target);
                cx.persist_and_reply(respond_to, ())
            }
            AccountRequest::ForgetSubscription { target, respond_to } => {
                self.subscriptions.remove(&target);
                cx.persist_and_reply(respond_to, ())
            }
            AccountRequest::RecordPublished {
                post_id,
                respond_to,
            } => {
                self.my_published.push(post_id);
                cx.persist_and_reply(respond_to, ())
            }
        }
    }
}

/// Create the post, record it, then notify every follower concurrently.
///
/// Fails with the first notification error; the remaining notifications still run
/// to completion.
async fn publish(
    this: EntityRef<Account>,
    directory: Arc<dyn Directory>,
    author: String,
    text: String,
) -> Result<PostId, AccountError> {
    let post_id = PostId::new();
    directory
        .post(post_id)?
        .create_post(text, author.clone(), Utc::now())
        .await?;
    this.call(|respond_to| AccountRequest::RecordPublished { post_id, respond_to })
        .await?;

    let followers: Vec<String> = this.call(AccountRequest::GetFollowersList).await?;
    debug!(%author, %post_id, followers = followers.len(), "Fanning out");
    let notifications = followers
        .iter()
        .map(|follower| notify(directory.as_ref(), follower, post_id));
    for result in join_all(notifications).await {
        result?;
    }

    info!(%author, %post_id, followers = followers.len(), "Published");
    Ok(post_id)
}

async fn notify(
    directory: &dyn Directory,
    follower: &str,
    post_id: PostId,
) -> Result<(), AccountError> {
    directory.account(follower)?.notify_new_post(post_id).await
}
