//! [`ActorEntity`] implementation for [`Post`].
//!
//! Every mutation persists through the activation's coalescer before it replies.

use crate::framework::{Activation, ActorEntity, Turn};
use crate::model::{Comment, CommentId, Post, PostId, PostView};
use crate::post_actor::{PostError, PostRequest};
use chrono::Utc;
use tracing::{debug, warn};

impl ActorEntity for Post {
    type Key = PostId;
    type Request = PostRequest;
    type Context = ();
    const KIND: &'static str = "post";

    fn handle(&mut self, request: PostRequest, cx: &Activation<Self>) -> Turn {
        match request {
            PostRequest::Create {
                content,
                author,
                timestamp,
                respond_to,
            } => {
                if self.is_created() {
                    warn!(post_id = %cx.key(), "Post created twice, overwriting");
                }
                self.create(content, author, timestamp);
                cx.persist_and_reply(respond_to, ())
            }
            PostRequest::Get(respond_to) => {
                let result = match self.timestamp {
                    Some(timestamp) => Ok(PostView {
                        content: self.content.clone(),
                        timestamp,
                        author: self.author.clone(),
                    }),
                    None => Err(PostError::NotFound(*cx.key())),
                };
                Turn::reply(respond_to, result)
            }
            PostRequest::Like {
                username,
                respond_to,
            } => {
                self.likes.insert(username);
                cx.persist_and_reply(respond_to, ())
            }
            PostRequest::Unlike {
                username,
                respond_to,
            } => {
                self.likes.remove(&username);
                cx.persist_and_reply(respond_to, ())
            }
            PostRequest::GetLikes(respond_to) => Turn::reply(respond_to, Ok(self.likes.clone())),
            PostRequest::Comment {
                author,
                text,
                respond_to,
            } => {
                let id = CommentId::new();
                self.comments.push(Comment {
                    id,
                    text,
                    author,
                    timestamp: Utc::now(),
                });
                cx.persist_and_reply(respond_to, id)
            }
            PostRequest::DeleteComment { id, respond_to } => {
                if !self.remove_comment(id) {
                    debug!(post_id = %cx.key(), comment_id = %id, "No such comment");
                }
                cx.persist_and_reply(respond_to, ())
            }
            PostRequest::GetComments(respond_to) => {
                Turn::reply(respond_to, Ok(self.comments.clone()))
            }
        }
    }
}
