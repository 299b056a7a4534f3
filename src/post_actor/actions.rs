//! Calls accepted by a [`Post`](crate::model::Post) activation.
//!
//! Each variant carries the reply channel for its result. Callers normally go through
//! [`PostClient`](crate::clients::PostClient) rather than building these directly.

use crate::framework::Response;
use crate::model::{Comment, CommentId, PostView};
use crate::post_actor::PostError;
use chrono::{DateTime, Utc};
use std::collections::BTreeSet;

#[derive(Debug)]
pub enum PostRequest {
    /// Sets content, author and timestamp. A second create overwrites the first.
    Create {
        content: String,
        author: String,
        timestamp: DateTime<Utc>,
        respond_to: Response<(), PostError>,
    },
    /// Content, timestamp and author.
    ///
    /// Unlike the other not-found cases, which succeed as no-ops, reading a post that
    /// was never created fails with [`PostError::NotFound`] instead of returning an
    /// empty post.
    Get(Response<PostView, PostError>),
    /// Idempotent.
    Like {
        username: String,
        respond_to: Response<(), PostError>,
    },
    /// Unliking a post the user never liked succeeds.
    Unlike {
        username: String,
        respond_to: Response<(), PostError>,
    },
    GetLikes(Response<BTreeSet<String>, PostError>),
    Comment {
        author: String,
        text: String,
        respond_to: Response<CommentId, PostError>,
    },
    /// Deleting an unknown comment succeeds.
    DeleteComment {
        id: CommentId,
        respond_to: Response<(), PostError>,
    },
    GetComments(Response<Vec<Comment>, PostError>),
}
