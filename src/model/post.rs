use crate::model::tags::extract_tags;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use uuid::Uuid;

/// Identifier of a post, generated when it is published.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(Uuid);

impl PostId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PostId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Identifier of a comment within its post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommentId(Uuid);

impl CommentId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CommentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CommentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    pub text: String,
    pub author: String,
    pub timestamp: DateTime<Utc>,
}

/// State of one post, keyed by [`PostId`].
///
/// `timestamp` stays `None` until the post is created.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub content: String,
    /// Derived from `content` on every create.
    pub tags: Vec<String>,
    pub timestamp: Option<DateTime<Utc>>,
    pub author: String,
    pub likes: BTreeSet<String>,
    pub comments: Vec<Comment>,
}

impl Post {
    pub fn is_created(&self) -> bool {
        self.timestamp.is_some()
    }

    /// Overwrites content, author and timestamp, and re-derives tags.
    pub fn create(&mut self, content: String, author: String, timestamp: DateTime<Utc>) {
        self.tags = extract_tags(&content);
        self.content = content;
        self.author = author;
        self.timestamp = Some(timestamp);
    }

    /// Removes the first comment with `id`. Returns whether one was found.
    pub fn remove_comment(&mut self, id: CommentId) -> bool {
        match self.comments.iter().position(|c| c.id == id) {
            Some(index) => {
                self.comments.remove(index);
                true
            }
            None => false,
        }
    }
}

/// What `get_post` returns. Tags are not part of it; see [`PostView::tags`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostView {
    pub content: String,
    pub timestamp: DateTime<Utc>,
    pub author: String,
}

impl PostView {
    pub fn tags(&self) -> Vec<String> {
        extract_tags(&self.content)
    }
}

/// A post as listed in a feed, as seen by one viewer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostSummary {
    pub id: PostId,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    pub author: String,
    pub comment_count: usize,
    pub like_count: usize,
    pub liked_by_viewer: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comment(text: &str) -> Comment {
        Comment {
            id: CommentId::new(),
            text: text.to_string(),
            author: "bob".to_string(),
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn test_create_derives_tags_and_overwrites() {
        let mut post = Post::default();
        assert!(!post.is_created());

        post.create("first #a".into(), "alice".into(), Utc::now());
        assert_eq!(post.tags, vec!["#a"]);

        post.create("second #b #c".into(), "carol".into(), Utc::now());
        assert!(post.is_created());
        assert_eq!(post.content, "second #b #c");
        assert_eq!(post.author, "carol");
        assert_eq!(post.tags, vec!["#b", "#c"]);
    }

    #[test]
    fn test_remove_comment_removes_first_match_only() {
        let mut post = Post::default();
        let first = comment("one");
        let mut duplicate = comment("two");
        duplicate.id = first.id;
        post.comments = vec![first.clone(), comment("middle"), duplicate];

        assert!(post.remove_comment(first.id));
        assert_eq!(post.comments.len(), 2);
        assert_eq!(post.comments[1].text, "two");

        assert!(!post.remove_comment(CommentId::new()));
        assert_eq!(post.comments.len(), 2);
    }

    #[test]
    fn test_view_recomputes_tags() {
        let view = PostView {
            content: "hello #go #systems".into(),
            timestamp: Utc::now(),
            author: "alice".into(),
        };
        assert_eq!(view.tags(), vec!["#go", "#systems"]);
    }

    #[test]
    fn test_ids_serialize_as_bare_uuid() {
        let id = PostId::new();
        assert_eq!(serde_json::to_string(&id).unwrap(), format!("\"{id}\""));
    }
}
