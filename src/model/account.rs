use crate::model::post::PostId;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, VecDeque};

/// Capacity of the two recency caches an account keeps.
pub const POST_CACHE_SIZE: usize = 100;

/// State of one user account, keyed by username.
///
/// Peers are stored by username only. A callable handle is resolved through the
/// directory every time a peer is called.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Accounts this one follows.
    pub subscriptions: BTreeSet<String>,
    /// Accounts following this one.
    pub followers: BTreeSet<String>,
    /// Posts announced by followed accounts, oldest first.
    pub recent_received: RecentPosts,
    /// Posts published by this account, oldest first.
    pub my_published: RecentPosts,
}

/// Bounded FIFO of post ids. Pushing past [`POST_CACHE_SIZE`] evicts the oldest entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecentPosts(VecDeque<PostId>);

impl RecentPosts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, id: PostId) {
        self.0.push_back(id);
        while self.0.len() > POST_CACHE_SIZE {
            self.0.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PostId> {
        self.0.iter()
    }

    /// Up to `count` ids starting at `start`, oldest first.
    ///
    /// A negative `start` reads from the beginning; the window is cut at the end of
    /// the cache, so a `start` past the end yields nothing.
    pub fn window(&self, count: i32, start: i32) -> Vec<PostId> {
        let len = self.0.len() as i64;
        let start = i64::from(start).max(0);
        let count = i64::from(count).min(len - start).max(0);
        self.0
            .iter()
            .skip(start as usize)
            .take(count as usize)
            .copied()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(n: usize) -> (RecentPosts, Vec<PostId>) {
        let ids: Vec<PostId> = (0..n).map(|_| PostId::new()).collect();
        let mut cache = RecentPosts::new();
        for id in &ids {
            cache.push(*id);
        }
        (cache, ids)
    }

    #[test]
    fn test_push_evicts_oldest() {
        let (cache, ids) = filled(POST_CACHE_SIZE + 5);
        assert_eq!(cache.len(), POST_CACHE_SIZE);
        let kept: Vec<PostId> = cache.iter().copied().collect();
        assert_eq!(kept, ids[5..]);
    }

    #[test]
    fn test_window_clamps_start_and_count() {
        let (cache, ids) = filled(10);

        assert_eq!(cache.window(3, -4), ids[0..3]);
        assert_eq!(cache.window(3, 0), ids[0..3]);
        assert_eq!(cache.window(50, 7), ids[7..]);
        assert!(cache.window(5, 10).is_empty());
        assert!(cache.window(5, 42).is_empty());
        assert!(cache.window(-1, 2).is_empty());
        assert!(cache.window(0, 0).is_empty());
    }

    #[test]
    fn test_window_on_empty_cache() {
        assert!(RecentPosts::new().window(10, 0).is_empty());
    }

    #[test]
    fn test_serializes_as_plain_list() {
        let (cache, ids) = filled(2);
        let json = serde_json::to_string(&cache).unwrap();
        assert_eq!(json, serde_json::to_string(&ids).unwrap());
    }
}
