//! In-memory comment store.
//!
//! Comment state is ephemeral per process; a persistent backend would
//! implement the same `CommentStore` port.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::{Mutex, RwLock};

use vellum_core::domain::Comment;
use vellum_core::error::DomainError;
use vellum_core::ports::CommentStore;

/// Comment threads keyed by post slug.
///
/// Top-level comments are stored newest-first; replies inside a comment
/// keep insertion order. Both orderings are load-bearing for the
/// rendered thread.
#[derive(Default)]
pub struct InMemoryCommentStore {
    threads: RwLock<HashMap<String, Vec<Comment>>>,
    last_id: Mutex<i64>,
}

impl InMemoryCommentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time-derived id, bumped past the last issued one so that two
    /// comments landing in the same millisecond stay unique.
    async fn next_id(&self) -> String {
        let mut last = self.last_id.lock().await;
        *last = Utc::now().timestamp_millis().max(*last + 1);
        last.to_string()
    }
}

#[async_trait]
impl CommentStore for InMemoryCommentStore {
    async fn list(&self, post_slug: &str) -> Vec<Comment> {
        self.threads
            .read()
            .await
            .get(post_slug)
            .cloned()
            .unwrap_or_default()
    }

    async fn add_top_level(&self, post_slug: &str, author: &str, content: &str) -> Comment {
        let comment = Comment::new(self.next_id().await, post_slug, author, content);

        let mut threads = self.threads.write().await;
        threads
            .entry(post_slug.to_string())
            .or_default()
            .insert(0, comment.clone());

        comment
    }

    async fn add_reply(
        &self,
        parent_id: &str,
        author: &str,
        content: &str,
    ) -> Result<Comment, DomainError> {
        let id = self.next_id().await;

        let mut threads = self.threads.write().await;
        // Only top-level comments are searched: replies cannot receive
        // replies, which caps the thread depth at one.
        for thread in threads.values_mut() {
            if let Some(parent) = thread.iter_mut().find(|c| c.id == parent_id) {
                let reply = Comment::new(id, &parent.post_slug, author, content);
                parent.replies.push(reply.clone());
                return Ok(reply);
            }
        }

        Err(DomainError::NotFound {
            entity_type: "comment",
            id: parent_id.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn top_level_comments_are_prepended() {
        let store = InMemoryCommentStore::new();

        store.add_top_level("post", "alice", "first").await;
        store.add_top_level("post", "bob", "second").await;

        let thread = store.list("post").await;
        assert_eq!(thread.len(), 2);
        assert_eq!(thread[0].content, "second");
        assert_eq!(thread[1].content, "first");
    }

    #[tokio::test]
    async fn replies_are_appended_in_call_order() {
        let store = InMemoryCommentStore::new();

        let parent = store.add_top_level("post", "alice", "root").await;
        store.add_reply(&parent.id, "bob", "reply one").await.unwrap();
        store.add_reply(&parent.id, "carol", "reply two").await.unwrap();

        let thread = store.list("post").await;
        let replies = &thread[0].replies;
        assert_eq!(replies.len(), 2);
        assert_eq!(replies[0].content, "reply one");
        assert_eq!(replies[1].content, "reply two");
        assert!(replies.iter().all(|r| r.replies.is_empty()));
    }

    #[tokio::test]
    async fn reply_to_unknown_parent_is_not_found() {
        let store = InMemoryCommentStore::new();

        let err = store.add_reply("12345", "bob", "hello").await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn replies_cannot_receive_replies() {
        let store = InMemoryCommentStore::new();

        let parent = store.add_top_level("post", "alice", "root").await;
        let reply = store.add_reply(&parent.id, "bob", "leaf").await.unwrap();

        let err = store.add_reply(&reply.id, "carol", "nested").await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn ids_stay_unique_under_rapid_inserts() {
        let store = InMemoryCommentStore::new();

        let a = store.add_top_level("post", "alice", "one").await;
        let b = store.add_top_level("post", "alice", "two").await;
        let c = store.add_top_level("post", "alice", "three").await;

        assert_ne!(a.id, b.id);
        assert_ne!(b.id, c.id);
    }

    #[tokio::test]
    async fn threads_are_isolated_per_post() {
        let store = InMemoryCommentStore::new();

        store.add_top_level("first-post", "alice", "hello").await;

        assert!(store.list("second-post").await.is_empty());
        assert_eq!(store.list("first-post").await.len(), 1);
    }
}
