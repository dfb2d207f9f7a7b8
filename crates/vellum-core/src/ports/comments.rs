//! Comment storage port.

use async_trait::async_trait;

use crate::domain::Comment;
use crate::error::DomainError;

/// Comment storage seam.
///
/// The shipped implementation is in-memory and ephemeral per process;
/// a persistent backend plugs in behind this trait.
#[async_trait]
pub trait CommentStore: Send + Sync {
    /// Top-level comments for a post, newest first.
    /// Replies inside each comment stay in insertion order.
    async fn list(&self, post_slug: &str) -> Vec<Comment>;

    /// Prepend a new top-level comment to the post's thread.
    async fn add_top_level(&self, post_slug: &str, author: &str, content: &str) -> Comment;

    /// Append a reply to a top-level comment.
    ///
    /// Only top-level comments can receive replies; fails with
    /// `DomainError::NotFound` when no top-level comment has `parent_id`.
    async fn add_reply(
        &self,
        parent_id: &str,
        author: &str,
        content: &str,
    ) -> Result<Comment, DomainError>;
}
