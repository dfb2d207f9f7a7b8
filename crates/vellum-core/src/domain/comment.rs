use chrono::Utc;
use serde::{Deserialize, Serialize};

/// A comment on a blog post.
///
/// Threads are two levels deep: a top-level comment may hold replies,
/// replies never hold replies of their own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    pub post_slug: String,
    pub author: String,
    pub content: String,
    /// ISO-8601 creation timestamp.
    pub date: String,
    pub replies: Vec<Comment>,
}

impl Comment {
    pub fn new(id: String, post_slug: &str, author: &str, content: &str) -> Self {
        Self {
            id,
            post_slug: post_slug.to_string(),
            author: author.to_string(),
            content: content.to_string(),
            date: Utc::now().to_rfc3339(),
            replies: Vec::new(),
        }
    }
}
