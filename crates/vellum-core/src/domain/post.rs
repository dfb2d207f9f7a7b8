use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

use super::User;

/// Post entity - a persisted blog post owned by its author.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub excerpt: Option<String>,
    pub content: String,
    pub category: Option<String>,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields supplied when creating a post.
#[derive(Debug, Clone, Default)]
pub struct PostDraft {
    pub title: String,
    pub excerpt: Option<String>,
    pub content: String,
    pub category: Option<String>,
    pub tags: Vec<String>,
}

/// Partial update; `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct PostPatch {
    pub title: Option<String>,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl Post {
    /// Create a new post owned by `author_id`.
    pub fn new(draft: PostDraft, author_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            author_id,
            title: draft.title,
            excerpt: draft.excerpt,
            content: draft.content,
            category: draft.category,
            tags: draft.tags,
            created_at: now,
            updated_at: now,
        }
    }

    /// Ownership is the only mutation right - there is no admin override.
    pub fn ensure_owned_by(&self, user_id: Uuid, denial: &'static str) -> Result<(), DomainError> {
        if self.author_id != user_id {
            return Err(DomainError::Forbidden(denial));
        }
        Ok(())
    }

    /// Apply a partial update and bump `updated_at`.
    pub fn apply(&mut self, patch: PostPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(excerpt) = patch.excerpt {
            self.excerpt = Some(excerpt);
        }
        if let Some(content) = patch.content {
            self.content = content;
        }
        if let Some(category) = patch.category {
            self.category = Some(category);
        }
        if let Some(tags) = patch.tags {
            self.tags = tags;
        }
        self.updated_at = Utc::now();
    }
}

/// Read model: a post with its author relation resolved.
///
/// `author` is `None` when the owning user no longer exists.
#[derive(Debug, Clone, Serialize)]
pub struct PostWithAuthor {
    pub post: Post,
    pub author: Option<User>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> PostDraft {
        PostDraft {
            title: "Hello".to_string(),
            excerpt: Some("A greeting".to_string()),
            content: "Hello, world".to_string(),
            category: Some("Development".to_string()),
            tags: vec!["rust".to_string()],
        }
    }

    #[test]
    fn new_post_is_owned_by_author() {
        let author = Uuid::new_v4();
        let post = Post::new(draft(), author);

        assert_eq!(post.author_id, author);
        assert_eq!(post.created_at, post.updated_at);
        assert!(post.ensure_owned_by(author, "denied").is_ok());
    }

    #[test]
    fn ensure_owned_by_rejects_other_users() {
        let post = Post::new(draft(), Uuid::new_v4());

        let err = post.ensure_owned_by(Uuid::new_v4(), "denied").unwrap_err();
        assert!(matches!(err, DomainError::Forbidden("denied")));
    }

    #[test]
    fn apply_patch_keeps_unset_fields() {
        let mut post = Post::new(draft(), Uuid::new_v4());
        post.apply(PostPatch {
            title: Some("Updated".to_string()),
            ..Default::default()
        });

        assert_eq!(post.title, "Updated");
        assert_eq!(post.content, "Hello, world");
        assert_eq!(post.category.as_deref(), Some("Development"));
    }
}
