//! Post CRUD rules. Ownership is the only authorization rule.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{Post, PostDraft, PostPatch, PostWithAuthor};
use crate::error::{DomainError, RepoError};
use crate::ports::PostRepository;

/// Post lifecycle: created by an authenticated author, mutated and
/// removed only by the owning author, read by anyone.
#[derive(Clone)]
pub struct PostService {
    posts: Arc<dyn PostRepository>,
}

impl PostService {
    pub fn new(posts: Arc<dyn PostRepository>) -> Self {
        Self { posts }
    }

    /// Create a new post owned by `author_id`.
    ///
    /// No uniqueness constraint beyond the storage-assigned identity.
    pub async fn create(&self, draft: PostDraft, author_id: Uuid) -> Result<Post, DomainError> {
        if draft.title.trim().is_empty() {
            return Err(DomainError::Validation("title must not be empty".to_string()));
        }
        if draft.content.trim().is_empty() {
            return Err(DomainError::Validation(
                "content must not be empty".to_string(),
            ));
        }

        let post = Post::new(draft, author_id);
        self.posts
            .save(post)
            .await
            .map_err(|e| internal("create post", e))
    }

    /// All posts with authors resolved, newest first.
    pub async fn find_all(&self) -> Result<Vec<PostWithAuthor>, DomainError> {
        self.posts
            .find_all()
            .await
            .map_err(|e| internal("list posts", e))
    }

    /// A single post; `NotFound` when absent.
    pub async fn find_one(&self, id: Uuid) -> Result<PostWithAuthor, DomainError> {
        self.posts
            .find_with_author(id)
            .await
            .map_err(|e| internal("load post", e))?
            .ok_or_else(|| not_found(id))
    }

    /// Apply a partial update and return the refreshed record.
    pub async fn update(
        &self,
        id: Uuid,
        patch: PostPatch,
        user_id: Uuid,
    ) -> Result<PostWithAuthor, DomainError> {
        let mut post = self
            .posts
            .find_by_id(id)
            .await
            .map_err(|e| internal("load post", e))?
            .ok_or_else(|| not_found(id))?;

        post.ensure_owned_by(user_id, "you can only update your own posts")?;

        post.apply(patch);
        self.posts
            .save(post)
            .await
            .map_err(|e| internal("update post", e))?;

        self.find_one(id).await
    }

    /// Delete a post. Deleting an already-deleted id is `NotFound`,
    /// never a silent success.
    pub async fn remove(&self, id: Uuid, user_id: Uuid) -> Result<(), DomainError> {
        let post = self
            .posts
            .find_by_id(id)
            .await
            .map_err(|e| internal("load post", e))?
            .ok_or_else(|| not_found(id))?;

        post.ensure_owned_by(user_id, "you can only delete your own posts")?;

        match self.posts.delete(id).await {
            Ok(()) => Ok(()),
            Err(RepoError::NotFound) => Err(not_found(id)),
            Err(e) => Err(internal("delete post", e)),
        }
    }

    /// Posts owned by one author, newest first.
    pub async fn find_by_author(
        &self,
        author_id: Uuid,
    ) -> Result<Vec<PostWithAuthor>, DomainError> {
        self.posts
            .find_by_author(author_id)
            .await
            .map_err(|e| internal("list posts by author", e))
    }
}

fn not_found(id: Uuid) -> DomainError {
    DomainError::NotFound {
        entity_type: "post",
        id: id.to_string(),
    }
}

fn internal(op: &str, err: RepoError) -> DomainError {
    DomainError::Internal(format!("{op}: {err}"))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::ports::BaseRepository;

    #[derive(Default)]
    struct MemoryRepo {
        posts: Mutex<HashMap<Uuid, Post>>,
    }

    #[async_trait]
    impl BaseRepository<Post, Uuid> for MemoryRepo {
        async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
            Ok(self.posts.lock().unwrap().get(&id).cloned())
        }

        async fn save(&self, entity: Post) -> Result<Post, RepoError> {
            self.posts.lock().unwrap().insert(entity.id, entity.clone());
            Ok(entity)
        }

        async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
            self.posts
                .lock()
                .unwrap()
                .remove(&id)
                .map(|_| ())
                .ok_or(RepoError::NotFound)
        }
    }

    #[async_trait]
    impl PostRepository for MemoryRepo {
        async fn find_all(&self) -> Result<Vec<PostWithAuthor>, RepoError> {
            let mut posts: Vec<Post> = self.posts.lock().unwrap().values().cloned().collect();
            posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            Ok(posts
                .into_iter()
                .map(|post| PostWithAuthor { post, author: None })
                .collect())
        }

        async fn find_by_author(&self, author_id: Uuid) -> Result<Vec<PostWithAuthor>, RepoError> {
            Ok(self
                .find_all()
                .await?
                .into_iter()
                .filter(|p| p.post.author_id == author_id)
                .collect())
        }

        async fn find_with_author(&self, id: Uuid) -> Result<Option<PostWithAuthor>, RepoError> {
            Ok(self
                .find_by_id(id)
                .await?
                .map(|post| PostWithAuthor { post, author: None }))
        }
    }

    fn service() -> PostService {
        PostService::new(Arc::new(MemoryRepo::default()))
    }

    fn draft(title: &str) -> PostDraft {
        PostDraft {
            title: title.to_string(),
            excerpt: None,
            content: "Body text".to_string(),
            category: Some("Development".to_string()),
            tags: vec!["rust".to_string()],
        }
    }

    #[tokio::test]
    async fn create_then_find_one() {
        let svc = service();
        let author = Uuid::new_v4();

        let post = svc.create(draft("First"), author).await.unwrap();
        let loaded = svc.find_one(post.id).await.unwrap();

        assert_eq!(loaded.post.id, post.id);
        assert_eq!(loaded.post.author_id, author);
    }

    #[tokio::test]
    async fn create_rejects_blank_title() {
        let svc = service();

        let err = svc.create(draft("   "), Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn update_by_non_owner_is_forbidden_and_leaves_post_unchanged() {
        let svc = service();
        let owner = Uuid::new_v4();
        let post = svc.create(draft("Mine"), owner).await.unwrap();

        let patch = PostPatch {
            title: Some("Hijacked".to_string()),
            ..Default::default()
        };
        let err = svc.update(post.id, patch, Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, DomainError::Forbidden(_)));

        let unchanged = svc.find_one(post.id).await.unwrap();
        assert_eq!(unchanged.post.title, "Mine");
    }

    #[tokio::test]
    async fn update_applies_partial_patch() {
        let svc = service();
        let owner = Uuid::new_v4();
        let post = svc.create(draft("Draft"), owner).await.unwrap();

        let patch = PostPatch {
            content: Some("Revised body".to_string()),
            ..Default::default()
        };
        let updated = svc.update(post.id, patch, owner).await.unwrap();

        assert_eq!(updated.post.title, "Draft");
        assert_eq!(updated.post.content, "Revised body");
        assert!(updated.post.updated_at >= updated.post.created_at);
    }

    #[tokio::test]
    async fn remove_twice_reports_not_found() {
        let svc = service();
        let owner = Uuid::new_v4();
        let post = svc.create(draft("Short-lived"), owner).await.unwrap();

        svc.remove(post.id, owner).await.unwrap();
        let err = svc.remove(post.id, owner).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn remove_by_non_owner_is_forbidden() {
        let svc = service();
        let owner = Uuid::new_v4();
        let post = svc.create(draft("Protected"), owner).await.unwrap();

        let err = svc.remove(post.id, Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, DomainError::Forbidden(_)));
        assert!(svc.find_one(post.id).await.is_ok());
    }

    #[tokio::test]
    async fn find_by_author_only_returns_owned_posts() {
        let svc = service();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();

        svc.create(draft("Alice 1"), alice).await.unwrap();
        svc.create(draft("Bob 1"), bob).await.unwrap();
        svc.create(draft("Alice 2"), alice).await.unwrap();

        let posts = svc.find_by_author(alice).await.unwrap();
        assert_eq!(posts.len(), 2);
        assert!(posts.iter().all(|p| p.post.author_id == alice));
    }
}
