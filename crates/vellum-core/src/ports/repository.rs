use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Post, PostWithAuthor, User};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Save an entity (create or update).
    async fn save(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    /// Fails with `RepoError::NotFound` when nothing was deleted.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// User repository with domain-specific methods.
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    /// Find a user by their email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;
}

/// Post repository. Reads resolve the author relation.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    /// All posts, ordered by creation time descending.
    async fn find_all(&self) -> Result<Vec<PostWithAuthor>, RepoError>;

    /// Posts owned by one author, newest first.
    async fn find_by_author(&self, author_id: Uuid) -> Result<Vec<PostWithAuthor>, RepoError>;

    /// A single post with its author resolved.
    async fn find_with_author(&self, id: Uuid) -> Result<Option<PostWithAuthor>, RepoError>;
}
