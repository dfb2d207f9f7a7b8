//! In-memory repositories - used when no database is configured.
//!
//! Data is lost on process restart; suitable for local development and
//! tests only.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use vellum_core::domain::{Post, PostWithAuthor, User};
use vellum_core::error::RepoError;
use vellum_core::ports::{BaseRepository, PostRepository, UserRepository};

/// Users held in a process-local map.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<Uuid, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BaseRepository<User, Uuid> for InMemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn save(&self, user: User) -> Result<User, RepoError> {
        self.users.write().await.insert(user.id, user.clone());
        Ok(user)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        self.users
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.email == email)
            .cloned())
    }
}

/// Posts held in a process-local map. Author resolution goes through
/// the shared user repository, mirroring the relational adapter.
pub struct InMemoryPostRepository {
    posts: RwLock<HashMap<Uuid, Post>>,
    users: Arc<InMemoryUserRepository>,
}

impl InMemoryPostRepository {
    pub fn new(users: Arc<InMemoryUserRepository>) -> Self {
        Self {
            posts: RwLock::new(HashMap::new()),
            users,
        }
    }

    async fn resolve(&self, post: Post) -> PostWithAuthor {
        let author = self.users.users.read().await.get(&post.author_id).cloned();
        PostWithAuthor { post, author }
    }

    async fn sorted(&self) -> Vec<Post> {
        let mut posts: Vec<Post> = self.posts.read().await.values().cloned().collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        posts
    }
}

#[async_trait]
impl BaseRepository<Post, Uuid> for InMemoryPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        Ok(self.posts.read().await.get(&id).cloned())
    }

    async fn save(&self, post: Post) -> Result<Post, RepoError> {
        self.posts.write().await.insert(post.id, post.clone());
        Ok(post)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        self.posts
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn find_all(&self) -> Result<Vec<PostWithAuthor>, RepoError> {
        let mut resolved = Vec::new();
        for post in self.sorted().await {
            resolved.push(self.resolve(post).await);
        }
        Ok(resolved)
    }

    async fn find_by_author(&self, author_id: Uuid) -> Result<Vec<PostWithAuthor>, RepoError> {
        let mut resolved = Vec::new();
        for post in self.sorted().await {
            if post.author_id == author_id {
                resolved.push(self.resolve(post).await);
            }
        }
        Ok(resolved)
    }

    async fn find_with_author(&self, id: Uuid) -> Result<Option<PostWithAuthor>, RepoError> {
        match self.find_by_id(id).await? {
            Some(post) => Ok(Some(self.resolve(post).await)),
            None => Ok(None),
        }
    }
}
