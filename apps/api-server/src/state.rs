//! Application state - shared across all handlers.

use std::sync::Arc;

use vellum_content::ContentStore;
use vellum_core::ports::{CommentStore, PostRepository, UserRepository};
use vellum_core::service::PostService;
use vellum_infra::InMemoryCommentStore;
use vellum_infra::database::{
    self, DatabaseConfig, InMemoryPostRepository, InMemoryUserRepository, PostgresPostRepository,
    PostgresUserRepository,
};

use crate::config::ContentConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: PostService,
    pub users: Arc<dyn UserRepository>,
    pub content: Arc<ContentStore>,
    pub comments: Arc<dyn CommentStore>,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    ///
    /// Without `DATABASE_URL` (or when the connection fails) the CRUD
    /// surface runs on in-memory repositories so the server still comes
    /// up for local work.
    pub async fn new(db_config: Option<&DatabaseConfig>, content: &ContentConfig) -> Self {
        let content_store = Arc::new(ContentStore::new(&content.dir, &content.default_author));
        let comments: Arc<dyn CommentStore> = Arc::new(InMemoryCommentStore::new());

        let (post_repo, users): (Arc<dyn PostRepository>, Arc<dyn UserRepository>) =
            match db_config {
                Some(config) => match database::connect(config).await {
                    Ok(db) => {
                        let db = Arc::new(db);
                        (
                            Arc::new(PostgresPostRepository::new(db.clone())),
                            Arc::new(PostgresUserRepository::new(db)),
                        )
                    }
                    Err(e) => {
                        tracing::error!(
                            "Failed to connect to database: {}. Using in-memory repositories.",
                            e
                        );
                        in_memory_repos()
                    }
                },
                None => {
                    tracing::warn!("DATABASE_URL not set. Running with in-memory repositories.");
                    in_memory_repos()
                }
            };

        tracing::info!(content_dir = %content.dir, "Application state initialized");

        Self {
            posts: PostService::new(post_repo),
            users,
            content: content_store,
            comments,
        }
    }
}

fn in_memory_repos() -> (Arc<dyn PostRepository>, Arc<dyn UserRepository>) {
    let users = Arc::new(InMemoryUserRepository::new());
    (Arc::new(InMemoryPostRepository::new(users.clone())), users)
}
