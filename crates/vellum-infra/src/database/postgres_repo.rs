//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use vellum_core::domain::{PostWithAuthor, User};
use vellum_core::error::RepoError;
use vellum_core::ports::{PostRepository, UserRepository};

use super::entity::post::{self, Entity as PostEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::postgres_base::PostgresBaseRepository;

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        // Mask the local part so addresses stay out of the logs.
        let masked = match email.split_once('@') {
            Some((local, domain)) if !local.is_empty() => {
                format!("{}***@{}", &local[..1], domain)
            }
            _ => "***".to_string(),
        };
        tracing::debug!(user_email = %masked, "Finding user by email");

        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&*self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.map(Into::into))
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn find_all(&self) -> Result<Vec<PostWithAuthor>, RepoError> {
        let rows = PostEntity::find()
            .find_also_related(UserEntity)
            .order_by_desc(post::Column::CreatedAt)
            .all(&*self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(rows.into_iter().map(into_post_with_author).collect())
    }

    async fn find_by_author(&self, author_id: Uuid) -> Result<Vec<PostWithAuthor>, RepoError> {
        let rows = PostEntity::find()
            .filter(post::Column::AuthorId.eq(author_id))
            .find_also_related(UserEntity)
            .order_by_desc(post::Column::CreatedAt)
            .all(&*self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(rows.into_iter().map(into_post_with_author).collect())
    }

    async fn find_with_author(&self, id: Uuid) -> Result<Option<PostWithAuthor>, RepoError> {
        let row = PostEntity::find_by_id(id)
            .find_also_related(UserEntity)
            .one(&*self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(row.map(into_post_with_author))
    }
}

fn into_post_with_author((post, author): (post::Model, Option<user::Model>)) -> PostWithAuthor {
    PostWithAuthor {
        post: post.into(),
        author: author.map(Into::into),
    }
}
