use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
use uuid::Uuid;

use vellum_core::domain::{Post, User};
use vellum_core::error::RepoError;
use vellum_core::ports::{BaseRepository, UserRepository};

use super::entity::{post, user};
use super::postgres_repo::{PostgresPostRepository, PostgresUserRepository};

fn post_model(id: Uuid, author_id: Uuid, title: &str) -> post::Model {
    let now = chrono::Utc::now();
    post::Model {
        id,
        author_id,
        title: title.to_owned(),
        excerpt: None,
        content: "Content".to_owned(),
        category: Some("Development".to_owned()),
        tags: serde_json::json!(["rust"]),
        created_at: now.into(),
        updated_at: now.into(),
    }
}

#[tokio::test]
async fn find_post_by_id_maps_to_domain() {
    let post_id = Uuid::new_v4();
    let author_id = Uuid::new_v4();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![post_model(post_id, author_id, "Test Post")]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let result: Option<Post> = repo.find_by_id(post_id).await.unwrap();

    let post = result.unwrap();
    assert_eq!(post.id, post_id);
    assert_eq!(post.title, "Test Post");
    assert_eq!(post.tags, vec!["rust".to_string()]);
}

#[tokio::test]
async fn delete_missing_post_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results(vec![MockExecResult {
            last_insert_id: 0,
            rows_affected: 0,
        }])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let err = BaseRepository::<Post, _>::delete(&repo, Uuid::new_v4())
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::NotFound));
}

#[tokio::test]
async fn find_user_by_email_maps_to_domain() {
    let user_id = Uuid::new_v4();
    let now = chrono::Utc::now();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![user::Model {
            id: user_id,
            email: "owner@example.com".to_owned(),
            display_name: "Owner".to_owned(),
            password_hash: "hash".to_owned(),
            created_at: now.into(),
            updated_at: now.into(),
        }]])
        .into_connection();

    let repo = PostgresUserRepository::new(db);

    let result: Option<User> = repo.find_by_email("owner@example.com").await.unwrap();

    let user = result.unwrap();
    assert_eq!(user.id, user_id);
    assert_eq!(user.display_name, "Owner");
}
