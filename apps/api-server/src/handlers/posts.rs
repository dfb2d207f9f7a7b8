//! Post CRUD handlers.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use vellum_core::domain::{PostDraft, PostPatch, PostWithAuthor};
use vellum_shared::ApiResponse;
use vellum_shared::dto::{AuthorResponse, CreatePostRequest, PostResponse, UpdatePostRequest};

use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// POST /api/posts - requires authentication.
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let draft = PostDraft {
        title: req.title,
        excerpt: req.excerpt,
        content: req.content,
        category: req.category,
        tags: req.tags,
    };

    let post = state.posts.create(draft, identity.user_id).await?;

    // The relation is not resolved on create; the author is the caller.
    Ok(HttpResponse::Created().json(ApiResponse::ok(to_response(PostWithAuthor {
        post,
        author: None,
    }))))
}

/// GET /api/posts
pub async fn list(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.posts.find_all().await?;
    let responses: Vec<PostResponse> = posts.into_iter().map(to_response).collect();

    Ok(HttpResponse::Ok().json(ApiResponse::ok(responses)))
}

/// GET /api/posts/{id}
pub async fn get(state: web::Data<AppState>, path: web::Path<Uuid>) -> AppResult<HttpResponse> {
    let post = state.posts.find_one(path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(to_response(post))))
}

/// PATCH /api/posts/{id} - owner only.
pub async fn update(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let patch = PostPatch {
        title: req.title,
        excerpt: req.excerpt,
        content: req.content,
        category: req.category,
        tags: req.tags,
    };

    let post = state
        .posts
        .update(path.into_inner(), patch, identity.user_id)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(to_response(post))))
}

/// DELETE /api/posts/{id} - owner only.
pub async fn remove(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    state
        .posts
        .remove(path.into_inner(), identity.user_id)
        .await?;

    Ok(HttpResponse::NoContent().finish())
}

/// GET /api/posts/author/{author_id}
pub async fn by_author(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let posts = state.posts.find_by_author(path.into_inner()).await?;
    let responses: Vec<PostResponse> = posts.into_iter().map(to_response).collect();

    Ok(HttpResponse::Ok().json(ApiResponse::ok(responses)))
}

fn to_response(row: PostWithAuthor) -> PostResponse {
    let PostWithAuthor { post, author } = row;
    PostResponse {
        id: post.id.to_string(),
        author_id: post.author_id.to_string(),
        title: post.title,
        excerpt: post.excerpt,
        content: post.content,
        category: post.category,
        tags: post.tags,
        created_at: post.created_at.to_rfc3339(),
        updated_at: post.updated_at.to_rfc3339(),
        author: author.map(|user| AuthorResponse {
            id: user.id.to_string(),
            email: user.email,
            display_name: user.display_name,
        }),
    }
}
