//! Blog content handlers backed by the content store.
//!
//! The store does blocking filesystem reads; at personal-blog scale
//! (dozens of small files) that is fine inside a handler.

use actix_web::{HttpResponse, web};
use serde::Deserialize;

use vellum_shared::ApiResponse;

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub category: Option<String>,
    pub tag: Option<String>,
    pub q: Option<String>,
}

/// GET /api/blog/posts?category=&tag=&q=
///
/// Category and free-text filters compose with AND; the tag filter is
/// an exact (case-insensitive) match on top.
pub async fn list_posts(
    state: web::Data<AppState>,
    query: web::Query<ListQuery>,
) -> HttpResponse {
    let params = query.into_inner();

    let mut posts = state
        .content
        .search(params.category.as_deref(), params.q.as_deref());
    if let Some(tag) = params.tag.as_deref() {
        posts = vellum_content::by_tag(posts, tag);
    }

    HttpResponse::Ok().json(ApiResponse::ok(posts))
}

/// GET /api/blog/posts/{slug}
pub async fn get_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let slug = path.into_inner();

    match state.content.get_by_slug(&slug) {
        Some(post) => Ok(HttpResponse::Ok().json(ApiResponse::ok(post))),
        None => Err(AppError::NotFound(format!("post '{slug}' not found"))),
    }
}

/// GET /api/blog/categories
pub async fn categories(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::ok(state.content.categories()))
}

/// GET /api/blog/tags
pub async fn tags(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::ok(state.content.tags()))
}
