//! Comment thread handlers.

use actix_web::{HttpResponse, web};

use vellum_shared::ApiResponse;
use vellum_shared::dto::CommentRequest;

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/blog/posts/{slug}/comments
pub async fn list(state: web::Data<AppState>, path: web::Path<String>) -> HttpResponse {
    let thread = state.comments.list(&path.into_inner()).await;

    HttpResponse::Ok().json(ApiResponse::ok(thread))
}

/// POST /api/blog/posts/{slug}/comments
pub async fn create(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<CommentRequest>,
) -> AppResult<HttpResponse> {
    let req = validated(body.into_inner())?;
    let comment = state
        .comments
        .add_top_level(&path.into_inner(), &req.author, &req.content)
        .await;

    Ok(HttpResponse::Created().json(ApiResponse::ok(comment)))
}

/// POST /api/comments/{parent_id}/replies
pub async fn reply(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<CommentRequest>,
) -> AppResult<HttpResponse> {
    let req = validated(body.into_inner())?;
    let reply = state
        .comments
        .add_reply(&path.into_inner(), &req.author, &req.content)
        .await?;

    Ok(HttpResponse::Created().json(ApiResponse::ok(reply)))
}

fn validated(req: CommentRequest) -> Result<CommentRequest, AppError> {
    if req.author.trim().is_empty() {
        return Err(AppError::BadRequest("author must not be empty".to_string()));
    }
    if req.content.trim().is_empty() {
        return Err(AppError::BadRequest(
            "content must not be empty".to_string(),
        ));
    }
    Ok(req)
}
