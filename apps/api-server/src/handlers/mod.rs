//! HTTP handlers and route configuration.

mod auth;
mod blog;
mod comments;
mod health;
mod posts;

use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            // Auth routes
            .service(
                web::scope("/auth")
                    .route("/register", web::post().to(auth::register))
                    .route("/login", web::post().to(auth::login))
                    .route("/me", web::get().to(auth::me)),
            )
            // Post CRUD
            .service(
                web::scope("/posts")
                    .route("", web::get().to(posts::list))
                    .route("", web::post().to(posts::create))
                    .route("/author/{author_id}", web::get().to(posts::by_author))
                    .route("/{id}", web::get().to(posts::get))
                    .route("/{id}", web::patch().to(posts::update))
                    .route("/{id}", web::delete().to(posts::remove)),
            )
            // Markdown-backed blog content
            .service(
                web::scope("/blog")
                    .route("/posts", web::get().to(blog::list_posts))
                    .route("/posts/{slug}", web::get().to(blog::get_post))
                    .route("/posts/{slug}/comments", web::get().to(comments::list))
                    .route("/posts/{slug}/comments", web::post().to(comments::create))
                    .route("/categories", web::get().to(blog::categories))
                    .route("/tags", web::get().to(blog::tags)),
            )
            // Replies address the parent comment directly
            .route("/comments/{parent_id}/replies", web::post().to(comments::reply)),
    );
}
