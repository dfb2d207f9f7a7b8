//! # Vellum Infrastructure
//!
//! Concrete implementations of the ports defined in `vellum-core`:
//! SeaORM/Postgres repositories with in-memory fallbacks, the JWT and
//! Argon2 auth services, and the in-memory comment store.

pub mod auth;
pub mod comments;
pub mod database;

pub use auth::{Argon2PasswordService, JwtConfig, JwtTokenService};
pub use comments::InMemoryCommentStore;
pub use database::{
    DatabaseConfig, InMemoryPostRepository, InMemoryUserRepository, PostgresPostRepository,
    PostgresUserRepository, connect,
};
