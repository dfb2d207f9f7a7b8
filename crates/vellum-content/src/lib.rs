//! # Vellum Content
//!
//! The markdown content pipeline: read post files from a configured
//! directory, split front-matter from the body, derive reading time,
//! and query the resulting post set by category, tag, or free text.
//!
//! The pipeline is deliberately stateless - every query re-reads disk.
//! At personal-blog scale (dozens of files) that is cheap, and it keeps
//! the store free of invalidation logic.

mod frontmatter;
mod post;
mod query;
mod store;

pub use frontmatter::FrontMatter;
pub use post::{BlogPost, Category, reading_time};
pub use query::{by_category, by_tag, categories, filter, matches, tags};
pub use store::ContentStore;

use thiserror::Error;

/// Errors internal to the content pipeline.
///
/// These never escape the store boundary: a file that cannot be read or
/// parsed degrades to absence (`None` / skipped), it does not fail the
/// operation.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("failed to read content file: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed front-matter: {0}")]
    FrontMatter(#[from] serde_yaml::Error),

    #[error("unterminated front-matter block")]
    Unterminated,
}
