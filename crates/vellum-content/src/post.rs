//! Content-side models.

use serde::{Deserialize, Serialize};

/// A markdown-backed blog post.
///
/// The slug is the filename minus its extension, which keeps it stable
/// and unique across the content directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogPost {
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    /// Raw markdown body.
    pub content: String,
    /// ISO-8601 date string from front-matter; sorts lexicographically.
    pub date: String,
    pub author: String,
    pub category: String,
    pub tags: Vec<String>,
    /// Human-readable estimate, e.g. `"4 min read"`.
    pub reading_time: String,
    pub image: Option<String>,
}

/// Derived category aggregate - recomputed from the current post set,
/// never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    pub name: String,
    pub slug: String,
    pub description: String,
    pub post_count: usize,
}

/// Estimate reading time from the body word count at 200 words per
/// minute, rounded up, never below one minute.
pub fn reading_time(body: &str) -> String {
    let words = body.split_whitespace().count();
    let minutes = words.div_ceil(200).max(1);
    format!("{minutes} min read")
}
