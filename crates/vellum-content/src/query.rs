//! Query layer - filters and aggregates over a post set.

use std::collections::BTreeSet;

use crate::post::{BlogPost, Category};

/// Posts whose category matches, case-insensitively.
pub fn by_category(posts: Vec<BlogPost>, category: &str) -> Vec<BlogPost> {
    let wanted = category.to_lowercase();
    posts
        .into_iter()
        .filter(|p| p.category.to_lowercase() == wanted)
        .collect()
}

/// Posts carrying the tag, case-insensitively.
pub fn by_tag(posts: Vec<BlogPost>, tag: &str) -> Vec<BlogPost> {
    let wanted = tag.to_lowercase();
    posts
        .into_iter()
        .filter(|p| p.tags.iter().any(|t| t.to_lowercase() == wanted))
        .collect()
}

/// Group the post set by category, in first-seen order.
pub fn categories(posts: &[BlogPost]) -> Vec<Category> {
    let mut groups: Vec<(String, usize)> = Vec::new();

    for post in posts {
        match groups.iter_mut().find(|(name, _)| *name == post.category) {
            Some((_, count)) => *count += 1,
            None => groups.push((post.category.clone(), 1)),
        }
    }

    groups
        .into_iter()
        .map(|(name, count)| Category {
            slug: slug::slugify(&name),
            description: format!("{count} posts"),
            post_count: count,
            name,
        })
        .collect()
}

/// Set union of all tags, sorted ascending.
pub fn tags(posts: &[BlogPost]) -> Vec<String> {
    let set: BTreeSet<String> = posts
        .iter()
        .flat_map(|p| p.tags.iter().cloned())
        .collect();
    set.into_iter().collect()
}

/// Free-text match: the query appears (case-insensitively) in the
/// title, the excerpt, or any tag.
pub fn matches(post: &BlogPost, query: &str) -> bool {
    let needle = query.to_lowercase();
    post.title.to_lowercase().contains(&needle)
        || post.excerpt.to_lowercase().contains(&needle)
        || post.tags.iter().any(|t| t.to_lowercase().contains(&needle))
}

/// Category filter and text filter compose with logical AND.
pub fn filter(posts: Vec<BlogPost>, category: Option<&str>, query: Option<&str>) -> Vec<BlogPost> {
    let posts = match category {
        Some(c) => by_category(posts, c),
        None => posts,
    };
    match query {
        Some(q) if !q.is_empty() => posts.into_iter().filter(|p| matches(p, q)).collect(),
        _ => posts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(slug: &str, category: &str, tags: &[&str]) -> BlogPost {
        BlogPost {
            slug: slug.to_string(),
            title: format!("Post {slug}"),
            excerpt: String::new(),
            content: String::new(),
            date: "2024-01-01".to_string(),
            author: "owner".to_string(),
            category: category.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            reading_time: "1 min read".to_string(),
            image: None,
        }
    }

    #[test]
    fn by_category_is_case_insensitive_exact() {
        let posts = vec![
            post("a", "Backend", &[]),
            post("b", "backend", &[]),
            post("c", "Backend Development", &[]),
        ];

        let found = by_category(posts, "BACKEND");
        assert_eq!(found.len(), 2);
        assert!(found.iter().all(|p| p.category.to_lowercase() == "backend"));
    }

    #[test]
    fn by_tag_is_case_insensitive() {
        let posts = vec![post("a", "Dev", &["Rust", "web"]), post("b", "Dev", &["go"])];

        let found = by_tag(posts, "rust");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].slug, "a");
    }

    #[test]
    fn categories_group_in_first_seen_order() {
        let posts = vec![
            post("a", "Backend", &[]),
            post("b", "Frontend", &[]),
            post("c", "Backend", &[]),
        ];

        let cats = categories(&posts);
        assert_eq!(cats.len(), 2);
        assert_eq!(cats[0].name, "Backend");
        assert_eq!(cats[0].slug, "backend");
        assert_eq!(cats[0].post_count, 2);
        assert_eq!(cats[0].description, "2 posts");
        assert_eq!(cats[1].name, "Frontend");
    }

    #[test]
    fn tags_are_sorted_and_deduplicated() {
        let posts = vec![post("a", "Dev", &["web", "rust"]), post("b", "Dev", &["rust"])];

        assert_eq!(tags(&posts), vec!["rust".to_string(), "web".to_string()]);
    }

    #[test]
    fn filter_composes_category_and_text_with_and() {
        let mut hit = post("a", "Backend", &["rust"]);
        hit.title = "Async Rust in production".to_string();
        let posts = vec![
            hit,
            post("b", "Backend", &["go"]),
            post("c", "Frontend", &["rust"]),
        ];

        let found = filter(posts, Some("backend"), Some("rust"));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].slug, "a");
    }

    #[test]
    fn text_match_covers_title_excerpt_and_tags() {
        let mut p = post("a", "Dev", &["tooling"]);
        p.excerpt = "Notes on profiling".to_string();

        assert!(matches(&p, "PROFILING"));
        assert!(matches(&p, "tool"));
        assert!(!matches(&p, "kubernetes"));
    }
}
