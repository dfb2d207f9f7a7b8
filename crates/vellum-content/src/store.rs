//! Content store - loads posts from the configured content directory.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::frontmatter::FrontMatter;
use crate::post::{BlogPost, Category, reading_time};
use crate::{ContentError, query};

/// Recognized content extensions, in probe priority order.
const EXTENSIONS: [&str; 2] = ["md", "mdx"];

/// Category applied when front-matter leaves it out.
const DEFAULT_CATEGORY: &str = "Development";

/// Reads markdown posts from a directory, one file per post; the
/// filename minus extension is the slug.
///
/// The store holds no cache and no state beyond its configuration:
/// every call re-reads disk.
#[derive(Debug, Clone)]
pub struct ContentStore {
    dir: PathBuf,
    default_author: String,
}

impl ContentStore {
    /// The directory and fallback author are explicit configuration,
    /// never ambient process state.
    pub fn new(dir: impl Into<PathBuf>, default_author: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            default_author: default_author.into(),
        }
    }

    /// Every recognized file in the directory, ordered by date
    /// descending; ties keep reverse filename order.
    ///
    /// A missing directory yields an empty list - a store with zero
    /// posts is a valid state, not an error. A file that fails to read
    /// or parse is skipped; it never breaks the rest of the listing.
    pub fn list_all(&self) -> Vec<BlogPost> {
        if !self.dir.is_dir() {
            return Vec::new();
        }

        let mut files: Vec<PathBuf> = WalkDir::new(&self.dir)
            .max_depth(1)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .map(|e| e.into_path())
            .filter(|p| is_content_file(p))
            .collect();
        files.sort();
        files.reverse();

        let mut posts: Vec<BlogPost> = files
            .iter()
            .filter_map(|path| match self.load(path) {
                Ok(post) => Some(post),
                Err(e) => {
                    tracing::warn!("Skipping content file {:?}: {}", path, e);
                    None
                }
            })
            .collect();

        // Stable sort: equal dates keep the reverse filename order from above.
        posts.sort_by(|a, b| b.date.cmp(&a.date));
        posts
    }

    /// Locate a single post by slug, probing extensions in priority
    /// order. Absence, a read error, and malformed front-matter all
    /// yield `None`; this never fails.
    pub fn get_by_slug(&self, slug: &str) -> Option<BlogPost> {
        let slug = slug.strip_suffix(".md").unwrap_or(slug);

        for ext in EXTENSIONS {
            let path = self.dir.join(format!("{slug}.{ext}"));
            if !path.is_file() {
                continue;
            }
            return match self.load(&path) {
                Ok(post) => Some(post),
                Err(e) => {
                    tracing::warn!("Failed to load post {:?}: {}", path, e);
                    None
                }
            };
        }

        None
    }

    /// Posts in one category, case-insensitively.
    pub fn posts_by_category(&self, category: &str) -> Vec<BlogPost> {
        query::by_category(self.list_all(), category)
    }

    /// Posts carrying one tag, case-insensitively.
    pub fn posts_by_tag(&self, tag: &str) -> Vec<BlogPost> {
        query::by_tag(self.list_all(), tag)
    }

    /// Derived category aggregates, first-seen order.
    pub fn categories(&self) -> Vec<Category> {
        query::categories(&self.list_all())
    }

    /// All tags across the post set, sorted ascending.
    pub fn tags(&self) -> Vec<String> {
        query::tags(&self.list_all())
    }

    /// Listing filter: category and free-text compose with AND.
    pub fn search(&self, category: Option<&str>, text: Option<&str>) -> Vec<BlogPost> {
        query::filter(self.list_all(), category, text)
    }

    fn load(&self, path: &Path) -> Result<BlogPost, ContentError> {
        let raw = fs::read_to_string(path)?;
        let (fm, body) = FrontMatter::parse(&raw)?;

        let slug = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_string();

        Ok(BlogPost {
            slug,
            title: fm.title.unwrap_or_default(),
            excerpt: fm.excerpt.unwrap_or_default(),
            content: body.to_string(),
            date: fm.date.unwrap_or_default(),
            author: fm.author.unwrap_or_else(|| self.default_author.clone()),
            category: fm.category.unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            tags: fm.tags,
            reading_time: reading_time(body),
            image: fm.image,
        })
    }
}

/// Check if a file carries a recognized content extension.
fn is_content_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| EXTENSIONS.contains(&e))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn write_post(dir: &Path, name: &str, date: &str) {
        let title = name.trim_end_matches(".md");
        let body = format!(
            "---\ntitle: {title}\ndate: \"{date}\"\ncategory: Backend\ntags:\n  - rust\n---\n\nSome body text.\n"
        );
        fs::write(dir.join(name), body).unwrap();
    }

    #[test]
    fn list_all_sorts_by_date_descending() {
        let tmp = tempfile::tempdir().unwrap();
        write_post(tmp.path(), "a.md", "2024-01-10");
        write_post(tmp.path(), "b.md", "2024-01-15");

        let store = ContentStore::new(tmp.path(), "owner");
        let posts = store.list_all();

        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].slug, "b");
        assert_eq!(posts[1].slug, "a");
        assert!(posts[0].date >= posts[1].date);
    }

    #[test]
    fn date_ties_keep_reverse_filename_order() {
        let tmp = tempfile::tempdir().unwrap();
        write_post(tmp.path(), "alpha.md", "2024-02-01");
        write_post(tmp.path(), "beta.md", "2024-02-01");

        let store = ContentStore::new(tmp.path(), "owner");
        let slugs: Vec<_> = store.list_all().into_iter().map(|p| p.slug).collect();

        assert_eq!(slugs, vec!["beta", "alpha"]);
    }

    #[test]
    fn missing_directory_is_an_empty_store() {
        let store = ContentStore::new("/nonexistent/content", "owner");
        assert!(store.list_all().is_empty());
        assert!(store.get_by_slug("anything").is_none());
    }

    #[test]
    fn unrecognized_extensions_are_ignored() {
        let tmp = tempfile::tempdir().unwrap();
        write_post(tmp.path(), "real.md", "2024-01-01");
        fs::write(tmp.path().join("notes.txt"), "not a post").unwrap();

        let store = ContentStore::new(tmp.path(), "owner");
        assert_eq!(store.list_all().len(), 1);
    }

    #[test]
    fn one_bad_file_does_not_break_the_listing() {
        let tmp = tempfile::tempdir().unwrap();
        write_post(tmp.path(), "good.md", "2024-01-01");
        fs::write(tmp.path().join("bad.md"), "---\ntitle: [unclosed\n---\n").unwrap();

        let store = ContentStore::new(tmp.path(), "owner");
        let posts = store.list_all();

        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].slug, "good");
    }

    #[test]
    fn get_by_slug_returns_matching_slug() {
        let tmp = tempfile::tempdir().unwrap();
        write_post(tmp.path(), "hello-world.md", "2024-03-01");

        let store = ContentStore::new(tmp.path(), "owner");
        let post = store.get_by_slug("hello-world").unwrap();

        assert_eq!(post.slug, "hello-world");
        assert_eq!(post.title, "hello-world");
    }

    #[test]
    fn get_by_slug_strips_md_suffix() {
        let tmp = tempfile::tempdir().unwrap();
        write_post(tmp.path(), "hello.md", "2024-03-01");

        let store = ContentStore::new(tmp.path(), "owner");
        assert!(store.get_by_slug("hello.md").is_some());
    }

    #[test]
    fn get_by_slug_falls_back_to_mdx() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(
            tmp.path().join("interactive.mdx"),
            "---\ntitle: Interactive\n---\nBody\n",
        )
        .unwrap();

        let store = ContentStore::new(tmp.path(), "owner");
        let post = store.get_by_slug("interactive").unwrap();
        assert_eq!(post.title, "Interactive");
    }

    #[test]
    fn get_by_slug_swallows_malformed_files() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("broken.md"), "---\ntitle: [oops\n---\n").unwrap();

        let store = ContentStore::new(tmp.path(), "owner");
        assert!(store.get_by_slug("broken").is_none());
    }

    #[test]
    fn missing_front_matter_fields_fall_back_to_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("bare.md"), "Just a body.\n").unwrap();

        let store = ContentStore::new(tmp.path(), "Site Owner");
        let post = store.get_by_slug("bare").unwrap();

        assert_eq!(post.title, "");
        assert_eq!(post.author, "Site Owner");
        assert_eq!(post.category, "Development");
        assert!(post.tags.is_empty());
        assert!(post.image.is_none());
        assert_eq!(post.reading_time, "1 min read");
        assert_eq!(post.content, "Just a body.\n");
    }
}
