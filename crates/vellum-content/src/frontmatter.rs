//! Front-matter parsing.

use serde::{Deserialize, Deserializer};

use crate::ContentError;

/// Handles `tags: rust` as well as a proper YAML list.
fn string_or_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, SeqAccess, Visitor};
    use std::fmt;

    struct StringOrVec;

    impl<'de> Visitor<'de> for StringOrVec {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or a list of strings")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value.to_string()])
        }

        fn visit_seq<S>(self, mut seq: S) -> Result<Self::Value, S::Error>
        where
            S: SeqAccess<'de>,
        {
            let mut vec = Vec::new();
            while let Some(item) = seq.next_element::<String>()? {
                vec.push(item);
            }
            Ok(vec)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(StringOrVec)
}

/// Metadata block at the top of a content file.
///
/// Every field is optional; the store applies a fixed default mapping
/// for whatever is missing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub excerpt: Option<String>,
    pub date: Option<String>,
    pub author: Option<String>,
    pub category: Option<String>,
    #[serde(deserialize_with = "string_or_vec")]
    pub tags: Vec<String>,
    pub image: Option<String>,
}

impl FrontMatter {
    /// Split a file into front-matter metadata and body text.
    ///
    /// A file without an opening `---` fence has no front-matter; the
    /// whole content is the body. An opening fence without a closing one
    /// is malformed.
    pub fn parse(content: &str) -> Result<(Self, &str), ContentError> {
        let content = content.trim_start_matches('\u{feff}');

        let Some(rest) = content.strip_prefix("---") else {
            return Ok((FrontMatter::default(), content));
        };
        let rest = rest.trim_start_matches(['\r', '\n']);

        let Some(end) = rest.find("\n---") else {
            return Err(ContentError::Unterminated);
        };

        let yaml = &rest[..end];
        let body = rest[end + 4..].trim_start_matches(['\r', '\n']);

        if yaml.trim().is_empty() {
            return Ok((FrontMatter::default(), body));
        }

        let fm = serde_yaml::from_str::<FrontMatter>(yaml)?;
        Ok((fm, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_yaml_front_matter() {
        let content = r#"---
title: Hello World
excerpt: A short greeting
date: "2024-01-15"
category: Backend
tags:
  - rust
  - actix
---

This is the content.
"#;

        let (fm, body) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title.as_deref(), Some("Hello World"));
        assert_eq!(fm.date.as_deref(), Some("2024-01-15"));
        assert_eq!(fm.category.as_deref(), Some("Backend"));
        assert_eq!(fm.tags, vec!["rust", "actix"]);
        assert!(body.starts_with("This is the content."));
    }

    #[test]
    fn no_fence_means_no_front_matter() {
        let (fm, body) = FrontMatter::parse("Just a body.\n").unwrap();
        assert!(fm.title.is_none());
        assert!(fm.tags.is_empty());
        assert_eq!(body, "Just a body.\n");
    }

    #[test]
    fn single_string_tags() {
        let content = "---\ntitle: One Tag\ntags: notes\n---\nBody\n";

        let (fm, _) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.tags, vec!["notes"]);
    }

    #[test]
    fn unterminated_fence_is_malformed() {
        let content = "---\ntitle: Broken\nno closing fence";

        let err = FrontMatter::parse(content).unwrap_err();
        assert!(matches!(err, ContentError::Unterminated));
    }

    #[test]
    fn invalid_yaml_is_malformed() {
        let content = "---\ntitle: [unclosed\n---\nBody\n";

        assert!(matches!(
            FrontMatter::parse(content),
            Err(ContentError::FrontMatter(_))
        ));
    }

    #[test]
    fn empty_fence_yields_defaults() {
        let content = "---\n\n---\nBody here.\n";

        let (fm, body) = FrontMatter::parse(content).unwrap();
        assert!(fm.title.is_none());
        assert_eq!(body, "Body here.\n");
    }
}
