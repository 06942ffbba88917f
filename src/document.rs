// src/document.rs
//! Input posts and the explicit (document, relevance) pairing passed between stages.

use serde::{Deserialize, Deserializer, Serialize};

use crate::scoring::Relevance;

/// One social-media post as supplied by the caller. Missing fields default to empty/zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Document {
    pub title: String,
    pub content: String,
    pub subreddit: String,
    pub permalink: String,
    pub author: String,
    /// Unix seconds. Accepts integer or float JSON numbers (floats are truncated).
    #[serde(deserialize_with = "de_unix_seconds")]
    pub created_utc: i64,
    /// The source platform's own score (upvotes etc.).
    pub score: i64,
}

impl Document {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            ..Self::default()
        }
    }

    /// Lowercased `title + " " + content`, the text every matcher runs against.
    pub fn search_text(&self) -> String {
        format!("{} {}", self.title, self.content).to_lowercase()
    }
}

fn de_unix_seconds<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(i64),
        Float(f64),
    }
    Ok(match Raw::deserialize(deserializer)? {
        Raw::Int(v) => v,
        Raw::Float(v) => v as i64,
    })
}

/// A borrowed document paired with the relevance computed for it.
/// Downstream stages read the score from here; the document itself is never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredDocument<'a> {
    pub document: &'a Document,
    pub relevance: Relevance,
}

impl<'a> ScoredDocument<'a> {
    pub fn new(document: &'a Document, relevance: Relevance) -> Self {
        Self {
            document,
            relevance,
        }
    }

    pub fn score(&self) -> u32 {
        self.relevance.score
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_text_joins_title_and_content_lowercased() {
        let d = Document::new("Need HELP", "With Leads");
        assert_eq!(d.search_text(), "need help with leads");
        assert_eq!(Document::default().search_text(), " ");
    }

    #[test]
    fn deserializes_partial_posts_and_float_timestamps() {
        let d: Document = serde_json::from_str(
            r#"{"title":"t","created_utc":1699999999.0,"subreddit":"smallbusiness"}"#,
        )
        .unwrap();
        assert_eq!(d.title, "t");
        assert_eq!(d.content, "");
        assert_eq!(d.created_utc, 1_699_999_999);
        assert_eq!(d.score, 0);
        assert_eq!(d.subreddit, "smallbusiness");
    }
}
