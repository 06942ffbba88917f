// src/lead.rs
//! Normalized lead records built from retained documents.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

use crate::document::ScoredDocument;
use crate::text::truncate_chars;

pub const SNIPPET_CHARS: usize = 200;
pub const ELLIPSIS: &str = "...";
pub const DEFAULT_PROBLEM_CATEGORY: &str = "General";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum UrgencyLevel {
    Low,
    #[default]
    Medium,
    High,
}

impl fmt::Display for UrgencyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            UrgencyLevel::Low => "Low",
            UrgencyLevel::Medium => "Medium",
            UrgencyLevel::High => "High",
        };
        f.write_str(s)
    }
}

/// A qualifying post, ready for the caller. `ai_relevance_score` is the score the
/// document had when the lead was built and is never recomputed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lead {
    pub title: String,
    pub subreddit: String,
    pub snippet: String,
    pub permalink: String,
    pub author: String,
    pub created_utc: i64,
    pub score: i64,
    pub matched_keywords: Vec<String>,
    pub ai_relevance_score: u32,
    pub urgency_level: UrgencyLevel,
    pub business_context: String,
    pub problem_category: String,
    pub ai_summary: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LeadError {
    #[error("post {permalink:?} has a negative created_utc ({created_utc})")]
    NegativeTimestamp { permalink: String, created_utc: i64 },
}

/// First 200 characters of `content`, with "..." appended only when something was cut.
pub fn snippet(content: &str) -> String {
    let head = truncate_chars(content, SNIPPET_CHARS);
    if head.len() < content.len() {
        format!("{head}{ELLIPSIS}")
    } else {
        content.to_string()
    }
}

pub fn build_lead(scored: &ScoredDocument<'_>, business_category: &str) -> Result<Lead, LeadError> {
    let doc = scored.document;
    if doc.created_utc < 0 {
        return Err(LeadError::NegativeTimestamp {
            permalink: doc.permalink.clone(),
            created_utc: doc.created_utc,
        });
    }

    Ok(Lead {
        title: doc.title.clone(),
        subreddit: doc.subreddit.clone(),
        snippet: snippet(&doc.content),
        permalink: doc.permalink.clone(),
        author: doc.author.clone(),
        created_utc: doc.created_utc,
        score: doc.score,
        matched_keywords: Vec::new(),
        ai_relevance_score: scored.score(),
        urgency_level: UrgencyLevel::default(),
        business_context: business_category.to_string(),
        problem_category: DEFAULT_PROBLEM_CATEGORY.to_string(),
        ai_summary: String::new(),
    })
}

/// Build leads in order. Documents that fail are logged and skipped.
/// Returns the leads and the number of skipped documents.
pub fn build_leads(scored: &[ScoredDocument<'_>], business_category: &str) -> (Vec<Lead>, usize) {
    let mut leads = Vec::with_capacity(scored.len());
    let mut skipped = 0usize;
    for s in scored {
        match build_lead(s, business_category) {
            Ok(lead) => leads.push(lead),
            Err(e) => {
                skipped += 1;
                warn!(target: "lead_filter", error = %e, "skipping post: lead construction failed");
            }
        }
    }
    (leads, skipped)
}
