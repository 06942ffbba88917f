// src/scoring.rs
//! Keyword-weighted relevance scoring.
//!
//! Every matcher is a plain substring test against `lowercase(title + " " + content)`.
//! Nothing is word-boundary aware: "client" also hits "clientele". Each term counts
//! once (presence, not frequency).
//!
//! Contributions per matched term (defaults):
//! - category keyword ............ 3
//! - struggle indicator phrase ... 2
//! - enhanced keyword ............ 4
//! - problem word (len > 3) ...... 1

use serde::{Deserialize, Serialize};

use crate::document::{Document, ScoredDocument};
use crate::keywords::KeywordSet;
use crate::text::lowercase_words;

/// Phrases that signal the author is asking for help or describing difficulty.
pub const DEFAULT_STRUGGLE_INDICATORS: &[&str] = &[
    "struggling",
    "help",
    "can't",
    "cannot",
    "can not",
    "trouble",
    "problem",
    "issue",
    "stuck",
    "frustrated",
    "overwhelmed",
    "desperate",
    "urgent",
    "failing",
    "lost",
    "losing",
    "declining",
    "first client",
    "first customer",
    "no customers",
    "no clients",
    "getting clients",
    "customer acquisition",
    "lead generation",
    "need help",
    "looking for",
    "how to",
    "what should",
    "any advice",
];

/// Points per matched term. Configurable under `[weights]` in the filter config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    pub business: u32,
    pub struggle: u32,
    pub enhanced: u32,
    pub problem_word: u32,
    /// Problem words must be strictly longer than this to count.
    pub min_problem_word_len: usize,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            business: 3,
            struggle: 2,
            enhanced: 4,
            problem_word: 1,
            min_problem_word_len: 3,
        }
    }
}

/// Score plus the terms that produced it ("keyword:client", "struggle:help", ...).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Relevance {
    pub score: u32,
    pub matched: Vec<String>,
}

/// Pure scoring function over already-lowercased search text.
pub fn score_text(
    text: &str,
    keywords: &KeywordSet,
    struggle_indicators: &[String],
    problem_description: &str,
    weights: &ScoringWeights,
) -> Relevance {
    let mut rel = Relevance::default();

    for kw in keywords.business() {
        if text.contains(kw.as_str()) {
            rel.score += weights.business;
            rel.matched.push(format!("keyword:{kw}"));
        }
    }

    for phrase in struggle_indicators {
        if text.contains(phrase.as_str()) {
            rel.score += weights.struggle;
            rel.matched.push(format!("struggle:{phrase}"));
        }
    }

    for kw in keywords.enhanced() {
        if text.contains(kw.as_str()) {
            rel.score += weights.enhanced;
            rel.matched.push(format!("enhanced:{kw}"));
        }
    }

    for word in lowercase_words(problem_description) {
        if word.chars().count() > weights.min_problem_word_len && text.contains(word.as_str()) {
            rel.score += weights.problem_word;
            rel.matched.push(format!("problem:{word}"));
        }
    }

    rel
}

/// Holds the weights and struggle-indicator list for a pipeline.
#[derive(Debug, Clone)]
pub struct RelevanceScorer {
    weights: ScoringWeights,
    struggle_indicators: Vec<String>,
}

impl Default for RelevanceScorer {
    fn default() -> Self {
        Self::new(ScoringWeights::default())
    }
}

impl RelevanceScorer {
    pub fn new(weights: ScoringWeights) -> Self {
        Self {
            weights,
            struggle_indicators: DEFAULT_STRUGGLE_INDICATORS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }

    /// Replace the built-in indicator list. Phrases are lowercased; empty ones dropped.
    pub fn with_struggle_indicators(mut self, indicators: Vec<String>) -> Self {
        self.struggle_indicators = indicators
            .into_iter()
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();
        self
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    pub fn struggle_indicators(&self) -> &[String] {
        &self.struggle_indicators
    }

    pub fn score(
        &self,
        document: &Document,
        keywords: &KeywordSet,
        problem_description: &str,
    ) -> Relevance {
        score_text(
            &document.search_text(),
            keywords,
            &self.struggle_indicators,
            problem_description,
            &self.weights,
        )
    }

    /// Score every document, preserving input order.
    pub fn score_all<'a>(
        &self,
        documents: &'a [Document],
        keywords: &KeywordSet,
        problem_description: &str,
    ) -> Vec<ScoredDocument<'a>> {
        documents
            .iter()
            .map(|d| ScoredDocument::new(d, self.score(d, keywords, problem_description)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kws(business: &[&str], enhanced: &[&str]) -> KeywordSet {
        KeywordSet::new(
            business.iter().map(|s| s.to_string()).collect(),
            enhanced.iter().map(|s| s.to_string()).collect(),
        )
    }

    #[test]
    fn first_client_post_scores_every_contribution() {
        let scorer = RelevanceScorer::default();
        let doc = Document::new(
            "Struggling to get my first client",
            "Any advice on getting clients?",
        );
        let r = scorer.score(&doc, &kws(&["client", "customer"], &[]), "getting clients");

        // keyword client (3) + struggling, first client, getting clients, any advice (4 x 2)
        // + problem words "getting", "clients" (2 x 1)
        assert_eq!(r.score, 13, "matched: {:?}", r.matched);
        assert!(r.matched.contains(&"keyword:client".to_string()));
        assert!(!r.matched.iter().any(|m| m == "keyword:customer"));
        assert!(r.matched.contains(&"struggle:first client".to_string()));
        assert!(r.matched.contains(&"problem:getting".to_string()));
    }

    #[test]
    fn presence_not_frequency() {
        let scorer = RelevanceScorer::default().with_struggle_indicators(vec![]);
        let doc = Document::new("seo seo seo", "seo everywhere");
        let r = scorer.score(&doc, &kws(&["seo"], &[]), "");
        assert_eq!(r.score, 3);
    }

    #[test]
    fn matching_is_substring_not_word_boundary() {
        let scorer = RelevanceScorer::default().with_struggle_indicators(vec![]);
        let doc = Document::new("Our clientele grew", "");
        let r = scorer.score(&doc, &kws(&["client"], &[]), "");
        assert_eq!(r.score, 3);
    }

    #[test]
    fn enhanced_keywords_weigh_four() {
        let scorer = RelevanceScorer::default().with_struggle_indicators(vec![]);
        let doc = Document::new("Cold outreach tips", "");
        let r = scorer.score(&doc, &kws(&[], &["cold outreach"]), "");
        assert_eq!(r.score, 4);
        assert_eq!(r.matched, vec!["enhanced:cold outreach"]);
    }

    #[test]
    fn short_problem_words_are_ignored_and_duplicates_count() {
        let scorer = RelevanceScorer::default().with_struggle_indicators(vec![]);
        let doc = Document::new("leads for a new shop", "");
        // "for", "new" too short; "leads" counted twice because it appears twice
        let r = scorer.score(&doc, &KeywordSet::default(), "LEADS for new leads");
        assert_eq!(r.score, 2);
    }

    #[test]
    fn keywords_match_case_insensitively() {
        let scorer = RelevanceScorer::default().with_struggle_indicators(vec![]);
        let doc = Document::new("SHOPIFY store", "");
        let r = scorer.score(&doc, &kws(&["Shopify"], &[]), "");
        assert_eq!(r.score, 3);
    }

    #[test]
    fn empty_document_scores_zero() {
        let scorer = RelevanceScorer::default();
        let r = scorer.score(&Document::default(), &kws(&["client"], &["leads"]), "getting clients");
        assert_eq!(r, Relevance::default());
    }

    #[test]
    fn custom_weights_are_applied() {
        let w = ScoringWeights {
            business: 10,
            struggle: 0,
            enhanced: 1,
            problem_word: 5,
            min_problem_word_len: 1,
        };
        let scorer = RelevanceScorer::new(w);
        let doc = Document::new("help me find a client", "");
        let r = scorer.score(&doc, &kws(&["client"], &["find"]), "me");
        // client 10 + help 0 + find 1 + "me" (len 2 > 1) 5
        assert_eq!(r.score, 16);
    }

    #[test]
    fn scoring_is_deterministic_and_order_preserving() {
        let scorer = RelevanceScorer::default();
        let docs = vec![
            Document::new("need help", "stuck"),
            Document::new("nothing here", ""),
        ];
        let set = kws(&["help"], &[]);
        let a = scorer.score_all(&docs, &set, "need help");
        let b = scorer.score_all(&docs, &set, "need help");
        assert_eq!(a, b);
        assert!(std::ptr::eq(a[0].document, &docs[0]));
        assert_eq!(a[1].score(), 0);
    }

    #[test]
    fn default_indicator_list_is_broad() {
        assert!(DEFAULT_STRUGGLE_INDICATORS.len() >= 20);
        assert!(DEFAULT_STRUGGLE_INDICATORS
            .iter()
            .all(|p| *p == p.to_lowercase()));
    }
}
