// src/summary.rs
//! Short human-readable summaries for leads.
//!
//! Default strategy is lexical: the problem-description words that also occur as
//! exact tokens in the lead title. An optional `BatchSummarizer` (e.g. a remote
//! LLM client owned by the surrounding application) can replace it. Whatever the
//! strategy, a failure switches the whole batch to the templated fallback.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{info, warn};

use crate::lead::{Lead, ELLIPSIS};
use crate::text::{lowercase_words, truncate_chars};

pub const LEXICAL_METHOD: &str = "lexical";
pub const FALLBACK_METHOD: &str = "fallback";

/// External summarization source: one summary per lead, in order.
/// Returning fewer summaries than leads is allowed; the rest get the fallback.
pub trait BatchSummarizer: Send + Sync {
    fn summarize_batch(&self, leads: &[Lead], problem_description: &str)
        -> anyhow::Result<Vec<String>>;

    /// Reported as `summary_method` in run metrics.
    fn name(&self) -> &'static str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryConfig {
    pub title_chars: usize,
    pub fallback_title_chars: usize,
    /// Max leads sent to a batch summarizer per run.
    pub batch_limit: usize,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            title_chars: 80,
            fallback_title_chars: 100,
            batch_limit: 10,
        }
    }
}

/// Problem words (deduplicated, in problem order) that are exact tokens of the title.
pub fn matching_words(title: &str, problem_description: &str) -> Vec<String> {
    let title_words: HashSet<String> = lowercase_words(title).into_iter().collect();
    let mut seen = HashSet::new();
    lowercase_words(problem_description)
        .into_iter()
        .filter(|w| title_words.contains(w) && seen.insert(w.clone()))
        .collect()
}

pub fn lexical_summary(title: &str, problem_description: &str, title_chars: usize) -> String {
    let matches = matching_words(title, problem_description);
    if matches.is_empty() {
        return fallback_summary(title, problem_description, title_chars);
    }
    format!(
        "Post about {} - {}{ELLIPSIS}",
        matches.join(", "),
        truncate_chars(title, title_chars)
    )
}

pub fn fallback_summary(title: &str, problem_description: &str, title_chars: usize) -> String {
    format!(
        "Post about {} - {}{ELLIPSIS}",
        problem_description.to_lowercase(),
        truncate_chars(title, title_chars)
    )
}

/// Attach a lexical summary (80-char title) to one lead.
pub fn annotate(mut lead: Lead, problem_description: &str) -> Lead {
    lead.ai_summary = lexical_summary(
        &lead.title,
        problem_description,
        SummaryConfig::default().title_chars,
    );
    lead
}

/// What the annotator did for one batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryReport {
    pub method: String,
    pub generated: usize,
    pub fell_back: bool,
}

#[derive(Clone, Default)]
pub struct SummaryAnnotator {
    config: SummaryConfig,
    summarizer: Option<Arc<dyn BatchSummarizer>>,
}

impl SummaryAnnotator {
    pub fn new(config: SummaryConfig) -> Self {
        Self {
            config,
            summarizer: None,
        }
    }

    pub fn with_summarizer(mut self, summarizer: Arc<dyn BatchSummarizer>) -> Self {
        self.summarizer = Some(summarizer);
        self
    }

    /// Tag of the strategy this annotator will try first.
    pub fn method(&self) -> &'static str {
        self.summarizer
            .as_ref()
            .map(|s| s.name())
            .unwrap_or(LEXICAL_METHOD)
    }

    /// Fill `ai_summary` on every lead. Never fails: errors degrade to the fallback form.
    pub fn annotate_all(&self, leads: &mut [Lead], problem_description: &str) -> SummaryReport {
        match self.try_annotate_all(leads, problem_description) {
            Ok(generated) => {
                info!(target: "lead_filter", method = self.method(), generated, total = leads.len(), "summaries attached");
                SummaryReport {
                    method: self.method().to_string(),
                    generated,
                    fell_back: false,
                }
            }
            Err(e) => {
                warn!(target: "lead_filter", error = %e, method = self.method(), "summary step failed; using fallback summaries");
                for lead in leads.iter_mut() {
                    lead.ai_summary = fallback_summary(
                        &lead.title,
                        problem_description,
                        self.config.fallback_title_chars,
                    );
                }
                SummaryReport {
                    method: FALLBACK_METHOD.to_string(),
                    generated: 0,
                    fell_back: true,
                }
            }
        }
    }

    fn try_annotate_all(&self, leads: &mut [Lead], problem: &str) -> anyhow::Result<usize> {
        let Some(summarizer) = &self.summarizer else {
            for lead in leads.iter_mut() {
                lead.ai_summary = lexical_summary(&lead.title, problem, self.config.title_chars);
            }
            return Ok(leads.len());
        };

        let limit = self.config.batch_limit.min(leads.len());
        let summaries = summarizer.summarize_batch(&leads[..limit], problem)?;

        let mut generated = 0usize;
        for (i, lead) in leads.iter_mut().enumerate() {
            match summaries.get(i).filter(|_| i < limit) {
                Some(s) => {
                    lead.ai_summary = s.clone();
                    generated += 1;
                }
                None => {
                    lead.ai_summary =
                        fallback_summary(&lead.title, problem, self.config.fallback_title_chars);
                }
            }
        }
        Ok(generated)
    }
}
