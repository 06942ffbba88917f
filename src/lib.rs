// src/lib.rs
// Public library surface for the binary and integration tests.

pub mod api;
pub mod config;
pub mod debug;
pub mod document;
pub mod keywords;
pub mod lead;
pub mod metrics;
pub mod pipeline;
pub mod scoring;
pub mod summary;
pub mod text;
pub mod threshold;

// ---- Re-exports for stable public API ----
pub use crate::api::create_router;
pub use crate::config::FilterConfig;
pub use crate::document::{Document, ScoredDocument};
pub use crate::keywords::{CategoryKeywords, KeywordEnhancer, KeywordSet, KeywordSource};
pub use crate::lead::{Lead, LeadError, UrgencyLevel};
pub use crate::metrics::RunMetrics;
pub use crate::pipeline::{FilterOutcome, FilterPipeline};
pub use crate::scoring::{Relevance, RelevanceScorer, ScoringWeights};
pub use crate::summary::{BatchSummarizer, SummaryAnnotator};
