// src/pipeline.rs
//! Filtering pipeline: keywords → score → threshold → leads → summaries → metrics.
//!
//! A run never fails from the caller's point of view. Collaborator errors end the run
//! early as `FilterOutcome::Degraded`, which carries the metrics recorded so far and
//! flattens to an empty lead list in `filter_posts`.

use std::sync::{Arc, RwLock};
use std::time::Instant;
use tracing::{error, info};

use crate::config::FilterConfig;
use crate::debug::{anon_hash, dev_log_post};
use crate::document::Document;
use crate::keywords::{resolve_keyword_set, KeywordEnhancer, KeywordSource};
use crate::lead::{build_leads, Lead};
use crate::metrics::{record_run, RunFlags, RunMetrics};
use crate::scoring::RelevanceScorer;
use crate::summary::{BatchSummarizer, SummaryAnnotator};
use crate::threshold::{filter_by_threshold, ScoreStats};

/// Result of one run: either the leads, or a degraded empty result with partial metrics.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterOutcome {
    Completed {
        leads: Vec<Lead>,
        metrics: RunMetrics,
    },
    Degraded {
        error: String,
        metrics: RunMetrics,
    },
}

impl FilterOutcome {
    pub fn leads(&self) -> &[Lead] {
        match self {
            FilterOutcome::Completed { leads, .. } => leads,
            FilterOutcome::Degraded { .. } => &[],
        }
    }

    pub fn metrics(&self) -> &RunMetrics {
        match self {
            FilterOutcome::Completed { metrics, .. } | FilterOutcome::Degraded { metrics, .. } => {
                metrics
            }
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, FilterOutcome::Degraded { .. })
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            FilterOutcome::Degraded { error, .. } => Some(error),
            FilterOutcome::Completed { .. } => None,
        }
    }

    pub fn into_parts(self) -> (Vec<Lead>, RunMetrics) {
        match self {
            FilterOutcome::Completed { leads, metrics } => (leads, metrics),
            FilterOutcome::Degraded { metrics, .. } => (Vec::new(), metrics),
        }
    }
}

pub struct FilterPipeline {
    keywords: Arc<dyn KeywordSource>,
    enhancer: Arc<dyn KeywordEnhancer>,
    scorer: RelevanceScorer,
    threshold: u32,
    annotator: SummaryAnnotator,
    // Most recent run only; last writer wins.
    last_metrics: RwLock<Option<RunMetrics>>,
}

impl FilterPipeline {
    pub fn new(
        config: &FilterConfig,
        keywords: Arc<dyn KeywordSource>,
        enhancer: Arc<dyn KeywordEnhancer>,
    ) -> Self {
        let mut scorer = RelevanceScorer::new(config.weights);
        if let Some(list) = &config.filter.struggle_indicators {
            scorer = scorer.with_struggle_indicators(list.clone());
        }
        info!(
            target: "lead_filter",
            threshold = config.filter.threshold,
            indicators = scorer.struggle_indicators().len(),
            "filter pipeline initialized"
        );
        Self {
            keywords,
            enhancer,
            scorer,
            threshold: config.filter.threshold,
            annotator: SummaryAnnotator::new(config.summary),
            last_metrics: RwLock::new(None),
        }
    }

    /// Route summaries through an external batch summarizer instead of the lexical strategy.
    pub fn with_summarizer(mut self, summarizer: Arc<dyn BatchSummarizer>) -> Self {
        self.annotator = self.annotator.with_summarizer(summarizer);
        self
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    pub fn scorer(&self) -> &RelevanceScorer {
        &self.scorer
    }

    /// Metrics of the most recent run on this instance, if any.
    pub fn last_metrics(&self) -> Option<RunMetrics> {
        self.last_metrics.read().ok().and_then(|g| g.clone())
    }

    /// Flat form of `run`: degraded runs yield no leads.
    pub fn filter_posts(
        &self,
        documents: &[Document],
        problem_description: &str,
        business_category: &str,
        industry_category: Option<&str>,
    ) -> (Vec<Lead>, RunMetrics) {
        self.run(documents, problem_description, business_category, industry_category)
            .into_parts()
    }

    pub fn run(
        &self,
        documents: &[Document],
        problem_description: &str,
        business_category: &str,
        industry_category: Option<&str>,
    ) -> FilterOutcome {
        let started = Instant::now();
        info!(
            target: "lead_filter",
            posts = documents.len(),
            problem_id = %anon_hash(problem_description),
            business = business_category,
            industry = industry_category.unwrap_or("-"),
            "filtering started"
        );

        let mut metrics = RunMetrics::start(documents.len(), self.annotator.method());
        self.store_metrics(&metrics);
        let mut flags = RunFlags::default();

        let result = self.execute(
            documents,
            problem_description,
            business_category,
            industry_category,
            &mut metrics,
            &mut flags,
        );

        flags.elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
        let outcome = match result {
            Ok(leads) => {
                info!(target: "lead_filter", leads = leads.len(), "filtering complete");
                FilterOutcome::Completed {
                    leads,
                    metrics: metrics.clone(),
                }
            }
            Err(e) => {
                error!(target: "lead_filter", error = %format!("{e:#}"), "filtering failed; returning empty result");
                flags.degraded = true;
                FilterOutcome::Degraded {
                    error: format!("{e:#}"),
                    metrics: metrics.clone(),
                }
            }
        };

        self.store_metrics(&metrics);
        record_run(&metrics, flags);
        outcome
    }

    fn execute(
        &self,
        documents: &[Document],
        problem: &str,
        business: &str,
        industry: Option<&str>,
        metrics: &mut RunMetrics,
        flags: &mut RunFlags,
    ) -> anyhow::Result<Vec<Lead>> {
        // 1) Keywords
        let keywords = resolve_keyword_set(
            self.keywords.as_ref(),
            self.enhancer.as_ref(),
            problem,
            business,
            industry,
        )?;
        info!(
            target: "lead_filter",
            business,
            total = keywords.len(),
            enhanced = keywords.enhanced().len(),
            preview = ?keywords.preview(10),
            "keywords resolved"
        );

        // 2) Score
        let scored = self.scorer.score_all(documents, &keywords, problem);
        for s in &scored {
            dev_log_post(
                "scored",
                &s.document.permalink,
                &s.relevance.matched,
                s.score(),
                self.threshold,
            );
        }
        let stats = ScoreStats::from_scores(scored.iter().map(|s| s.score()));

        // 3) Threshold + rank
        let filtered = filter_by_threshold(scored, self.threshold);
        metrics.posts_filtered = filtered.len();
        let top: Vec<u32> = filtered.iter().take(5).map(|s| s.score()).collect();
        info!(
            target: "lead_filter",
            min = stats.min,
            max = stats.max,
            avg = stats.avg,
            kept = filtered.len(),
            of = documents.len(),
            threshold = self.threshold,
            top = ?top,
            "score distribution"
        );

        // 4) Leads
        let (mut leads, skipped) = build_leads(&filtered, business);
        flags.build_errors = skipped;
        metrics.results_returned = leads.len();

        // 5) Summaries
        if !leads.is_empty() {
            let report = self.annotator.annotate_all(&mut leads, problem);
            metrics.summary_method = report.method;
            metrics.summaries_generated = report.generated;
            flags.summary_fell_back = report.fell_back;
        }

        Ok(leads)
    }

    fn store_metrics(&self, m: &RunMetrics) {
        if let Ok(mut guard) = self.last_metrics.write() {
            *guard = Some(m.clone());
        }
    }
}
