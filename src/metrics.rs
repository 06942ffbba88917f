// src/metrics.rs
//! Per-run metrics record plus Prometheus counters.

use axum::{routing::get, Router};
use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

pub const FILTER_METHOD: &str = "rule_based";

/// Counts and strategy tags for one `filter_posts` run.
/// `Default` is the empty record returned when nothing was recorded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunMetrics {
    pub posts_analyzed: usize,
    pub posts_filtered: usize,
    pub results_returned: usize,
    pub summaries_generated: usize,
    pub filter_method: String,
    pub summary_method: String,
}

impl RunMetrics {
    /// Fresh record for a run over `posts` documents.
    pub fn start(posts: usize, summary_method: &str) -> Self {
        Self {
            posts_analyzed: posts,
            filter_method: FILTER_METHOD.to_string(),
            summary_method: summary_method.to_string(),
            ..Self::default()
        }
    }
}

/// One-time metrics registration (so series show up on /metrics).
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("lead_filter_runs_total", "Filtering runs started.");
        describe_counter!(
            "lead_filter_posts_analyzed_total",
            "Posts received for scoring."
        );
        describe_counter!(
            "lead_filter_posts_filtered_total",
            "Posts at or above the relevance threshold."
        );
        describe_counter!("lead_filter_leads_total", "Leads returned to callers.");
        describe_counter!(
            "lead_filter_lead_build_errors_total",
            "Posts skipped because lead construction failed."
        );
        describe_counter!(
            "lead_filter_summary_fallback_total",
            "Runs where the summary step fell back to templated summaries."
        );
        describe_counter!(
            "lead_filter_degraded_runs_total",
            "Runs that failed and returned an empty lead list."
        );
        describe_histogram!("lead_filter_run_ms", "Run duration in milliseconds.");
    });
}

/// Extra facts about a run that are not part of `RunMetrics`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunFlags {
    pub build_errors: usize,
    pub summary_fell_back: bool,
    pub degraded: bool,
    pub elapsed_ms: f64,
}

pub fn record_run(m: &RunMetrics, flags: RunFlags) {
    ensure_metrics_described();
    counter!("lead_filter_runs_total").increment(1);
    counter!("lead_filter_posts_analyzed_total").increment(m.posts_analyzed as u64);
    counter!("lead_filter_posts_filtered_total").increment(m.posts_filtered as u64);
    counter!("lead_filter_leads_total").increment(m.results_returned as u64);
    if flags.build_errors > 0 {
        counter!("lead_filter_lead_build_errors_total").increment(flags.build_errors as u64);
    }
    if flags.summary_fell_back {
        counter!("lead_filter_summary_fallback_total").increment(1);
    }
    if flags.degraded {
        counter!("lead_filter_degraded_runs_total").increment(1);
    }
    histogram!("lead_filter_run_ms").record(flags.elapsed_ms);
}

/// Prometheus recorder. Only one recorder can be installed per process;
/// later calls reuse the first handle.
#[derive(Clone)]
pub struct Prometheus {
    pub handle: PrometheusHandle,
}

impl Prometheus {
    pub fn install() -> Option<Self> {
        static HANDLE: OnceCell<Option<PrometheusHandle>> = OnceCell::new();
        HANDLE
            .get_or_init(|| PrometheusBuilder::new().install_recorder().ok())
            .clone()
            .map(|handle| {
                ensure_metrics_described();
                Self { handle }
            })
    }

    pub fn render(&self) -> String {
        self.handle.render()
    }

    /// Returns a router exposing `/metrics` with the Prometheus exposition format.
    pub fn router(&self) -> Router {
        let handle = self.handle.clone();
        Router::new().route(
            "/metrics",
            get(move || {
                let h = handle.clone();
                async move { h.render() }
            }),
        )
    }
}
