//! Lead filter service — binary entrypoint.
//! Loads config + category tables, builds the pipeline and serves the Axum router.

use std::sync::Arc;

use shuttle_axum::ShuttleAxum;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use lead_relevance_filter::api::{self, AppState};
use lead_relevance_filter::config::FilterConfig;
use lead_relevance_filter::keywords::{CategoryKeywords, NoEnhancement};
use lead_relevance_filter::pipeline::FilterPipeline;

/// Compact logs filtered by RUST_LOG (default `lead_filter=info,warn`).
/// The runtime may already have installed a subscriber; then this is a no-op.
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("lead_filter=info,warn"));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .try_init();
}

#[shuttle_runtime::main]
async fn axum() -> ShuttleAxum {
    // Load .env in local/dev; no-op in prod environments.
    let _ = dotenvy::dotenv();

    init_tracing();

    let config = FilterConfig::load()?;
    let categories = CategoryKeywords::load()?;

    let pipeline = FilterPipeline::new(&config, Arc::new(categories), Arc::new(NoEnhancement));
    let state = AppState {
        pipeline: Arc::new(pipeline),
    };
    let router = api::create_router(state);

    Ok(router.into())
}
