// src/api.rs
//! HTTP surface around the pipeline: /health, /filter, /metrics/last, /metrics.

use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;

use crate::document::Document;
use crate::lead::Lead;
use crate::metrics::{Prometheus, RunMetrics};
use crate::pipeline::FilterPipeline;

#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<FilterPipeline>,
}

pub fn create_router(state: AppState) -> Router {
    let router = Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/filter", post(filter))
        .route("/metrics/last", get(last_metrics))
        .with_state(state);

    let router = match Prometheus::install() {
        Some(prom) => router.merge(prom.router()),
        None => router,
    };

    router.layer(CorsLayer::very_permissive())
}

#[derive(Debug, Deserialize)]
pub struct FilterReq {
    #[serde(default)]
    pub posts: Vec<Document>,
    pub problem_description: String,
    pub business_type: String,
    #[serde(default)]
    pub industry_type: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FilterResp {
    pub leads: Vec<Lead>,
    pub metrics: RunMetrics,
    pub degraded: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

async fn filter(State(state): State<AppState>, Json(body): Json<FilterReq>) -> Json<FilterResp> {
    let outcome = state.pipeline.run(
        &body.posts,
        &body.problem_description,
        &body.business_type,
        body.industry_type.as_deref(),
    );
    let degraded = outcome.is_degraded();
    let error = outcome.error().map(str::to_string);
    let (leads, metrics) = outcome.into_parts();
    Json(FilterResp {
        leads,
        metrics,
        degraded,
        error,
    })
}

async fn last_metrics(State(state): State<AppState>) -> Json<Option<RunMetrics>> {
    Json(state.pipeline.last_metrics())
}
