use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use crate::global::Global;
use crate::headlines::fallback;

pub mod headlines;

pub fn routes() -> Router<Arc<Global>> {
    Router::new()
        .route("/", get(root))
        .merge(headlines::routes())
}

#[derive(serde::Serialize)]
struct RootResponse {
    message: &'static str,
    version: &'static str,
    uptime: u64,
    endpoints: Vec<String>,
}

#[tracing::instrument(skip(global))]
async fn root(State(global): State<Arc<Global>>) -> Json<RootResponse> {
    let mut topics: Vec<_> = fallback::known_topics().collect();
    topics.sort_unstable();

    let endpoints = std::iter::once("/news".to_string())
        .chain(topics.iter().map(|t| format!("/news/{t}")))
        .collect();

    Json(RootResponse {
        message: "News Headlines API",
        version: env!("CARGO_PKG_VERSION"),
        uptime: global.started_at.elapsed().as_secs(),
        endpoints,
    })
}
