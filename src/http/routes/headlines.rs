use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};

use crate::global::Global;
use crate::types::HeadlinesResponse;

pub fn routes() -> Router<Arc<Global>> {
    Router::new()
        .route("/news", get(get_top_headlines))
        .route("/news/:category", get(get_headlines_by_category))
}

#[tracing::instrument(skip(global))]
async fn get_top_headlines(State(global): State<Arc<Global>>) -> Json<HeadlinesResponse> {
    Json(global.fetcher.fetch_top_headlines().await)
}

#[tracing::instrument(skip(global))]
async fn get_headlines_by_category(
    Path(category): Path<String>,
    State(global): State<Arc<Global>>,
) -> Json<HeadlinesResponse> {
    Json(global.fetcher.fetch_headlines_by_category(&category).await)
}
