// HTTP request handlers
use crate::application::event_loop::UiCommand;
use crate::presentation::app_state::AppState;
use crate::presentation::document::DocumentSnapshot;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/api/dashboard", get(dashboard_snapshot))
        .route("/api/chart/:metric", post(toggle_chart))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Current contents of the dashboard
pub async fn dashboard_snapshot(State(state): State<Arc<AppState>>) -> Json<DocumentSnapshot> {
    Json(state.document.snapshot())
}

/// Chart toggle control. Unknown metrics are accepted and ignored by the presenter.
pub async fn toggle_chart(
    Path(metric): Path<String>,
    State(state): State<Arc<AppState>>,
) -> StatusCode {
    match state.commands.send(UiCommand::ToggleChart(metric)).await {
        Ok(()) => StatusCode::ACCEPTED,
        Err(e) => {
            tracing::error!("Event loop is gone, dropping toggle: {}", e);
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
