//! HTTP endpoint handlers: session-less, read-only catalog views.
//! Per-user state (statuses, overview, leaderboards) rides the WebSocket.

use std::sync::Arc;

use axum::{
  extract::{Query, State},
  response::IntoResponse,
  Json,
};
use tracing::instrument;

use crate::dashboard::admin_overview;
use crate::protocol::{HealthOut, ProblemsQuery};
use crate::state::AppState;

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse {
  Json(HealthOut { ok: true })
}

#[instrument(level = "info", skip(state), fields(topic = ?q.topic, week = ?q.week))]
pub async fn http_get_problems(
  State(state): State<Arc<AppState>>,
  Query(q): Query<ProblemsQuery>,
) -> impl IntoResponse {
  let problems: Vec<_> = state
    .catalog
    .problems
    .iter()
    .filter(|p| q.topic.as_ref().map_or(true, |t| &p.topic == t))
    .filter(|p| q.week.map_or(true, |w| p.week == w))
    .cloned()
    .collect();
  Json(problems)
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_phases(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  Json(state.catalog.phases.clone())
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_events(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  Json(state.catalog.events.clone())
}

/// Fixed mock analytics for the admin charting widgets.
#[instrument(level = "info")]
pub async fn http_get_analytics() -> impl IntoResponse {
  Json(admin_overview())
}
