//! Dashboard statistics endpoint.

use axum::extract::State;

use super::{error, success, ApiResult};
use crate::models::DashboardStats;
use crate::AppState;

/// GET /api/stats - Aggregate counters for the admin dashboard.
pub async fn get_stats(State(state): State<AppState>) -> ApiResult<DashboardStats> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    match state.repo.dashboard_stats().await {
        Ok(stats) => success(stats, revision_id),
        Err(e) => error(e, revision_id),
    }
}
