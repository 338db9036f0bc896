//! Interaction log endpoints for the admin console.

use axum::{
    body::Body,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use chrono::Utc;
use serde::Deserialize;

use super::{error, success, ApiResult};
use crate::errors::AppErrorWithRevision;
use crate::listing::matches_log_search;
use crate::models::InteractionLog;
use crate::AppState;

/// Log listing query parameters.
#[derive(Debug, Deserialize)]
pub struct LogListQuery {
    /// Case-insensitive substring over ambassador id or platform.
    #[serde(default)]
    pub search: Option<String>,
}

/// GET /api/logs - List interaction logs, newest first.
pub async fn list_logs(
    State(state): State<AppState>,
    Query(params): Query<LogListQuery>,
) -> ApiResult<Vec<InteractionLog>> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    match state.repo.list_logs().await {
        Ok(mut logs) => {
            if let Some(query) = params.search.as_deref() {
                logs.retain(|log| matches_log_search(log, query));
            }
            success(logs, revision_id)
        }
        Err(e) => error(e, revision_id),
    }
}

/// GET /api/logs/export - Download the full interaction log as CSV.
pub async fn export_logs(State(state): State<AppState>) -> Response {
    let logs = match state.repo.list_logs().await {
        Ok(logs) => logs,
        Err(e) => {
            let revision_id = state.repo.get_revision_id().await.unwrap_or(0);
            return AppErrorWithRevision {
                error: e,
                revision_id,
            }
            .into_response();
        }
    };

    let csv_output = logs_to_csv(&logs);
    let filename = format!("interaction_logs_{}.csv", Utc::now().format("%Y-%m-%d"));

    Response::builder()
        .status(200)
        .header("Content-Type", "text/csv")
        .header(
            "Content-Disposition",
            format!("attachment; filename=\"{}\"", filename),
        )
        .body(Body::from(csv_output))
        .unwrap()
        .into_response()
}

fn logs_to_csv(logs: &[InteractionLog]) -> String {
    let mut csv_output =
        String::from("id,ambassador_id,platform,device_type,referrer,created_at\n");

    for log in logs {
        csv_output.push_str(&format!(
            "{},{},{},{},{},{}\n",
            csv_escape(&log.id),
            csv_escape(&log.ambassador_id),
            log.platform.as_str(),
            log.device_type.as_str(),
            csv_escape(&log.referrer),
            csv_escape(&log.created_at),
        ));
    }

    csv_output
}

/// Quote a CSV field when it contains a comma, quote, or newline.
fn csv_escape(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
