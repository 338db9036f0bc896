//! Click-tracking beacon endpoint.

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::models::{classify_device, TrackRequest};
use crate::AppState;

/// Legacy response body for the track beacon.
#[derive(Debug, Serialize)]
pub struct TrackResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// POST /api/track - Record one outbound contact-link click.
///
/// Keeps the legacy response contract: `{success: true}` on persist,
/// `{success: false, error}` with 500 on store failure, and
/// `{success: true, message}` without persisting when tracking is disabled.
pub async fn track_interaction(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<TrackRequest>,
) -> Response {
    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown");
    let device_type = classify_device(user_agent);

    if !state.config.tracking_enabled {
        tracing::info!(
            ambassador_id = %request.ambassador_id,
            platform = %request.platform.as_str(),
            device_type = %device_type.as_str(),
            "Mock tracking"
        );
        let body = TrackResponse {
            success: true,
            message: Some("Mock tracking logged (tracking disabled)".to_string()),
            error: None,
        };
        return (StatusCode::OK, Json(body)).into_response();
    }

    match state.repo.record_interaction(&request, device_type).await {
        Ok(_) => {
            let body = TrackResponse {
                success: true,
                message: None,
                error: None,
            };
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => {
            tracing::error!("Error inserting interaction log: {}", e);
            let body = TrackResponse {
                success: false,
                message: None,
                error: Some(e.to_string()),
            };
            (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
        }
    }
}
