//! Photo upload endpoint.

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::storage::MAX_UPLOAD_BYTES;
use crate::AppState;

/// Legacy response body for the upload endpoint.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// POST /api/upload - Store an ambassador photo.
///
/// Accepts a multipart form with a `file` field and keeps the legacy
/// response contract: `{url}` on success, `{error}` with 400/500 otherwise.
/// The size cap is enforced before anything touches disk.
pub async fn upload_photo(State(state): State<AppState>, mut multipart: Multipart) -> Response {
    let mut upload: Option<(String, Vec<u8>)> = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => return upload_error(StatusCode::BAD_REQUEST, &e.to_string()),
        };

        if field.name() != Some("file") {
            continue;
        }

        let file_name = field.file_name().unwrap_or("unknown").to_string();
        let bytes = match field.bytes().await {
            Ok(bytes) => bytes,
            Err(e) => return upload_error(StatusCode::BAD_REQUEST, &e.to_string()),
        };
        upload = Some((file_name, bytes.to_vec()));
        break;
    }

    let Some((file_name, bytes)) = upload else {
        return upload_error(StatusCode::BAD_REQUEST, "No file provided");
    };

    if bytes.len() > MAX_UPLOAD_BYTES {
        return upload_error(StatusCode::BAD_REQUEST, "File too large. Max 10MB.");
    }

    match state.store.save(&file_name, &bytes).await {
        Ok(url) => {
            tracing::info!("Stored upload at {}", url);
            (
                StatusCode::OK,
                Json(UploadResponse {
                    url: Some(url),
                    error: None,
                }),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!("Upload failed: {}", e);
            upload_error(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string())
        }
    }
}

fn upload_error(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(UploadResponse {
            url: None,
            error: Some(message.to_string()),
        }),
    )
        .into_response()
}
