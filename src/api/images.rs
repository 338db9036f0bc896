//! Server-side image proxy so the public site stays same-origin.

use axum::{
    extract::Query,
    http::{header, StatusCode},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use url::Url;

use crate::images::placeholder_url;

/// Upper bound on a relayed upstream image body.
const MAX_PROXY_BYTES: usize = 10 * 1024 * 1024;

/// Proxy query parameters.
#[derive(Debug, Deserialize)]
pub struct ProxyQuery {
    pub url: String,
}

/// GET /api/proxy-image?url=<external> - Fetch an external image server-side.
///
/// Only `http`/`https` targets are accepted, and the relayed body is capped
/// at [`MAX_PROXY_BYTES`]. On any upstream failure the client is redirected
/// to the generated placeholder, which the placeholder host serves directly,
/// so the redirect can never re-enter this proxy.
pub async fn proxy_image(Query(params): Query<ProxyQuery>) -> Response {
    let target = match Url::parse(&params.url) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => url,
        _ => {
            return (
                StatusCode::BAD_REQUEST,
                "url must be an absolute http or https URL",
            )
                .into_response()
        }
    };

    let mut upstream = match reqwest::get(target.as_str()).await {
        Ok(response) if response.status().is_success() => response,
        Ok(response) => {
            tracing::warn!("Image upstream returned {} for {}", response.status(), target);
            return Redirect::temporary(&placeholder_url("")).into_response();
        }
        Err(e) => {
            tracing::warn!("Image fetch failed for {}: {}", target, e);
            return Redirect::temporary(&placeholder_url("")).into_response();
        }
    };

    if upstream
        .content_length()
        .is_some_and(|length| length > MAX_PROXY_BYTES as u64)
    {
        tracing::warn!("Image upstream body too large for {}", target);
        return Redirect::temporary(&placeholder_url("")).into_response();
    }

    let content_type = upstream
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("image/jpeg")
        .to_string();

    // Content-Length can be absent or wrong, so the cap also holds on the
    // bytes actually read.
    let mut body: Vec<u8> = Vec::new();
    loop {
        match upstream.chunk().await {
            Ok(Some(chunk)) => {
                if body.len() + chunk.len() > MAX_PROXY_BYTES {
                    tracing::warn!("Image upstream body too large for {}", target);
                    return Redirect::temporary(&placeholder_url("")).into_response();
                }
                body.extend_from_slice(&chunk);
            }
            Ok(None) => break,
            Err(e) => {
                tracing::warn!("Image body read failed for {}: {}", target, e);
                return Redirect::temporary(&placeholder_url("")).into_response();
            }
        }
    }

    ([(header::CONTENT_TYPE, content_type)], body).into_response()
}
