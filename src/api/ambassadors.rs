//! Admin ambassador API endpoints.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use super::{error, success, ApiResult};
use crate::errors::AppError;
use crate::listing::matches_ambassador_search;
use crate::models::{Ambassador, CreateAmbassadorRequest, UpdateAmbassadorRequest};
use crate::AppState;

/// Admin listing query parameters.
#[derive(Debug, Deserialize)]
pub struct AmbassadorListQuery {
    /// Case-insensitive substring over name or specialization.
    #[serde(default)]
    pub search: Option<String>,
}

/// GET /api/ambassadors - List all ambassadors, optionally filtered.
pub async fn list_ambassadors(
    State(state): State<AppState>,
    Query(params): Query<AmbassadorListQuery>,
) -> ApiResult<Vec<Ambassador>> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    match state.repo.list_ambassadors().await {
        Ok(mut ambassadors) => {
            if let Some(query) = params.search.as_deref() {
                ambassadors.retain(|a| matches_ambassador_search(a, query));
            }
            success(ambassadors, revision_id)
        }
        Err(e) => error(e, revision_id),
    }
}

/// GET /api/ambassadors/{id} - Get a single ambassador.
pub async fn get_ambassador(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Ambassador> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    match state.repo.get_ambassador(&id).await {
        Ok(Some(ambassador)) => success(ambassador, revision_id),
        Ok(None) => error(
            AppError::NotFound(format!("Ambassador {} not found", id)),
            revision_id,
        ),
        Err(e) => error(e, revision_id),
    }
}

/// POST /api/ambassadors - Create a new ambassador.
pub async fn create_ambassador(
    State(state): State<AppState>,
    Json(request): Json<CreateAmbassadorRequest>,
) -> ApiResult<Ambassador> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    // Validate required fields
    if request.name.trim().is_empty() {
        return error(
            AppError::Validation("Name is required".to_string()),
            revision_id,
        );
    }
    if request.tagline.trim().is_empty() {
        return error(
            AppError::Validation("Tagline is required".to_string()),
            revision_id,
        );
    }

    match state.repo.create_ambassador(&request).await {
        Ok(ambassador) => {
            let new_revision = state.repo.get_revision_id().await.unwrap_or(revision_id);
            success(ambassador, new_revision)
        }
        Err(e) => error(e, revision_id),
    }
}

/// PUT /api/ambassadors/{id} - Partially update an ambassador. Last write wins.
pub async fn update_ambassador(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateAmbassadorRequest>,
) -> ApiResult<Ambassador> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    // Required fields may be omitted but not blanked
    if matches!(request.name.as_deref(), Some(name) if name.trim().is_empty()) {
        return error(
            AppError::Validation("Name cannot be empty".to_string()),
            revision_id,
        );
    }
    if matches!(request.tagline.as_deref(), Some(tagline) if tagline.trim().is_empty()) {
        return error(
            AppError::Validation("Tagline cannot be empty".to_string()),
            revision_id,
        );
    }

    match state.repo.update_ambassador(&id, &request).await {
        Ok(ambassador) => {
            let new_revision = state.repo.get_revision_id().await.unwrap_or(revision_id);
            success(ambassador, new_revision)
        }
        Err(e) => error(e, revision_id),
    }
}

/// POST /api/ambassadors/{id}/toggle - Flip the active flag.
pub async fn toggle_ambassador(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Ambassador> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    match state.repo.toggle_ambassador(&id).await {
        Ok(ambassador) => {
            let new_revision = state.repo.get_revision_id().await.unwrap_or(revision_id);
            success(ambassador, new_revision)
        }
        Err(e) => error(e, revision_id),
    }
}

/// DELETE /api/ambassadors/{id} - Delete an ambassador.
pub async fn delete_ambassador(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    match state.repo.delete_ambassador(&id).await {
        Ok(()) => {
            let new_revision = state.repo.get_revision_id().await.unwrap_or(revision_id);
            success((), new_revision)
        }
        Err(e) => error(e, revision_id),
    }
}

/// POST /api/ambassadors/import - Import the embedded official dataset.
pub async fn import_ambassadors(State(state): State<AppState>) -> ApiResult<Vec<Ambassador>> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    let dataset = match crate::data::official_ambassadors() {
        Ok(dataset) => dataset,
        Err(e) => return error(e.into(), revision_id),
    };

    match state.repo.import_ambassadors(&dataset).await {
        Ok(ambassadors) => {
            let new_revision = state.repo.get_revision_id().await.unwrap_or(revision_id);
            success(ambassadors, new_revision)
        }
        Err(e) => error(e, revision_id),
    }
}
