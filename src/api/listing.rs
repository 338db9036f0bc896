//! Public listing endpoints: the active-ambassador list and its watch feed.

use std::convert::Infallible;

use axum::{
    extract::{Query, State},
    response::sse::{Event, KeepAlive, Sse},
};
use serde::Deserialize;
use tokio_stream::{wrappers::BroadcastStream, Stream, StreamExt};

use super::{error, success, ApiResult};
use crate::images::resolve_photo_url;
use crate::listing::matches_tag;
use crate::models::{Ambassador, AmbassadorsSnapshot};
use crate::AppState;

/// Public listing query parameters.
#[derive(Debug, Deserialize)]
pub struct PublicListQuery {
    /// Specialization tag from the public site's filter chips.
    #[serde(default)]
    pub tag: Option<String>,
}

/// GET /api/public/ambassadors - Active ambassadors for the public site.
///
/// Reads the full collection and filters in memory, then resolves each
/// `photo_url` to a final, loadable URL.
pub async fn public_ambassadors(
    State(state): State<AppState>,
    Query(params): Query<PublicListQuery>,
) -> ApiResult<Vec<Ambassador>> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    match state.repo.list_ambassadors().await {
        Ok(mut ambassadors) => {
            ambassadors.retain(|a| a.is_active);
            if let Some(tag) = params.tag.as_deref() {
                ambassadors.retain(|a| matches_tag(a.specialization.as_str(), tag));
            }
            for ambassador in &mut ambassadors {
                ambassador.photo_url = Some(resolve_photo_url(
                    ambassador.photo_url.as_deref(),
                    &ambassador.name,
                ));
            }
            success(ambassadors, revision_id)
        }
        Err(e) => error(e, revision_id),
    }
}

/// GET /api/public/ambassadors/watch - Snapshot stream over SSE.
///
/// Emits the current snapshot immediately, then one event per published
/// snapshot, in strictly increasing revision order. A lagging client loses
/// intermediate snapshots and converges on the newest one; dropping the
/// response body detaches the subscriber.
pub async fn watch_ambassadors(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    // Subscribe before the initial read so no revision between the two is missed
    let receiver = state.repo.subscribe();
    let initial = state.repo.snapshot().await.ok();
    let initial_revision = initial.as_ref().map(|s| s.revision_id).unwrap_or(0);

    // Revisions the initial snapshot already covers are dropped from the feed
    let updates = BroadcastStream::new(receiver)
        .filter_map(|result| result.ok())
        .filter(move |snapshot| snapshot.revision_id > initial_revision);
    let stream = tokio_stream::iter(initial)
        .chain(updates)
        .map(|snapshot| Ok(snapshot_event(&snapshot)));

    Sse::new(stream).keep_alive(KeepAlive::default())
}

/// Render one snapshot as an SSE event with the revision as the event id.
fn snapshot_event(snapshot: &AmbassadorsSnapshot) -> Event {
    Event::default()
        .id(snapshot.revision_id.to_string())
        .data(serde_json::to_string(snapshot).unwrap_or_default())
}
