//! Snapshot payload delivered to ambassador-collection subscribers.

use serde::{Deserialize, Serialize};

use super::Ambassador;

/// Full state of the ambassador collection at one revision.
///
/// Subscribers always receive whole collections, never diffs, so a receiver
/// that misses intermediate deliveries still converges on the latest state.
/// Snapshots are totally ordered by `revision_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmbassadorsSnapshot {
    pub revision_id: i64,
    pub generated_at: String,
    pub ambassadors: Vec<Ambassador>,
}
