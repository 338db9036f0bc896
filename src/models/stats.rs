//! Aggregates backing the admin dashboard.

use serde::{Deserialize, Serialize};

use super::InteractionLog;

/// Headline numbers plus the most recent clicks, as one payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_hits: i64,
    pub active_ambassadors: i64,
    pub instagram_hits: i64,
    pub linkedin_hits: i64,
    pub recent_logs: Vec<InteractionLog>,
}
