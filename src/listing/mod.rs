//! Filter rules for the public listing and the admin search boxes.
//!
//! Both collections are small and always read whole, so filtering happens
//! in memory over the full list rather than in SQL predicates.

use crate::models::{Ambassador, InteractionLog};

/// Match a specialization against a tag, case-insensitively.
///
/// Plain substring match, except the tag "Ops" which also matches
/// specializations containing "operations" (the abbreviation is not a
/// substring of the full word, so it needs its own rule).
pub fn matches_tag(specialization: &str, tag: &str) -> bool {
    let specialization = specialization.to_lowercase();
    if tag.eq_ignore_ascii_case("ops") {
        return specialization.contains("operations") || specialization.contains("ops");
    }
    specialization.contains(&tag.to_lowercase())
}

/// Admin search: case-insensitive substring on name or specialization.
pub fn matches_ambassador_search(ambassador: &Ambassador, query: &str) -> bool {
    let query = query.to_lowercase();
    ambassador.name.to_lowercase().contains(&query)
        || ambassador
            .specialization
            .as_str()
            .to_lowercase()
            .contains(&query)
}

/// Log search: case-insensitive substring on ambassador id or platform.
pub fn matches_log_search(log: &InteractionLog, query: &str) -> bool {
    let query = query.to_lowercase();
    log.ambassador_id.to_lowercase().contains(&query)
        || log.platform.as_str().contains(&query)
}
