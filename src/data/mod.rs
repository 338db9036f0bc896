//! Embedded official ambassador dataset for batch import.

use crate::models::CreateAmbassadorRequest;

const OFFICIAL_DATASET: &str = include_str!("ambassadors.json");

/// Parse the embedded official dataset.
///
/// IDs are assigned by the repository on insert, so the dataset carries none.
pub fn official_ambassadors() -> Result<Vec<CreateAmbassadorRequest>, serde_json::Error> {
    serde_json::from_str(OFFICIAL_DATASET)
}
