//! Interaction log model for outbound contact-link clicks.

use serde::{Deserialize, Serialize};

/// Social platform an outbound click targeted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Instagram,
    Linkedin,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Instagram => "instagram",
            Platform::Linkedin => "linkedin",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "instagram" => Some(Platform::Instagram),
            "linkedin" => Some(Platform::Linkedin),
            _ => None,
        }
    }
}

/// Device class derived from the User-Agent header.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DeviceType {
    Mobile,
    Desktop,
}

impl DeviceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceType::Mobile => "mobile",
            DeviceType::Desktop => "desktop",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "mobile" => Some(DeviceType::Mobile),
            "desktop" => Some(DeviceType::Desktop),
            _ => None,
        }
    }
}

/// Classify the requesting device from its User-Agent header.
///
/// A single case-insensitive substring test for "mobile"; everything else,
/// including an empty header, counts as desktop.
pub fn classify_device(user_agent: &str) -> DeviceType {
    if user_agent.to_lowercase().contains("mobile") {
        DeviceType::Mobile
    } else {
        DeviceType::Desktop
    }
}

/// One recorded outbound contact-link click. Append-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionLog {
    pub id: String,
    /// Stored as received; not checked against the ambassadors table.
    pub ambassador_id: String,
    pub platform: Platform,
    pub device_type: DeviceType,
    pub referrer: String,
    pub created_at: String,
}

/// Beacon body sent by the public site when a contact link is clicked.
#[derive(Debug, Clone, Deserialize)]
pub struct TrackRequest {
    pub ambassador_id: String,
    pub platform: Platform,
    #[serde(default)]
    pub referrer: Option<String>,
}
