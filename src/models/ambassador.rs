//! Ambassador model matching the public site's Ambassador interface.

use serde::{Deserialize, Serialize};

/// MBA specialization track an ambassador belongs to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum Specialization {
    Marketing,
    Finance,
    Operations,
    #[serde(rename = "Human Resources")]
    HumanResources,
    #[serde(rename = "Business Analytics")]
    BusinessAnalytics,
}

impl Specialization {
    pub fn as_str(&self) -> &'static str {
        match self {
            Specialization::Marketing => "Marketing",
            Specialization::Finance => "Finance",
            Specialization::Operations => "Operations",
            Specialization::HumanResources => "Human Resources",
            Specialization::BusinessAnalytics => "Business Analytics",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Marketing" => Some(Specialization::Marketing),
            "Finance" => Some(Specialization::Finance),
            "Operations" => Some(Specialization::Operations),
            "Human Resources" => Some(Specialization::HumanResources),
            "Business Analytics" => Some(Specialization::BusinessAnalytics),
            _ => None,
        }
    }
}

/// Study year of an ambassador.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum Year {
    #[serde(rename = "1st Year")]
    First,
    #[serde(rename = "2nd Year")]
    Second,
}

impl Year {
    pub fn as_str(&self) -> &'static str {
        match self {
            Year::First => "1st Year",
            Year::Second => "2nd Year",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "1st Year" => Some(Year::First),
            "2nd Year" => Some(Year::Second),
            _ => None,
        }
    }
}

/// A student ambassador profile shown on the public site.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ambassador {
    pub id: String,
    pub name: String,
    pub specialization: Specialization,
    pub year: Year,
    pub tagline: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instagram_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_id: Option<String>,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}

/// Request body for creating a new ambassador.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAmbassadorRequest {
    pub name: String,
    pub specialization: Specialization,
    pub year: Year,
    pub tagline: String,
    #[serde(default)]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub instagram_url: Option<String>,
    #[serde(default)]
    pub linkedin_url: Option<String>,
    #[serde(default)]
    pub email_id: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

/// Request body for a partial ambassador update. Last write wins.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateAmbassadorRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub specialization: Option<Specialization>,
    #[serde(default)]
    pub year: Option<Year>,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub instagram_url: Option<String>,
    #[serde(default)]
    pub linkedin_url: Option<String>,
    #[serde(default)]
    pub email_id: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
}
