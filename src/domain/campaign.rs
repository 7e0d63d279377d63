use serde::{Deserialize, Serialize};

use super::record::{default_true, HasSlug, RecordMeta};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CampaignStatus {
    #[default]
    Draft,
    Active,
    Closed,
}

/// A fundraising campaign donations can be attached to.
///
/// `is_active` gates the public "active campaigns" listing independently of
/// `status`; a record stored without the flag counts as active.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Campaign {
    #[serde(flatten)]
    pub meta: RecordMeta,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub target_amount: Option<f64>,
    #[serde(default)]
    pub raised_amount: f64,
    #[serde(default)]
    pub status: CampaignStatus,
    #[serde(rename = "isActive", default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Clone, Default)]
pub struct CampaignCreate {
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub target_amount: Option<f64>,
    pub status: CampaignStatus,
    /// Defaults to `true`.
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default)]
pub struct CampaignPatch {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub target_amount: Option<f64>,
    pub raised_amount: Option<f64>,
    pub status: Option<CampaignStatus>,
    pub is_active: Option<bool>,
}

impl CampaignCreate {
    pub fn new(name: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            slug: slug.into(),
            ..Self::default()
        }
    }
}

impl HasSlug for Campaign {
    fn slug(&self) -> &str {
        &self.slug
    }
}
