use serde::{Deserialize, Serialize};

use super::record::RecordMeta;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InquiryStatus {
    #[default]
    New,
    InProgress,
    Resolved,
    Archived,
}

/// A contact or quote request submitted from the public site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inquiry {
    #[serde(flatten)]
    pub meta: RecordMeta,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    pub message: String,
    #[serde(default)]
    pub status: InquiryStatus,
    #[serde(default)]
    pub source: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct InquiryCreate {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: Option<String>,
    pub message: String,
    /// Defaults to [`InquiryStatus::New`].
    pub status: Option<InquiryStatus>,
    pub source: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct InquiryPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
    pub status: Option<InquiryStatus>,
    pub source: Option<String>,
}
