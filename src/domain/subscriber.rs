use serde::{Deserialize, Serialize};

use super::record::RecordMeta;

pub const DEFAULT_SUBSCRIBER_SOURCE: &str = "footer_form";

/// A newsletter subscriber.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscriber {
    #[serde(flatten)]
    pub meta: RecordMeta,
    pub email: String,
    #[serde(default)]
    pub source: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SubscriberCreate {
    pub email: String,
    pub source: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct SubscriberPatch {
    pub email: Option<String>,
    pub source: Option<String>,
}
