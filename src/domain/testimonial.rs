use serde::{Deserialize, Serialize};

use super::record::{default_true, RecordMeta};

/// A customer quote. Hidden from public pages when `is_active` is false.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Testimonial {
    #[serde(flatten)]
    pub meta: RecordMeta,
    pub author_name: String,
    #[serde(default)]
    pub author_role: Option<String>,
    pub quote: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub display_order: Option<i32>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Clone)]
pub struct TestimonialCreate {
    pub author_name: String,
    pub author_role: Option<String>,
    pub quote: String,
    pub avatar_url: Option<String>,
    pub is_featured: bool,
    pub display_order: Option<i32>,
    pub is_active: bool,
}

#[derive(Debug, Clone, Default)]
pub struct TestimonialPatch {
    pub author_name: Option<String>,
    pub author_role: Option<String>,
    pub quote: Option<String>,
    pub avatar_url: Option<String>,
    pub is_featured: Option<bool>,
    pub display_order: Option<i32>,
    pub is_active: Option<bool>,
}

impl TestimonialCreate {
    pub fn new(author_name: impl Into<String>, quote: impl Into<String>) -> Self {
        Self {
            author_name: author_name.into(),
            author_role: None,
            quote: quote.into(),
            avatar_url: None,
            is_featured: false,
            display_order: None,
            is_active: true,
        }
    }
}
