use serde::{Deserialize, Serialize};

use super::record::{Featurable, HasSlug, RecordMeta};

/// A service offered on the marketing site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    #[serde(flatten)]
    pub meta: RecordMeta,
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub hero_image: Option<String>,
    #[serde(default)]
    pub icon_key: Option<String>,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub features: Vec<String>,
}

/// Payload for creating a new service.
#[derive(Debug, Clone, Default)]
pub struct ServiceCreate {
    pub slug: String,
    pub name: String,
    pub tagline: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub hero_image: Option<String>,
    pub icon_key: Option<String>,
    pub is_featured: bool,
    pub features: Vec<String>,
}

/// Fields to overwrite on an existing service.
#[derive(Debug, Clone, Default)]
pub struct ServicePatch {
    pub slug: Option<String>,
    pub name: Option<String>,
    pub tagline: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub hero_image: Option<String>,
    pub icon_key: Option<String>,
    pub is_featured: Option<bool>,
    pub features: Option<Vec<String>>,
}

impl ServiceCreate {
    pub fn new(slug: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            name: name.into(),
            ..Self::default()
        }
    }
}

impl HasSlug for Service {
    fn slug(&self) -> &str {
        &self.slug
    }
}

impl Featurable for Service {
    fn is_featured(&self) -> bool {
        self.is_featured
    }
}
