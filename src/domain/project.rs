use serde::{Deserialize, Serialize};

use super::record::{Featurable, HasSlug, RecordMeta};

/// A completed or ongoing project shown as a case study.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(flatten)]
    pub meta: RecordMeta,
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub client_name: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub hero_image: Option<String>,
    #[serde(default)]
    pub gallery: Vec<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub is_featured: bool,
}

#[derive(Debug, Clone, Default)]
pub struct ProjectCreate {
    pub slug: String,
    pub name: String,
    pub client_name: Option<String>,
    pub location: Option<String>,
    pub category: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub hero_image: Option<String>,
    pub gallery: Vec<String>,
    pub year: Option<i32>,
    pub is_featured: bool,
}

#[derive(Debug, Clone, Default)]
pub struct ProjectPatch {
    pub slug: Option<String>,
    pub name: Option<String>,
    pub client_name: Option<String>,
    pub location: Option<String>,
    pub category: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub hero_image: Option<String>,
    pub gallery: Option<Vec<String>>,
    pub year: Option<i32>,
    pub is_featured: Option<bool>,
}

impl ProjectCreate {
    pub fn new(slug: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            name: name.into(),
            ..Self::default()
        }
    }
}

impl HasSlug for Project {
    fn slug(&self) -> &str {
        &self.slug
    }
}

impl Featurable for Project {
    fn is_featured(&self) -> bool {
        self.is_featured
    }
}
