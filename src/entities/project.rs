use super::{require, NoAction};
use crate::actor_framework::Entity;
use crate::domain::{Project, ProjectCreate, ProjectPatch, RecordMeta};

impl Entity for Project {
    type Create = ProjectCreate;
    type Patch = ProjectPatch;
    type Action = NoAction;
    type ActionResult = ();

    const COLLECTION: &'static str = "projects";
    const STORAGE_KEY: &'static str = "brisk_projects_v1";
    const ID_PREFIX: &'static str = "proj";
    const SEED_REQUIRED: bool = true;

    fn meta(&self) -> &RecordMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut RecordMeta {
        &mut self.meta
    }

    fn from_create(meta: RecordMeta, params: ProjectCreate) -> Result<Self, String> {
        require(&params.slug, "slug")?;
        require(&params.name, "name")?;
        Ok(Self {
            meta,
            slug: params.slug,
            name: params.name,
            client_name: params.client_name,
            location: params.location,
            category: params.category,
            summary: params.summary,
            description: params.description,
            hero_image: params.hero_image,
            gallery: params.gallery,
            year: params.year,
            is_featured: params.is_featured,
        })
    }

    fn apply_patch(&mut self, patch: ProjectPatch) -> Result<(), String> {
        if let Some(slug) = patch.slug {
            require(&slug, "slug")?;
            self.slug = slug;
        }
        if let Some(name) = patch.name {
            self.name = name;
        }
        if patch.client_name.is_some() {
            self.client_name = patch.client_name;
        }
        if patch.location.is_some() {
            self.location = patch.location;
        }
        if patch.category.is_some() {
            self.category = patch.category;
        }
        if patch.summary.is_some() {
            self.summary = patch.summary;
        }
        if patch.description.is_some() {
            self.description = patch.description;
        }
        if patch.hero_image.is_some() {
            self.hero_image = patch.hero_image;
        }
        if let Some(gallery) = patch.gallery {
            self.gallery = gallery;
        }
        if patch.year.is_some() {
            self.year = patch.year;
        }
        if let Some(is_featured) = patch.is_featured {
            self.is_featured = is_featured;
        }
        Ok(())
    }

    fn handle_action(&mut self, action: NoAction) -> Result<(), String> {
        match action {}
    }
}
