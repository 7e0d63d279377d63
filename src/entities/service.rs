use super::{require, NoAction};
use crate::actor_framework::Entity;
use crate::domain::{RecordMeta, Service, ServiceCreate, ServicePatch};

impl Entity for Service {
    type Create = ServiceCreate;
    type Patch = ServicePatch;
    type Action = NoAction;
    type ActionResult = ();

    const COLLECTION: &'static str = "services";
    const STORAGE_KEY: &'static str = "brisk_services_v1";
    const ID_PREFIX: &'static str = "svc";
    const SEED_REQUIRED: bool = true;

    fn meta(&self) -> &RecordMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut RecordMeta {
        &mut self.meta
    }

    fn from_create(meta: RecordMeta, params: ServiceCreate) -> Result<Self, String> {
        require(&params.slug, "slug")?;
        require(&params.name, "name")?;
        Ok(Self {
            meta,
            slug: params.slug,
            name: params.name,
            tagline: params.tagline,
            category: params.category,
            description: params.description,
            hero_image: params.hero_image,
            icon_key: params.icon_key,
            is_featured: params.is_featured,
            features: params.features,
        })
    }

    fn apply_patch(&mut self, patch: ServicePatch) -> Result<(), String> {
        if let Some(slug) = patch.slug {
            require(&slug, "slug")?;
            self.slug = slug;
        }
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(tagline) = patch.tagline {
            self.tagline = Some(tagline);
        }
        if let Some(category) = patch.category {
            self.category = Some(category);
        }
        if let Some(description) = patch.description {
            self.description = Some(description);
        }
        if let Some(hero_image) = patch.hero_image {
            self.hero_image = Some(hero_image);
        }
        if let Some(icon_key) = patch.icon_key {
            self.icon_key = Some(icon_key);
        }
        if let Some(is_featured) = patch.is_featured {
            self.is_featured = is_featured;
        }
        if let Some(features) = patch.features {
            self.features = features;
        }
        Ok(())
    }

    fn handle_action(&mut self, action: NoAction) -> Result<(), String> {
        match action {}
    }
}
