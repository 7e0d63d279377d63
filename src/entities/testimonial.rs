use super::{require, NoAction};
use crate::actor_framework::Entity;
use crate::domain::{RecordMeta, Testimonial, TestimonialCreate, TestimonialPatch};

impl Entity for Testimonial {
    type Create = TestimonialCreate;
    type Patch = TestimonialPatch;
    type Action = NoAction;
    type ActionResult = ();

    const COLLECTION: &'static str = "testimonials";
    const STORAGE_KEY: &'static str = "brisk_testimonials_v1";
    const ID_PREFIX: &'static str = "tst";

    fn meta(&self) -> &RecordMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut RecordMeta {
        &mut self.meta
    }

    fn from_create(meta: RecordMeta, params: TestimonialCreate) -> Result<Self, String> {
        require(&params.quote, "quote")?;
        Ok(Self {
            meta,
            author_name: params.author_name,
            author_role: params.author_role,
            quote: params.quote,
            avatar_url: params.avatar_url,
            is_featured: params.is_featured,
            display_order: params.display_order,
            is_active: params.is_active,
        })
    }

    fn apply_patch(&mut self, patch: TestimonialPatch) -> Result<(), String> {
        if let Some(author_name) = patch.author_name {
            self.author_name = author_name;
        }
        if patch.author_role.is_some() {
            self.author_role = patch.author_role;
        }
        if let Some(quote) = patch.quote {
            self.quote = quote;
        }
        if patch.avatar_url.is_some() {
            self.avatar_url = patch.avatar_url;
        }
        if let Some(is_featured) = patch.is_featured {
            self.is_featured = is_featured;
        }
        if patch.display_order.is_some() {
            self.display_order = patch.display_order;
        }
        if let Some(is_active) = patch.is_active {
            self.is_active = is_active;
        }
        Ok(())
    }

    fn handle_action(&mut self, action: NoAction) -> Result<(), String> {
        match action {}
    }
}
