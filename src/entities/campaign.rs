use super::require;
use crate::actor_framework::Entity;
use crate::domain::{Campaign, CampaignCreate, CampaignPatch, RecordMeta};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CampaignAction {
    /// Flip `isActive`; the result is the new value.
    ToggleActive,
}

fn check_target(target: Option<f64>) -> Result<(), String> {
    match target {
        Some(t) if !t.is_finite() || t < 0.0 => Err(format!("Invalid target amount: {}", t)),
        _ => Ok(()),
    }
}

impl Entity for Campaign {
    type Create = CampaignCreate;
    type Patch = CampaignPatch;
    type Action = CampaignAction;
    type ActionResult = bool;

    const COLLECTION: &'static str = "campaigns";
    const STORAGE_KEY: &'static str = "brisk_campaigns_v1";
    const ID_PREFIX: &'static str = "cmp";

    fn meta(&self) -> &RecordMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut RecordMeta {
        &mut self.meta
    }

    fn from_create(meta: RecordMeta, params: CampaignCreate) -> Result<Self, String> {
        require(&params.name, "name")?;
        require(&params.slug, "slug")?;
        check_target(params.target_amount)?;
        Ok(Self {
            meta,
            name: params.name,
            slug: params.slug,
            description: params.description,
            target_amount: params.target_amount,
            raised_amount: 0.0,
            status: params.status,
            is_active: params.is_active.unwrap_or(true),
        })
    }

    fn apply_patch(&mut self, patch: CampaignPatch) -> Result<(), String> {
        check_target(patch.target_amount)?;
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(slug) = patch.slug {
            require(&slug, "slug")?;
            self.slug = slug;
        }
        if patch.description.is_some() {
            self.description = patch.description;
        }
        if patch.target_amount.is_some() {
            self.target_amount = patch.target_amount;
        }
        if let Some(raised_amount) = patch.raised_amount {
            self.raised_amount = raised_amount;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(is_active) = patch.is_active {
            self.is_active = is_active;
        }
        Ok(())
    }

    fn handle_action(&mut self, action: CampaignAction) -> Result<bool, String> {
        match action {
            CampaignAction::ToggleActive => {
                self.is_active = !self.is_active;
                Ok(self.is_active)
            }
        }
    }
}
