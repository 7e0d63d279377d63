use super::{require, NoAction};
use crate::actor_framework::Entity;
use crate::domain::{RecordMeta, User, UserCreate, UserPatch};

impl Entity for User {
    type Create = UserCreate;
    type Patch = UserPatch;
    type Action = NoAction;
    type ActionResult = ();

    const COLLECTION: &'static str = "users";
    const STORAGE_KEY: &'static str = "brisk_users_v1";
    const ID_PREFIX: &'static str = "usr";

    fn meta(&self) -> &RecordMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut RecordMeta {
        &mut self.meta
    }

    fn from_create(meta: RecordMeta, params: UserCreate) -> Result<Self, String> {
        require(&params.email, "email")?;
        Ok(Self {
            meta,
            email: params.email,
            name: params.name,
            role: params.role,
            is_active: true,
        })
    }

    fn apply_patch(&mut self, patch: UserPatch) -> Result<(), String> {
        if let Some(email) = patch.email {
            require(&email, "email")?;
            self.email = email;
        }
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(role) = patch.role {
            self.role = role;
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
