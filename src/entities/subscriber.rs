use super::{require, NoAction};
use crate::actor_framework::Entity;
use crate::domain::{RecordMeta, Subscriber, SubscriberCreate, SubscriberPatch, DEFAULT_SUBSCRIBER_SOURCE};

impl Entity for Subscriber {
    type Create = SubscriberCreate;
    type Patch = SubscriberPatch;
    type Action = NoAction;
    type ActionResult = ();

    const COLLECTION: &'static str = "subscribers";
    const STORAGE_KEY: &'static str = "brisk_subscribers_v1";
    const ID_PREFIX: &'static str = "sub";

    fn meta(&self) -> &RecordMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut RecordMeta {
        &mut self.meta
    }

    fn from_create(meta: RecordMeta, params: SubscriberCreate) -> Result<Self, String> {
        require(&params.email, "email")?;
        Ok(Self {
            meta,
            email: params.email,
            source: Some(
                params
                    .source
                    .unwrap_or_else(|| DEFAULT_SUBSCRIBER_SOURCE.to_string()),
            ),
        })
    }

    fn apply_patch(&mut self, patch: SubscriberPatch) -> Result<(), String> {
        if let Some(email) = patch.email {
            require(&email, "email")?;
            self.email = email;
        }
        if patch.source.is_some() {
            self.source = patch.source;
        }
        Ok(())
    }

    fn handle_action(&mut self, action: NoAction) -> Result<(), String> {
        match action {}
    }
}
