use super::{require, NoAction};
use crate::actor_framework::Entity;
use crate::domain::{Inquiry, InquiryCreate, InquiryPatch, RecordMeta};

impl Entity for Inquiry {
    type Create = InquiryCreate;
    type Patch = InquiryPatch;
    type Action = NoAction;
    type ActionResult = ();

    const COLLECTION: &'static str = "inquiries";
    const STORAGE_KEY: &'static str = "brisk_inquiries_v1";
    const ID_PREFIX: &'static str = "inq";

    fn meta(&self) -> &RecordMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut RecordMeta {
        &mut self.meta
    }

    /// New inquiries land in `new` unless the caller says otherwise.
    fn from_create(meta: RecordMeta, params: InquiryCreate) -> Result<Self, String> {
        require(&params.email, "email")?;
        require(&params.message, "message")?;
        Ok(Self {
            meta,
            name: params.name,
            email: params.email,
            phone: params.phone,
            subject: params.subject,
            message: params.message,
            status: params.status.unwrap_or_default(),
            source: params.source,
        })
    }

    fn apply_patch(&mut self, patch: InquiryPatch) -> Result<(), String> {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if patch.phone.is_some() {
            self.phone = patch.phone;
        }
        if patch.subject.is_some() {
            self.subject = patch.subject;
        }
        if let Some(message) = patch.message {
            self.message = message;
        }
        if let Some(status) = patch.status {
            self.status = status;
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
