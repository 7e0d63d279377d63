//! `Entity` implementations binding each domain record to its storage key,
//! id prefix and mutation rules.

mod campaign;
mod donation;
mod inquiry;
mod project;
mod service;
mod subscriber;
mod testimonial;
mod user;

pub use campaign::CampaignAction;

/// Action type for collections with no operations beyond patching.
#[derive(Debug, Clone, Copy)]
pub enum NoAction {}

pub(crate) fn require(value: &str, field: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err(format!("{} must not be empty", field))
    } else {
        Ok(())
    }
}
