//! Persisted collections and the donation workflow behind the Brisk Farm
//! Solutions site.
//!
//! Every collection is owned by a [`actor_framework::CollectionActor`] that
//! serialises access to one storage key; typed clients in [`clients`] wrap
//! the generic handle. [`app_system::SiteSystem`] starts the actors and
//! builds [`donation_workflow::DonationWorkflow`]s on top of them.

pub mod actor_framework;
pub mod app_system;
pub mod clients;
pub mod domain;
pub mod donation_workflow;
pub mod entities;
pub mod error;
pub mod reporting;
pub mod seed;
pub mod storage;

#[cfg(test)]
mod mock_framework;
