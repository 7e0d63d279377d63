//! Typed per-collection clients.
//!
//! Each client wraps a `CollectionClient` and adds the queries its page or
//! admin screen needs.

#[macro_use]
mod macros;

mod campaign_client;
mod content_clients;
mod donation_client;
mod inquiry_client;
mod subscriber_client;
mod user_client;

pub use campaign_client::CampaignClient;
pub use content_clients::{ProjectClient, ServiceClient, TestimonialClient};
pub use donation_client::DonationClient;
pub use inquiry_client::InquiryClient;
pub use subscriber_client::SubscriberClient;
pub use user_client::UserClient;
