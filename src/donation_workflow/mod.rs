//! The donation wizard: form, summary, payment, then success or error.
//!
//! [`DonationWorkflow`] holds the form input and the current
//! [`WorkflowState`]. The payment step is delegated to a [`PaymentGateway`];
//! a confirmed payment is recorded through the donations collection.

mod form;
mod payment;
mod receipt;
mod state;
mod workflow;

pub use form::*;
pub use payment::*;
pub use receipt::*;
pub use state::*;
pub use workflow::DonationWorkflow;
