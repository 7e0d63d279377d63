//! The external payment step.
//!
//! A [`PaymentGateway`] receives a [`CheckoutRequest`] and answers exactly
//! once, through a oneshot channel, with a [`PaymentOutcome`]. Dropping the
//! sender without answering is treated as a failed payment.

use std::time::Duration;

use chrono::Utc;
use serde::Serialize;
use tokio::sync::oneshot;
use tracing::debug;

use super::form::ValidatedDonation;
use crate::domain::{Campaign, PaymentMethod};

pub const PROVIDER_NAME: &str = "flutterwave";
pub const PAYMENT_OPTIONS: &str = "card,mobilemoneyuganda";
pub const CHECKOUT_TITLE: &str = "Brisk Donation";
pub const CHECKOUT_LOGO: &str = "/brisk_logo5.png";

const FALLBACK_EMAIL: &str = "donor@briskfarmsolutions.com";
const FALLBACK_PHONE: &str = "0000000000";
const FALLBACK_NAME: &str = "Anonymous Brisk Donor";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Customer {
    pub email: String,
    pub phone_number: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Customization {
    pub title: String,
    pub description: String,
    pub logo: String,
}

/// What the checkout widget is opened with.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckoutRequest {
    pub tx_ref: String,
    pub amount: f64,
    pub currency: String,
    pub payment_options: String,
    pub customer: Customer,
    pub customizations: Customization,
}

/// `BRISK-<unix millis>`
pub fn new_tx_ref() -> String {
    format!("BRISK-{}", Utc::now().timestamp_millis())
}

impl CheckoutRequest {
    pub fn build(donation: &ValidatedDonation, campaign: Option<&Campaign>, tx_ref: String) -> Self {
        let email = match (&donation.donor_email, donation.is_anonymous) {
            (Some(email), false) => email.clone(),
            _ => FALLBACK_EMAIL.to_string(),
        };
        let name = match (&donation.donor_name, donation.is_anonymous) {
            (Some(name), false) => name.clone(),
            _ => FALLBACK_NAME.to_string(),
        };
        let description = match campaign {
            Some(campaign) => format!("Donation to {}", campaign.name),
            None => "General support for Brisk Farm Solutions".to_string(),
        };

        Self {
            tx_ref,
            amount: donation.amount,
            currency: donation.currency.clone(),
            payment_options: PAYMENT_OPTIONS.to_string(),
            customer: Customer {
                email,
                phone_number: donation
                    .donor_phone
                    .clone()
                    .unwrap_or_else(|| FALLBACK_PHONE.to_string()),
                name,
            },
            customizations: Customization {
                title: CHECKOUT_TITLE.to_string(),
                description,
                logo: CHECKOUT_LOGO.to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaymentConfirmation {
    pub tx_ref: Option<String>,
    pub transaction_id: Option<String>,
    pub amount: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PaymentOutcome {
    Paid(PaymentConfirmation),
    Failed { status: String },
    /// The donor closed the payment step without paying.
    Cancelled,
}

impl PaymentOutcome {
    /// Map the provider's completion callback. Only `successful` and
    /// `success` count as paid.
    pub fn from_callback(
        status: &str,
        tx_ref: Option<&str>,
        transaction_id: Option<&str>,
        amount: Option<f64>,
    ) -> Self {
        match status {
            "successful" | "success" => PaymentOutcome::Paid(PaymentConfirmation {
                tx_ref: tx_ref.map(str::to_string),
                transaction_id: transaction_id.map(str::to_string),
                amount,
            }),
            other => PaymentOutcome::Failed {
                status: other.to_string(),
            },
        }
    }
}

pub trait PaymentGateway: Send + Sync {
    /// Open checkout. The receiver resolves once with the donor's outcome.
    fn start_checkout(&self, request: CheckoutRequest) -> oneshot::Receiver<PaymentOutcome>;
}

/// Where the money lands, shown on the receipt.
pub fn destination_label(method: PaymentMethod) -> &'static str {
    match method {
        PaymentMethod::Card => "Visa card ending •••• 1612",
        PaymentMethod::MtnMomo => "MTN MoMo — +256 783 111 015",
        PaymentMethod::AirtelMomo => "Airtel Money — +256 783 111 015",
    }
}

/// Receipt fallback when a donation carries no destination.
pub const DEFAULT_PAYEE: &str = "Brisk Farm Solutions";

/// Gateway that answers every checkout with a fixed callback status after
/// `delay`. Used by the demo binary.
#[derive(Debug, Clone)]
pub struct SimulatedGateway {
    status: String,
    delay: Duration,
}

impl SimulatedGateway {
    pub fn new(status: impl Into<String>, delay: Duration) -> Self {
        Self {
            status: status.into(),
            delay,
        }
    }
}

impl PaymentGateway for SimulatedGateway {
    fn start_checkout(&self, request: CheckoutRequest) -> oneshot::Receiver<PaymentOutcome> {
        let (sender, receiver) = oneshot::channel();
        let status = self.status.clone();
        let delay = self.delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let transaction_id = format!("sim-{}", Utc::now().timestamp_millis());
            debug!(tx_ref = %request.tx_ref, status = %status, "Simulated payment callback");
            let outcome = PaymentOutcome::from_callback(
                &status,
                Some(&request.tx_ref),
                Some(&transaction_id),
                Some(request.amount),
            );
            let _ = sender.send(outcome);
        });
        receiver
    }
}
