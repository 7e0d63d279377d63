use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::record::RecordMeta;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DonationStatus {
    #[default]
    Pending,
    Confirmed,
    Failed,
    Refunded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    #[default]
    Card,
    MtnMomo,
    AirtelMomo,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 3] = [
        PaymentMethod::Card,
        PaymentMethod::MtnMomo,
        PaymentMethod::AirtelMomo,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Card => "card",
            PaymentMethod::MtnMomo => "mtn_momo",
            PaymentMethod::AirtelMomo => "airtel_momo",
        }
    }

    /// Parse a wire name. Anything outside the allowed set is `None`.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|method| method.as_str() == value)
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recorded donation. Donor fields are `None` for anonymous gifts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Donation {
    #[serde(flatten)]
    pub meta: RecordMeta,
    pub amount: f64,
    pub currency: String,
    #[serde(default)]
    pub status: DonationStatus,
    pub payment_method: PaymentMethod,
    #[serde(default, alias = "campaignId")]
    pub campaign_id: Option<String>,
    #[serde(default)]
    pub donor_name: Option<String>,
    #[serde(default)]
    pub donor_email: Option<String>,
    #[serde(default)]
    pub donor_phone: Option<String>,
    #[serde(default)]
    pub is_anonymous: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub receipt_code: Option<String>,
    #[serde(default)]
    pub paid_to: Option<String>,
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default)]
    pub provider_tx_ref: Option<String>,
    #[serde(default)]
    pub provider_transaction_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DonationCreate {
    pub amount: f64,
    pub currency: String,
    pub status: DonationStatus,
    pub payment_method: PaymentMethod,
    pub campaign_id: Option<String>,
    pub donor_name: Option<String>,
    pub donor_email: Option<String>,
    pub donor_phone: Option<String>,
    pub is_anonymous: bool,
    pub message: Option<String>,
    pub receipt_code: Option<String>,
    pub paid_to: Option<String>,
    pub provider: Option<String>,
    pub provider_tx_ref: Option<String>,
    pub provider_transaction_id: Option<String>,
}

/// Admin-side corrections to a donation (refunds, re-attribution).
#[derive(Debug, Clone, Default)]
pub struct DonationPatch {
    pub status: Option<DonationStatus>,
    pub amount: Option<f64>,
    pub campaign_id: Option<String>,
    pub message: Option<String>,
}

/// Admin listing criteria. Unset fields match everything; bounds are
/// inclusive.
#[derive(Debug, Clone, Default)]
pub struct DonationFilter {
    pub campaign_id: Option<String>,
    pub status: Option<DonationStatus>,
    pub date_from: Option<DateTime<Utc>>,
    pub date_to: Option<DateTime<Utc>>,
    pub min_amount: Option<f64>,
    pub max_amount: Option<f64>,
}

impl DonationFilter {
    pub fn matches(&self, donation: &Donation) -> bool {
        if let Some(campaign_id) = &self.campaign_id {
            if donation.campaign_id.as_ref() != Some(campaign_id) {
                return false;
            }
        }
        if self.status.is_some_and(|status| donation.status != status) {
            return false;
        }
        if self.min_amount.is_some_and(|min| donation.amount < min) {
            return false;
        }
        if self.max_amount.is_some_and(|max| donation.amount > max) {
            return false;
        }
        let created = donation.meta.created_at;
        if self.date_from.is_some_and(|from| created < from) {
            return false;
        }
        if self.date_to.is_some_and(|to| created > to) {
            return false;
        }
        true
    }
}
