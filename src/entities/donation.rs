use crate::actor_framework::Entity;
use crate::domain::{Donation, DonationCreate, DonationPatch, RecordMeta};

use super::NoAction;

fn check_amount(amount: f64) -> Result<(), String> {
    if amount.is_finite() && amount > 0.0 {
        Ok(())
    } else {
        Err(format!("Donation amount must be greater than zero, got {}", amount))
    }
}

impl Entity for Donation {
    type Create = DonationCreate;
    type Patch = DonationPatch;
    type Action = NoAction;
    type ActionResult = ();

    const COLLECTION: &'static str = "donations";
    const STORAGE_KEY: &'static str = "brisk_donations_v1";
    const ID_PREFIX: &'static str = "don";

    fn meta(&self) -> &RecordMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut RecordMeta {
        &mut self.meta
    }

    fn from_create(meta: RecordMeta, params: DonationCreate) -> Result<Self, String> {
        check_amount(params.amount)?;
        if params.currency.trim().is_empty() {
            return Err("Donation currency must not be empty".to_string());
        }
        Ok(Self {
            meta,
            amount: params.amount,
            currency: params.currency,
            status: params.status,
            payment_method: params.payment_method,
            campaign_id: params.campaign_id,
            donor_name: params.donor_name,
            donor_email: params.donor_email,
            donor_phone: params.donor_phone,
            is_anonymous: params.is_anonymous,
            message: params.message,
            receipt_code: params.receipt_code,
            paid_to: params.paid_to,
            provider: params.provider,
            provider_tx_ref: params.provider_tx_ref,
            provider_transaction_id: params.provider_transaction_id,
        })
    }

    fn apply_patch(&mut self, patch: DonationPatch) -> Result<(), String> {
        if let Some(amount) = patch.amount {
            check_amount(amount)?;
            self.amount = amount;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if patch.campaign_id.is_some() {
            self.campaign_id = patch.campaign_id;
        }
        if patch.message.is_some() {
            self.message = patch.message;
        }
        Ok(())
    }

    fn handle_action(&mut self, action: NoAction) -> Result<(), String> {
        match action {}
    }
}
