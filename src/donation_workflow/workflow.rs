use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::oneshot;
use tracing::{debug, info, instrument, warn};

use super::form::{DonationForm, Field, FieldErrors, ValidatedDonation};
use super::payment::{
    destination_label, new_tx_ref, CheckoutRequest, PaymentConfirmation, PaymentGateway, PaymentOutcome,
    PROVIDER_NAME,
};
use super::receipt::{new_receipt_code, Receipt};
use super::state::{DonationResult, WorkflowState, WorkflowStep, CONFIRM_AMOUNT_INVALID};
use crate::clients::{CampaignClient, DonationClient};
use crate::domain::{Campaign, DonationCreate, DonationStatus};
use crate::error::{StoreError, WorkflowFailure};

/// A paid donation whose recording failed, kept for `retry_recording`.
#[derive(Debug, Clone)]
struct UnrecordedPayment {
    donation: ValidatedDonation,
    confirmation: PaymentConfirmation,
    tx_ref: String,
    campaign: Option<Campaign>,
}

/// One donor's pass through the donation wizard.
pub struct DonationWorkflow {
    campaigns: CampaignClient,
    donations: DonationClient,
    gateway: Arc<dyn PaymentGateway>,
    payment_timeout: Duration,
    form: DonationForm,
    campaign_slug_hint: Option<String>,
    active_campaigns: Vec<Campaign>,
    state: WorkflowState,
    unrecorded: Option<UnrecordedPayment>,
}

impl DonationWorkflow {
    pub fn new(
        campaigns: CampaignClient,
        donations: DonationClient,
        gateway: Arc<dyn PaymentGateway>,
        payment_timeout: Duration,
    ) -> Self {
        Self {
            campaigns,
            donations,
            gateway,
            payment_timeout,
            form: DonationForm::default(),
            campaign_slug_hint: None,
            active_campaigns: Vec::new(),
            state: WorkflowState::initial(),
            unrecorded: None,
        }
    }

    /// Campaign slug from the page URL, resolved by [`Self::load_campaigns`].
    pub fn with_campaign_hint(mut self, slug: impl Into<String>) -> Self {
        self.campaign_slug_hint = Some(slug.into());
        self
    }

    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    pub fn step(&self) -> WorkflowStep {
        self.state.step()
    }

    pub fn form(&self) -> &DonationForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut DonationForm {
        &mut self.form
    }

    pub fn active_campaigns(&self) -> &[Campaign] {
        &self.active_campaigns
    }

    pub fn selected_campaign(&self) -> Option<&Campaign> {
        let id = self.form.campaign_id.trim();
        if id.is_empty() {
            return None;
        }
        self.active_campaigns.iter().find(|c| c.meta.id == id)
    }

    /// Load the campaigns offered on the form. A pending slug hint is mapped
    /// to a campaign id once, unless the donor already picked one.
    #[instrument(skip(self))]
    pub async fn load_campaigns(&mut self) -> Result<&[Campaign], StoreError> {
        self.active_campaigns = self.campaigns.get_active().await?;

        if let Some(slug) = self.campaign_slug_hint.take() {
            if self.form.campaign_id.trim().is_empty() {
                match self.active_campaigns.iter().find(|c| c.slug == slug) {
                    Some(campaign) => {
                        debug!(campaign_id = %campaign.meta.id, "Preselected campaign from hint");
                        self.form.campaign_id = campaign.meta.id.clone();
                    }
                    None => debug!(slug = %slug, "No active campaign matches hint"),
                }
            }
        }

        Ok(&self.active_campaigns)
    }

    /// Form → Summary when the input validates; otherwise stay in Form with
    /// per-field errors.
    pub fn advance(&mut self) -> &WorkflowState {
        if self.step() != WorkflowStep::Form {
            debug!(step = ?self.step(), "advance ignored outside the form step");
            return &self.state;
        }

        self.state = match self.form.validate() {
            Ok(donation) => {
                info!(amount = donation.amount, method = %donation.payment_method, "Donation form accepted");
                WorkflowState::Summary { donation, notice: None }
            }
            Err(errors) => {
                debug!(count = errors.len(), "Donation form rejected");
                WorkflowState::Form { errors }
            }
        };
        &self.state
    }

    /// Summary or Error → Form, keeping what was typed.
    pub fn back(&mut self) -> &WorkflowState {
        if matches!(self.step(), WorkflowStep::Summary | WorkflowStep::Error) {
            self.state = WorkflowState::Form {
                errors: FieldErrors::new(),
            };
        }
        &self.state
    }

    /// "New donation": clear the form, errors and result. Refused while a
    /// payment is in flight so its outcome can still be recorded.
    pub fn reset(&mut self) -> &WorkflowState {
        if let WorkflowState::Processing { tx_ref, .. } = &self.state {
            warn!(tx_ref = %tx_ref, "reset refused while a payment is in flight");
            return &self.state;
        }
        self.form = DonationForm::default();
        self.state = WorkflowState::initial();
        self.unrecorded = None;
        &self.state
    }

    /// Summary → Processing. The form is validated again and the checkout
    /// charges exactly the donation that passed. Returns the gateway's answer
    /// channel, or `None` when the workflow stays put: an invalid amount keeps
    /// Summary with a notice, any other invalid field goes back to Form.
    #[instrument(skip(self))]
    pub fn begin_payment(&mut self) -> Option<oneshot::Receiver<PaymentOutcome>> {
        let WorkflowState::Summary { donation: shown, .. } = &self.state else {
            debug!(step = ?self.step(), "begin_payment ignored outside the summary step");
            return None;
        };
        let shown = shown.clone();

        let donation = match self.form.validate() {
            Ok(donation) => donation,
            Err(errors) if errors.contains_key(&Field::Amount) => {
                self.state = WorkflowState::Summary {
                    donation: shown,
                    notice: Some(CONFIRM_AMOUNT_INVALID),
                };
                return None;
            }
            Err(errors) => {
                debug!(count = errors.len(), "Form changed after the summary and no longer validates");
                self.state = WorkflowState::Form { errors };
                return None;
            }
        };

        let tx_ref = new_tx_ref();
        let request = CheckoutRequest::build(&donation, self.selected_campaign(), tx_ref.clone());
        info!(tx_ref = %tx_ref, amount = donation.amount, "Opening checkout");

        self.state = WorkflowState::Processing { donation, tx_ref };
        Some(self.gateway.start_checkout(request))
    }

    /// Apply the gateway's answer to a payment in flight.
    #[instrument(skip(self))]
    pub async fn complete_payment(&mut self, outcome: PaymentOutcome) -> &WorkflowState {
        let WorkflowState::Processing { donation, tx_ref } = &self.state else {
            warn!(step = ?self.step(), "Payment outcome arrived outside the processing step");
            return &self.state;
        };
        let donation = donation.clone();
        let tx_ref = tx_ref.clone();

        match outcome {
            PaymentOutcome::Paid(confirmation) => {
                let unrecorded = UnrecordedPayment {
                    donation,
                    confirmation,
                    tx_ref,
                    campaign: self.selected_campaign().cloned(),
                };
                self.record(unrecorded).await;
            }
            PaymentOutcome::Failed { status } => {
                warn!(tx_ref = %tx_ref, status = %status, "Payment not completed");
                self.state = WorkflowState::Error(WorkflowFailure::PaymentNotCompleted { status });
            }
            PaymentOutcome::Cancelled => {
                info!(tx_ref = %tx_ref, "Payment step closed without paying");
                self.state = WorkflowState::Summary { donation, notice: None };
            }
        }
        &self.state
    }

    /// Run the whole payment step: open checkout, wait for the outcome (up to
    /// the configured timeout) and apply it.
    #[instrument(skip(self))]
    pub async fn confirm(&mut self) -> &WorkflowState {
        let Some(receiver) = self.begin_payment() else {
            return &self.state;
        };

        match tokio::time::timeout(self.payment_timeout, receiver).await {
            Ok(Ok(outcome)) => self.complete_payment(outcome).await,
            Ok(Err(_)) => {
                warn!("Payment gateway dropped the checkout without answering");
                self.complete_payment(PaymentOutcome::Failed {
                    status: "closed".to_string(),
                })
                .await
            }
            Err(_) => {
                self.expire_payment();
                &self.state
            }
        }
    }

    fn expire_payment(&mut self) {
        if let WorkflowState::Processing { tx_ref, .. } = &self.state {
            let waited_secs = self.payment_timeout.as_secs();
            warn!(tx_ref = %tx_ref, waited_secs, "Payment timed out");
            self.state = WorkflowState::Error(WorkflowFailure::PaymentTimedOut {
                tx_ref: tx_ref.clone(),
                waited_secs,
            });
        }
    }

    /// Re-attempt recording a paid donation after `RecordingFailed`. Never
    /// called automatically. A donation already stored for the same provider
    /// transaction is reused instead of written twice.
    #[instrument(skip(self))]
    pub async fn retry_recording(&mut self) -> &WorkflowState {
        let recording_failed = matches!(self.state, WorkflowState::Error(WorkflowFailure::RecordingFailed { .. }));
        match self.unrecorded.take() {
            Some(unrecorded) if recording_failed => {
                info!(tx_ref = %unrecorded.tx_ref, "Retrying donation recording");
                self.record(unrecorded).await;
            }
            other => {
                self.unrecorded = other;
                debug!(step = ?self.step(), "Nothing to retry");
            }
        }
        &self.state
    }

    async fn record(&mut self, unrecorded: UnrecordedPayment) {
        let confirmation = &unrecorded.confirmation;
        let donation = &unrecorded.donation;

        if let Some(paid) = confirmation.amount {
            if (paid - donation.amount).abs() > f64::EPSILON {
                warn!(paid, expected = donation.amount, "Provider reported a different amount");
            }
        }

        let existing = match &confirmation.transaction_id {
            Some(transaction_id) => self.donations.find_by_transaction(transaction_id).await,
            None => Ok(None),
        };

        let recorded = match existing {
            Ok(Some(existing)) => {
                info!(donation_id = %existing.meta.id, "Donation already recorded for this transaction");
                Ok(existing)
            }
            Ok(None) => self.donations.create(Self::confirmed_payload(&unrecorded)).await,
            Err(e) => Err(e),
        };

        match recorded {
            Ok(stored) => {
                info!(donation_id = %stored.meta.id, receipt = ?stored.receipt_code, "Donation recorded");
                self.unrecorded = None;
                self.state = WorkflowState::Success(Box::new(DonationResult {
                    donation: stored,
                    payment_url: None,
                    provider_session_id: unrecorded.confirmation.transaction_id.clone(),
                    campaign: unrecorded.campaign.clone(),
                }));
            }
            Err(e) => {
                warn!(tx_ref = %unrecorded.tx_ref, error = %e, "Payment succeeded but recording failed");
                self.state = WorkflowState::Error(WorkflowFailure::RecordingFailed {
                    tx_ref: unrecorded.tx_ref.clone(),
                    reason: e.to_string(),
                });
                self.unrecorded = Some(unrecorded);
            }
        }
    }

    fn confirmed_payload(unrecorded: &UnrecordedPayment) -> DonationCreate {
        let donation = &unrecorded.donation;
        let confirmation = &unrecorded.confirmation;
        DonationCreate {
            amount: donation.amount,
            currency: donation.currency.clone(),
            status: DonationStatus::Confirmed,
            payment_method: donation.payment_method,
            campaign_id: donation.campaign_id.clone(),
            donor_name: donation.donor_name.clone(),
            donor_email: donation.donor_email.clone(),
            donor_phone: donation.donor_phone.clone(),
            is_anonymous: donation.is_anonymous,
            message: donation.message.clone(),
            receipt_code: Some(new_receipt_code(Utc::now())),
            paid_to: Some(destination_label(donation.payment_method).to_string()),
            provider: Some(PROVIDER_NAME.to_string()),
            provider_tx_ref: confirmation.tx_ref.clone().or_else(|| Some(unrecorded.tx_ref.clone())),
            provider_transaction_id: confirmation.transaction_id.clone(),
        }
    }

    /// Receipt for the success view.
    pub fn receipt(&self) -> Option<Receipt<'_>> {
        match &self.state {
            WorkflowState::Success(result) => Some(Receipt::new(&result.donation, result.campaign.as_ref())),
            _ => None,
        }
    }
}
