use super::form::{FieldErrors, ValidatedDonation};
use crate::domain::{Campaign, Donation};
use crate::error::WorkflowFailure;

/// Shown in the summary step when the final amount guard fails.
pub const CONFIRM_AMOUNT_INVALID: &str = "Enter a valid amount before confirming.";

/// What the success view renders.
#[derive(Debug, Clone, PartialEq)]
pub struct DonationResult {
    pub donation: Donation,
    /// Always `None`: payment happens inline, there is no redirect.
    pub payment_url: Option<String>,
    pub provider_session_id: Option<String>,
    pub campaign: Option<Campaign>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowState {
    Form {
        errors: FieldErrors,
    },
    Summary {
        donation: ValidatedDonation,
        notice: Option<&'static str>,
    },
    Processing {
        donation: ValidatedDonation,
        tx_ref: String,
    },
    Success(Box<DonationResult>),
    Error(WorkflowFailure),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowStep {
    Form,
    Summary,
    Processing,
    Success,
    Error,
}

impl WorkflowState {
    pub fn initial() -> Self {
        WorkflowState::Form {
            errors: FieldErrors::new(),
        }
    }

    pub fn step(&self) -> WorkflowStep {
        match self {
            WorkflowState::Form { .. } => WorkflowStep::Form,
            WorkflowState::Summary { .. } => WorkflowStep::Summary,
            WorkflowState::Processing { .. } => WorkflowStep::Processing,
            WorkflowState::Success(_) => WorkflowStep::Success,
            WorkflowState::Error(_) => WorkflowStep::Error,
        }
    }

    /// Field errors in the form step; empty elsewhere.
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            WorkflowState::Form { errors } => Some(errors),
            _ => None,
        }
    }

    /// Message for the error view.
    pub fn error_message(&self) -> Option<String> {
        match self {
            WorkflowState::Error(failure) => Some(failure.to_string()),
            _ => None,
        }
    }

    /// Submission is disabled while a payment is in flight.
    pub fn can_submit(&self) -> bool {
        matches!(self, WorkflowState::Summary { .. })
    }
}
