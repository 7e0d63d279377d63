use std::collections::BTreeMap;
use std::fmt;

use crate::domain::PaymentMethod;

pub const DEFAULT_CURRENCY: &str = "UGX";

pub const AMOUNT_INVALID: &str = "Enter a valid amount greater than zero.";
pub const CURRENCY_MISSING: &str = "Select a currency.";
pub const PAYMENT_METHOD_INVALID: &str = "Select a valid payment method.";
pub const NAME_MISSING: &str = "Please enter your name or choose to give anonymously.";
pub const EMAIL_MISSING: &str = "Please enter your email or choose to give anonymously.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Field {
    Amount,
    Currency,
    PaymentMethod,
    DonorName,
    DonorEmail,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Amount => "amount",
            Field::Currency => "currency",
            Field::PaymentMethod => "payment_method",
            Field::DonorName => "donor_name",
            Field::DonorEmail => "donor_email",
        };
        f.write_str(name)
    }
}

pub type FieldErrors = BTreeMap<Field, &'static str>;

/// Raw form input, exactly as typed.
#[derive(Debug, Clone, PartialEq)]
pub struct DonationForm {
    pub amount: String,
    pub currency: String,
    pub payment_method: String,
    pub campaign_id: String,
    pub donor_name: String,
    pub donor_email: String,
    pub donor_phone: String,
    pub is_anonymous: bool,
    pub message: String,
}

impl Default for DonationForm {
    fn default() -> Self {
        Self {
            amount: String::new(),
            currency: DEFAULT_CURRENCY.to_string(),
            payment_method: PaymentMethod::Card.as_str().to_string(),
            campaign_id: String::new(),
            donor_name: String::new(),
            donor_email: String::new(),
            donor_phone: String::new(),
            is_anonymous: false,
            message: String::new(),
        }
    }
}

/// A form that passed validation. Donor identity is dropped for anonymous
/// gifts.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedDonation {
    pub amount: f64,
    pub currency: String,
    pub payment_method: PaymentMethod,
    pub campaign_id: Option<String>,
    pub donor_name: Option<String>,
    pub donor_email: Option<String>,
    pub donor_phone: Option<String>,
    pub is_anonymous: bool,
    pub message: Option<String>,
}

/// Positive, finite amount or `None`.
pub fn parse_amount(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite() && *amount > 0.0)
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

impl DonationForm {
    pub fn validate(&self) -> Result<ValidatedDonation, FieldErrors> {
        let mut errors = FieldErrors::new();

        let amount = parse_amount(&self.amount);
        if amount.is_none() {
            errors.insert(Field::Amount, AMOUNT_INVALID);
        }

        let currency = non_empty(&self.currency);
        if currency.is_none() {
            errors.insert(Field::Currency, CURRENCY_MISSING);
        }

        let payment_method = PaymentMethod::parse(self.payment_method.trim());
        if payment_method.is_none() {
            errors.insert(Field::PaymentMethod, PAYMENT_METHOD_INVALID);
        }

        let (donor_name, donor_email) = if self.is_anonymous {
            (None, None)
        } else {
            let name = non_empty(&self.donor_name);
            if name.is_none() {
                errors.insert(Field::DonorName, NAME_MISSING);
            }
            let email = non_empty(&self.donor_email);
            if email.is_none() {
                errors.insert(Field::DonorEmail, EMAIL_MISSING);
            }
            (name, email)
        };

        match (amount, currency, payment_method) {
            (Some(amount), Some(currency), Some(payment_method)) if errors.is_empty() => Ok(ValidatedDonation {
                amount,
                currency,
                payment_method,
                campaign_id: non_empty(&self.campaign_id),
                donor_name,
                donor_email,
                donor_phone: non_empty(&self.donor_phone),
                is_anonymous: self.is_anonymous,
                message: non_empty(&self.message),
            }),
            _ => Err(errors),
        }
    }
}
