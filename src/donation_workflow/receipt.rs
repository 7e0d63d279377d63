use chrono::{DateTime, Utc};
use serde::Serialize;

use super::payment::DEFAULT_PAYEE;
use crate::domain::{Campaign, Donation};

const HEADER: &str = "Brisk Farm Solutions & Construction Company";
const THANK_YOU: &str = "Thank you for supporting sustainable farm and construction systems across Uganda.";

/// `BRISK-<unix millis in upper-case base36>`
pub fn new_receipt_code(now: DateTime<Utc>) -> String {
    format!("BRISK-{}", to_base36(now.timestamp_millis().unsigned_abs()).to_uppercase())
}

fn to_base36(mut value: u64) -> String {
    const DIGITS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if value == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while value > 0 {
        out.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    out.reverse();
    String::from_utf8_lossy(&out).into_owned()
}

/// Grouped thousands, at most three decimals: `150000.0` → `150,000`.
pub fn format_amount(amount: f64) -> String {
    let fixed = format!("{:.3}", amount.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));

    let mut grouped = String::new();
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let frac = frac_part.trim_end_matches('0');
    let sign = if amount < 0.0 { "-" } else { "" };
    if frac.is_empty() {
        format!("{}{}", sign, grouped)
    } else {
        format!("{}{}.{}", sign, grouped, frac)
    }
}

/// Printable receipt for a recorded donation.
#[derive(Debug, Clone)]
pub struct Receipt<'a> {
    donation: &'a Donation,
    campaign: Option<&'a Campaign>,
}

#[derive(Serialize)]
struct VerificationPayload<'a> {
    #[serde(rename = "ref")]
    reference: &'a str,
    amount: f64,
    currency: &'a str,
    campaign: Option<&'a str>,
    #[serde(rename = "createdAt")]
    created_at: DateTime<Utc>,
}

impl<'a> Receipt<'a> {
    pub fn new(donation: &'a Donation, campaign: Option<&'a Campaign>) -> Self {
        Self { donation, campaign }
    }

    /// Receipt code, or the donation id for records created without one.
    pub fn reference(&self) -> &str {
        self.donation
            .receipt_code
            .as_deref()
            .unwrap_or(&self.donation.meta.id)
    }

    pub fn file_name(&self) -> String {
        format!("brisk-donation-{}.txt", self.reference())
    }

    pub fn lines(&self) -> Vec<String> {
        let donation = self.donation;
        vec![
            HEADER.to_string(),
            "Donation Receipt".to_string(),
            "-".repeat(40),
            format!("Receipt reference: {}", self.reference()),
            format!("Date: {}", donation.meta.created_at.format("%Y-%m-%d %H:%M:%S UTC")),
            format!("Amount: {} {}", format_amount(donation.amount), donation.currency),
            format!("Paid to: {}", donation.paid_to.as_deref().unwrap_or(DEFAULT_PAYEE)),
            format!(
                "Campaign: {}",
                self.campaign.map(|c| c.name.as_str()).unwrap_or("General support")
            ),
            String::new(),
            THANK_YOU.to_string(),
        ]
    }

    pub fn text(&self) -> String {
        self.lines().join("\n")
    }

    /// Compact JSON encoded into the receipt's QR code.
    pub fn verification_payload(&self) -> serde_json::Result<String> {
        serde_json::to_string(&VerificationPayload {
            reference: self.reference(),
            amount: self.donation.amount,
            currency: &self.donation.currency,
            campaign: self.campaign.map(|c| c.slug.as_str()),
            created_at: self.donation.meta.created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DonationStatus, PaymentMethod, RecordMeta};

    fn donation() -> Donation {
        Donation {
            meta: RecordMeta {
                id: "don_1".to_string(),
                created_at: DateTime::parse_from_rfc3339("2025-03-04T05:06:07Z").unwrap().with_timezone(&Utc),
                updated_at: DateTime::parse_from_rfc3339("2025-03-04T05:06:07Z").unwrap().with_timezone(&Utc),
            },
            amount: 150_000.0,
            currency: "UGX".to_string(),
            status: DonationStatus::Confirmed,
            payment_method: PaymentMethod::MtnMomo,
            campaign_id: None,
            donor_name: None,
            donor_email: None,
            donor_phone: None,
            is_anonymous: true,
            message: None,
            receipt_code: Some("BRISK-M7UAB1C2".to_string()),
            paid_to: Some("MTN MoMo — +256 783 111 015".to_string()),
            provider: None,
            provider_tx_ref: None,
            provider_transaction_id: None,
        }
    }

    #[test]
    fn test_receipt_lines() {
        let donation = donation();
        let lines = Receipt::new(&donation, None).lines();
        assert_eq!(lines[0], HEADER);
        assert_eq!(lines[2], "----------------------------------------");
        assert_eq!(lines[3], "Receipt reference: BRISK-M7UAB1C2");
        assert_eq!(lines[4], "Date: 2025-03-04 05:06:07 UTC");
        assert_eq!(lines[5], "Amount: 150,000 UGX");
        assert_eq!(lines[6], "Paid to: MTN MoMo — +256 783 111 015");
        assert_eq!(lines[7], "Campaign: General support");
        assert_eq!(lines[8], "");
        assert_eq!(lines.len(), 10);
    }

    #[test]
    fn test_reference_falls_back_to_id() {
        let mut donation = donation();
        donation.receipt_code = None;
        donation.paid_to = None;
        let receipt = Receipt::new(&donation, None);
        assert_eq!(receipt.reference(), "don_1");
        assert_eq!(receipt.file_name(), "brisk-donation-don_1.txt");
        assert!(receipt.text().contains("Paid to: Brisk Farm Solutions"));
    }

    #[test]
    fn test_verification_payload() {
        let donation = donation();
        let payload = Receipt::new(&donation, None).verification_payload().unwrap();
        let value: serde_json::Value = serde_json::from_str(&payload).unwrap();
        assert_eq!(value["ref"], "BRISK-M7UAB1C2");
        assert_eq!(value["currency"], "UGX");
        assert!(value["campaign"].is_null());
        assert_eq!(value["createdAt"], "2025-03-04T05:06:07Z");
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(150_000.0), "150,000");
        assert_eq!(format_amount(999.0), "999");
        assert_eq!(format_amount(1_234_567.5), "1,234,567.5");
        assert_eq!(format_amount(0.125), "0.125");
    }

    #[test]
    fn test_receipt_code_is_upper_base36_millis() {
        let now = DateTime::parse_from_rfc3339("2025-03-04T05:06:07Z").unwrap().with_timezone(&Utc);
        let code = new_receipt_code(now);
        let digits = code.strip_prefix("BRISK-").unwrap();
        assert_eq!(
            u64::from_str_radix(&digits.to_lowercase(), 36).unwrap(),
            now.timestamp_millis() as u64
        );
        assert_eq!(digits, digits.to_uppercase());
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
    }
}
