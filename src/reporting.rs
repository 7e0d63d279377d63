//! Read-only donation figures for the admin dashboard and campaigns page.

use std::collections::HashSet;

use chrono::{DateTime, Datelike, Utc};
use tracing::instrument;

use crate::clients::{CampaignClient, DonationClient};
use crate::domain::{Campaign, CampaignStatus, Donation, DonationStatus};
use crate::error::StoreError;

pub const UNNAMED_CAMPAIGN: &str = "Unnamed campaign";

#[derive(Debug, Clone, PartialEq)]
pub struct TopCampaign {
    pub id: String,
    pub name: String,
    pub total_amount: f64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DashboardSummary {
    /// Confirmed donations created in the current calendar month (UTC).
    pub month_total: f64,
    /// Distinct donor emails among those donations.
    pub donors_count: usize,
    /// Highest confirmed total across all time.
    pub top_campaign: Option<TopCampaign>,
}

#[derive(Clone)]
pub struct DonationReport {
    campaigns: CampaignClient,
    donations: DonationClient,
}

fn same_month(a: DateTime<Utc>, b: DateTime<Utc>) -> bool {
    a.year() == b.year() && a.month() == b.month()
}

/// Confirmed totals per campaign id, in order of first donation.
fn confirmed_totals(donations: &[Donation]) -> Vec<(String, f64)> {
    let mut totals: Vec<(String, f64)> = Vec::new();
    for donation in donations.iter().filter(|d| d.status == DonationStatus::Confirmed) {
        let Some(campaign_id) = donation.campaign_id.as_deref().filter(|id| !id.is_empty()) else {
            continue;
        };
        match totals.iter_mut().find(|(id, _)| id == campaign_id) {
            Some((_, total)) => *total += donation.amount,
            None => totals.push((campaign_id.to_string(), donation.amount)),
        }
    }
    totals
}

impl DonationReport {
    pub fn new(campaigns: CampaignClient, donations: DonationClient) -> Self {
        Self { campaigns, donations }
    }

    /// Campaigns, optionally narrowed to one status, with `raised_amount`
    /// recomputed from their confirmed donations.
    #[instrument(skip(self))]
    pub async fn campaign_totals(&self, status: Option<CampaignStatus>) -> Result<Vec<Campaign>, StoreError> {
        let donations = self.donations.list_by_status(DonationStatus::Confirmed).await?;
        let campaigns = self.campaigns.list().await?;

        Ok(campaigns
            .into_iter()
            .filter(|c| status.map_or(true, |s| c.status == s))
            .map(|mut campaign| {
                campaign.raised_amount = donations
                    .iter()
                    .filter(|d| d.campaign_id.as_deref() == Some(campaign.meta.id.as_str()))
                    .map(|d| d.amount)
                    .sum();
                campaign
            })
            .collect())
    }

    #[instrument(skip(self))]
    pub async fn dashboard_summary(&self, now: DateTime<Utc>) -> Result<DashboardSummary, StoreError> {
        let donations = self.donations.list().await?;

        let this_month: Vec<&Donation> = donations
            .iter()
            .filter(|d| d.status == DonationStatus::Confirmed && same_month(d.meta.created_at, now))
            .collect();

        let month_total: f64 = this_month.iter().map(|d| d.amount).sum();
        let donors_count = this_month
            .iter()
            .filter_map(|d| d.donor_email.as_deref())
            .filter(|email| !email.is_empty())
            .collect::<HashSet<_>>()
            .len();

        let mut best: Option<(String, f64)> = None;
        for (id, total) in confirmed_totals(&donations) {
            if total > best.as_ref().map_or(0.0, |(_, max)| *max) {
                best = Some((id, total));
            }
        }

        let top_campaign = match best {
            Some((id, total_amount)) => {
                let name = self
                    .campaigns
                    .get_by_id(&id)
                    .await?
                    .map(|c| c.name)
                    .unwrap_or_else(|| UNNAMED_CAMPAIGN.to_string());
                Some(TopCampaign { id, name, total_amount })
            }
            None => None,
        };

        Ok(DashboardSummary {
            month_total,
            donors_count,
            top_campaign,
        })
    }
}
