use tracing::{debug, instrument};

use crate::domain::{Donation, DonationFilter, DonationStatus};
use crate::error::StoreError;

impl_collection_client!(DonationClient, Donation);

impl DonationClient {
    #[instrument(skip(self))]
    pub async fn list_by_campaign(&self, campaign_id: &str) -> Result<Vec<Donation>, StoreError> {
        debug!("Sending request");
        self.inner
            .list_where(|donation| donation.campaign_id.as_deref() == Some(campaign_id))
            .await
    }

    #[instrument(skip(self))]
    pub async fn list_by_status(&self, status: DonationStatus) -> Result<Vec<Donation>, StoreError> {
        debug!("Sending request");
        self.inner.list_where(|donation| donation.status == status).await
    }

    #[instrument(skip(self))]
    pub async fn filter(&self, filter: DonationFilter) -> Result<Vec<Donation>, StoreError> {
        debug!("Sending request");
        self.inner.list_where(|donation| filter.matches(donation)).await
    }

    /// The donation recorded for a provider transaction, if any.
    #[instrument(skip(self))]
    pub async fn find_by_transaction(&self, transaction_id: &str) -> Result<Option<Donation>, StoreError> {
        debug!("Sending request");
        Ok(self
            .inner
            .list()
            .await?
            .into_iter()
            .find(|donation| donation.provider_transaction_id.as_deref() == Some(transaction_id)))
    }
}
