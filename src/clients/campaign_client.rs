use tracing::{debug, instrument};

use crate::domain::{Campaign, CampaignStatus};
use crate::entities::CampaignAction;
use crate::error::StoreError;

impl_collection_client!(CampaignClient, Campaign);

impl CampaignClient {
    #[instrument(skip(self))]
    pub async fn get_by_slug(&self, slug: &str) -> Result<Option<Campaign>, StoreError> {
        debug!("Sending request");
        self.inner.find_by_slug(slug).await
    }

    /// Campaigns offered on the donation form: everything not switched off
    /// with `isActive`.
    #[instrument(skip(self))]
    pub async fn get_active(&self) -> Result<Vec<Campaign>, StoreError> {
        debug!("Sending request");
        self.inner.list_where(|campaign| campaign.is_active).await
    }

    #[instrument(skip(self))]
    pub async fn list_by_status(&self, status: CampaignStatus) -> Result<Vec<Campaign>, StoreError> {
        debug!("Sending request");
        self.inner.list_where(|campaign| campaign.status == status).await
    }

    /// Flip `isActive`. Returns the new value, or `None` for an unknown id.
    #[instrument(skip(self))]
    pub async fn toggle_active(&self, id: &str) -> Result<Option<bool>, StoreError> {
        debug!("Sending request");
        self.inner.perform_action(id, CampaignAction::ToggleActive).await
    }
}
