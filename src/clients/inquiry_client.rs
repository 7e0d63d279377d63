use tracing::{debug, instrument};

use crate::domain::{Inquiry, InquiryPatch, InquiryStatus};
use crate::error::StoreError;

impl_collection_client!(InquiryClient, Inquiry);

impl InquiryClient {
    #[instrument(skip(self))]
    pub async fn list_by_status(&self, status: InquiryStatus) -> Result<Vec<Inquiry>, StoreError> {
        debug!("Sending request");
        self.inner.list_where(|inquiry| inquiry.status == status).await
    }

    #[instrument(skip(self))]
    pub async fn update_status(&self, id: &str, status: InquiryStatus) -> Result<Option<Inquiry>, StoreError> {
        debug!("Sending request");
        let patch = InquiryPatch {
            status: Some(status),
            ..InquiryPatch::default()
        };
        self.inner.update(id, patch).await
    }
}
