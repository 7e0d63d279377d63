use tracing::{debug, instrument};

use crate::domain::{Subscriber, SubscriberCreate};
use crate::error::StoreError;

impl_collection_client!(SubscriberClient, Subscriber);

impl SubscriberClient {
    /// Newsletter sign-up. `source` defaults to the footer form.
    #[instrument(skip(self))]
    pub async fn add(&self, email: &str, source: Option<&str>) -> Result<Subscriber, StoreError> {
        debug!("Sending request");
        let payload = SubscriberCreate {
            email: email.to_string(),
            source: source.map(str::to_string),
        };
        self.inner.create(payload).await
    }

    #[instrument(skip(self))]
    pub async fn remove_by_id(&self, id: &str) -> Result<bool, StoreError> {
        debug!("Sending request");
        self.inner.remove(id).await
    }
}
