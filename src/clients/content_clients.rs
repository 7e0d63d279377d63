use tracing::{debug, instrument};

use crate::domain::{Project, Service, Testimonial};
use crate::error::StoreError;

impl_collection_client!(ServiceClient, Service);
impl_showcase_methods!(ServiceClient, Service);

impl_collection_client!(ProjectClient, Project);
impl_showcase_methods!(ProjectClient, Project);

impl_collection_client!(TestimonialClient, Testimonial);

impl TestimonialClient {
    /// Every testimonial, including hidden ones (admin view).
    #[instrument(skip(self))]
    pub async fn list_all(&self) -> Result<Vec<Testimonial>, StoreError> {
        debug!("Sending request");
        self.inner.list().await
    }

    /// Testimonials not explicitly hidden.
    #[instrument(skip(self))]
    pub async fn list_public(&self) -> Result<Vec<Testimonial>, StoreError> {
        debug!("Sending request");
        self.inner.list_where(|t| t.is_active).await
    }
}
