use tracing::{debug, instrument};

use crate::domain::{User, UserPatch, UserRole};
use crate::error::StoreError;

impl_collection_client!(UserClient, User);

impl UserClient {
    #[instrument(skip(self))]
    pub async fn update_role(&self, id: &str, role: UserRole) -> Result<Option<User>, StoreError> {
        debug!("Sending request");
        let patch = UserPatch {
            role: Some(role),
            ..UserPatch::default()
        };
        self.inner.update(id, patch).await
    }
}
