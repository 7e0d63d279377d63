/// Declares a cloneable client wrapping `CollectionClient<$entity>` with the
/// operations every collection supports.
macro_rules! impl_collection_client {
    ($client_name:ident, $entity:ty) => {
        #[derive(Clone)]
        pub struct $client_name {
            inner: $crate::actor_framework::CollectionClient<$entity>,
        }

        #[allow(dead_code)]
        impl $client_name {
            pub fn new(inner: $crate::actor_framework::CollectionClient<$entity>) -> Self {
                Self { inner }
            }

            #[tracing::instrument(skip(self))]
            pub async fn list(&self) -> Result<Vec<$entity>, $crate::error::StoreError> {
                tracing::debug!("Sending request");
                self.inner.list().await
            }

            #[tracing::instrument(skip(self))]
            pub async fn get_by_id(&self, id: &str) -> Result<Option<$entity>, $crate::error::StoreError> {
                tracing::debug!("Sending request");
                self.inner.get(id).await
            }

            #[tracing::instrument(skip(self))]
            pub async fn create(
                &self,
                payload: <$entity as $crate::actor_framework::Entity>::Create,
            ) -> Result<$entity, $crate::error::StoreError> {
                tracing::debug!("Sending request");
                self.inner.create(payload).await
            }

            /// Create with a caller-supplied id and/or creation time.
            #[tracing::instrument(skip(self))]
            pub async fn insert(
                &self,
                record: $crate::actor_framework::NewRecord<<$entity as $crate::actor_framework::Entity>::Create>,
            ) -> Result<$entity, $crate::error::StoreError> {
                tracing::debug!("Sending request");
                self.inner.insert(record).await
            }

            #[tracing::instrument(skip(self))]
            pub async fn update(
                &self,
                id: &str,
                patch: <$entity as $crate::actor_framework::Entity>::Patch,
            ) -> Result<Option<$entity>, $crate::error::StoreError> {
                tracing::debug!("Sending request");
                self.inner.update(id, patch).await
            }

            #[tracing::instrument(skip(self))]
            pub async fn remove(&self, id: &str) -> Result<bool, $crate::error::StoreError> {
                tracing::debug!("Sending request");
                self.inner.remove(id).await
            }

            #[tracing::instrument(skip(self))]
            pub async fn reset(&self) -> Result<Vec<$entity>, $crate::error::StoreError> {
                tracing::debug!("Sending request");
                self.inner.reset().await
            }
        }
    };
}

/// Adds `get_by_slug` and `get_featured` for slugged, featurable records.
macro_rules! impl_showcase_methods {
    ($client_name:ident, $entity:ty) => {
        impl $client_name {
            #[tracing::instrument(skip(self))]
            pub async fn get_by_slug(&self, slug: &str) -> Result<Option<$entity>, $crate::error::StoreError> {
                tracing::debug!("Sending request");
                self.inner.find_by_slug(slug).await
            }

            /// Featured records for the home page, see [`crate::domain::featured`].
            #[tracing::instrument(skip(self))]
            pub async fn get_featured(&self, limit: usize) -> Result<Vec<$entity>, $crate::error::StoreError> {
                tracing::debug!("Sending request");
                Ok($crate::domain::featured(self.inner.list().await?, limit))
            }
        }
    };
}
