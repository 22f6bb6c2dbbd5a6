use crate::domain::query::{
    BatchResponse, DeleteBatch, ListQuery, ListResponse, RecordBatch, RecordResponse,
};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// The remote record service, addressed by collection name.
///
/// Implementations return the service's envelope as-is; interpreting `success`
/// flags is left to the callers.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn fetch_records(&self, collection: &str, query: &ListQuery) -> Result<ListResponse>;

    async fn get_record_by_id(
        &self,
        collection: &str,
        id: i64,
        query: &ListQuery,
    ) -> Result<RecordResponse>;

    async fn create_records(&self, collection: &str, batch: &RecordBatch)
        -> Result<BatchResponse>;

    async fn update_records(&self, collection: &str, batch: &RecordBatch)
        -> Result<BatchResponse>;

    async fn delete_records(&self, collection: &str, batch: &DeleteBatch)
        -> Result<BatchResponse>;
}

#[async_trait]
impl<T: RecordStore + ?Sized> RecordStore for Arc<T> {
    async fn fetch_records(&self, collection: &str, query: &ListQuery) -> Result<ListResponse> {
        (**self).fetch_records(collection, query).await
    }

    async fn get_record_by_id(
        &self,
        collection: &str,
        id: i64,
        query: &ListQuery,
    ) -> Result<RecordResponse> {
        (**self).get_record_by_id(collection, id, query).await
    }

    async fn create_records(
        &self,
        collection: &str,
        batch: &RecordBatch,
    ) -> Result<BatchResponse> {
        (**self).create_records(collection, batch).await
    }

    async fn update_records(
        &self,
        collection: &str,
        batch: &RecordBatch,
    ) -> Result<BatchResponse> {
        (**self).update_records(collection, batch).await
    }

    async fn delete_records(
        &self,
        collection: &str,
        batch: &DeleteBatch,
    ) -> Result<BatchResponse> {
        (**self).delete_records(collection, batch).await
    }
}

/// Connection settings for the remote record service.
pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> &str;
    fn project_id(&self) -> &str;
    fn public_key(&self) -> &str;
}
