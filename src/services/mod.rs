//! Per-entity services over a [`RecordStore`].
//!
//! Every service shares the same failure handling, implemented once in [`Gateway`]:
//! a response whose `success` flag is false fails with the service's message, and a
//! successful batch response fails on its first per-record failure. Failures are
//! logged before they are returned; nothing is retried.

pub mod crop;
pub mod farm;
pub mod task;
pub mod transaction;

use crate::domain::model::{Collection, Record};
use crate::domain::ports::RecordStore;
use crate::domain::query::{BatchResponse, BatchResult, DeleteBatch, ListQuery, RecordBatch};
use crate::utils::error::{AdapterError, Result};
use serde::de::DeserializeOwned;

pub(crate) struct Gateway<'a, S: RecordStore + ?Sized> {
    store: &'a S,
    collection: Collection,
}

impl<'a, S: RecordStore + ?Sized> Gateway<'a, S> {
    pub(crate) fn new(store: &'a S, collection: Collection) -> Self {
        Self { store, collection }
    }

    pub(crate) async fn list<T: DeserializeOwned>(&self, query: &ListQuery) -> Result<Vec<T>> {
        let response = self
            .store
            .fetch_records(self.collection.as_str(), query)
            .await?;
        self.ensure_success(response.success, response.message, "fetch")?;

        let records = response.data.unwrap_or_default();
        tracing::debug!("Fetched {} {} records", records.len(), self.collection);
        records.into_iter().map(Record::decode).collect()
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, id: i64, query: &ListQuery) -> Result<T> {
        let response = self
            .store
            .get_record_by_id(self.collection.as_str(), id, query)
            .await?;
        self.ensure_success(response.success, response.message, "fetch")?;

        response
            .data
            .ok_or_else(|| AdapterError::NotFound {
                entity: self.collection.to_string(),
                id,
            })?
            .decode()
    }

    pub(crate) async fn create_one<T: DeserializeOwned>(&self, record: Record) -> Result<T> {
        let batch = RecordBatch {
            records: vec![record],
        };
        let response = self
            .store
            .create_records(self.collection.as_str(), &batch)
            .await?;
        self.returned_record(response, "create")
    }

    pub(crate) async fn update_one<T: DeserializeOwned>(&self, record: Record) -> Result<T> {
        let batch = RecordBatch {
            records: vec![record],
        };
        let response = self
            .store
            .update_records(self.collection.as_str(), &batch)
            .await?;
        self.returned_record(response, "update")
    }

    pub(crate) async fn delete_one(&self, id: i64) -> Result<bool> {
        let batch = DeleteBatch {
            record_ids: vec![id],
        };
        let response = self
            .store
            .delete_records(self.collection.as_str(), &batch)
            .await?;
        self.check_batch(response, "delete")?;
        Ok(true)
    }

    fn returned_record<T: DeserializeOwned>(
        &self,
        response: BatchResponse,
        operation: &str,
    ) -> Result<T> {
        let data = self
            .check_batch(response, operation)?
            .and_then(|result| result.data);

        match data {
            Some(record) => record.decode(),
            None => {
                let message = format!(
                    "Failed to {} {}: the service returned no record",
                    operation, self.collection
                );
                tracing::error!("{}", message);
                Err(AdapterError::remote(message))
            }
        }
    }

    /// Returns the first result of a successful batch.
    fn check_batch(
        &self,
        response: BatchResponse,
        operation: &str,
    ) -> Result<Option<BatchResult>> {
        self.ensure_success(response.success, response.message, operation)?;

        let results = response.results.unwrap_or_default();
        let failed: Vec<&BatchResult> = results.iter().filter(|result| !result.success).collect();

        if let Some(first) = failed.first() {
            tracing::error!(
                "Failed to {} {} records:{}",
                operation,
                failed.len(),
                serde_json::to_string(&failed).unwrap_or_default()
            );
            let message = first
                .message
                .clone()
                .filter(|message| !message.is_empty())
                .unwrap_or_else(|| self.fallback_message(operation));
            return Err(AdapterError::remote(message));
        }

        Ok(results.into_iter().next())
    }

    fn ensure_success(&self, success: bool, message: Option<String>, operation: &str) -> Result<()> {
        if success {
            return Ok(());
        }

        let message = message
            .filter(|message| !message.is_empty())
            .unwrap_or_else(|| self.fallback_message(operation));
        tracing::error!("{}", message);
        Err(AdapterError::remote(message))
    }

    fn fallback_message(&self, operation: &str) -> String {
        format!("Failed to {} {}", operation, self.collection)
    }
}
