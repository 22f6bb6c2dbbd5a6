use crate::domain::model::{
    Collection, Record, Transaction, TransactionDraft, TransactionPatch, TransactionSummary,
};
use crate::domain::numeric::{patch_id, patch_number, Numeric};
use crate::domain::ports::RecordStore;
use crate::domain::query::{ListQuery, Predicate};
use crate::services::Gateway;
use crate::utils::error::Result;

const TRANSACTION_FIELDS: &[&str] = &[
    "Name",
    "type",
    "category",
    "amount",
    "description",
    "date",
    "farm_id",
];

const TRANSACTION_BY_FARM_FIELDS: &[&str] = &["type", "amount", "date", "farm_id"];

pub struct TransactionService<S: RecordStore> {
    store: S,
}

impl<S: RecordStore> TransactionService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    fn gateway(&self) -> Gateway<'_, S> {
        Gateway::new(&self.store, Collection::Transaction)
    }

    pub async fn list(&self) -> Result<Vec<Transaction>> {
        self.gateway()
            .list(&ListQuery::projecting(TRANSACTION_FIELDS))
            .await
            .inspect_err(|e| tracing::error!("Error fetching transactions: {}", e))
    }

    pub async fn get_by_id(&self, id: impl Into<Numeric>) -> Result<Transaction> {
        let id = id.into().as_id("id")?;
        self.gateway()
            .get(id, &ListQuery::projecting(TRANSACTION_FIELDS))
            .await
            .inspect_err(|e| tracing::error!("Error fetching transaction with ID {}: {}", id, e))
    }

    pub async fn get_by_farm_id(&self, farm_id: impl Into<Numeric>) -> Result<Vec<Transaction>> {
        let farm_id = farm_id.into().as_id("farmId")?;
        let query = ListQuery::projecting(TRANSACTION_BY_FARM_FIELDS)
            .filter(Predicate::equal_to("farm_id", farm_id));

        self.gateway().list(&query).await.inspect_err(|e| {
            tracing::error!("Error fetching transactions for farm {}: {}", farm_id, e)
        })
    }

    /// Totals over every transaction; computed locally, never stored.
    pub async fn recent_summary(&self) -> Result<TransactionSummary> {
        let transactions = self
            .list()
            .await
            .inspect_err(|e| tracing::error!("Error getting recent summary: {}", e))?;

        let summary = TransactionSummary::from_transactions(&transactions);
        tracing::debug!(
            "Summarized {} transactions: net profit {}",
            summary.transaction_count,
            summary.net_profit
        );
        Ok(summary)
    }

    pub async fn create(&self, draft: &TransactionDraft) -> Result<Transaction> {
        let mut record = Record::new();
        record.set("Name", draft.description.as_str());
        record.set("type", String::from(draft.kind.clone()));
        record.set_some("category", draft.category.as_deref());
        record.set("amount", draft.amount.as_number("amount")?);
        record.set("description", draft.description.as_str());
        record.set_some("date", draft.date.as_deref());
        record.set("farm_id", draft.farm_id.as_id("farmId")?);

        self.gateway()
            .create_one(record)
            .await
            .inspect_err(|e| tracing::error!("Error creating transaction: {}", e))
    }

    pub async fn update(
        &self,
        id: impl Into<Numeric>,
        patch: &TransactionPatch,
    ) -> Result<Transaction> {
        let mut record = Record::with_id(id.into().as_id("id")?);
        record.set_field("Name", &patch.description);
        record.set_field("description", &patch.description);
        let kind = patch.kind.clone().map(|kind| kind.map(String::from));
        record.set_field("type", &kind);
        record.set_field("category", &patch.category);
        record.set_field("amount", &patch_number(&patch.amount, "amount")?);
        record.set_field("date", &patch.date);
        record.set_field("farm_id", &patch_id(&patch.farm_id, "farmId")?);

        self.gateway()
            .update_one(record)
            .await
            .inspect_err(|e| tracing::error!("Error updating transaction: {}", e))
    }

    pub async fn delete(&self, id: impl Into<Numeric>) -> Result<bool> {
        let id = id.into().as_id("id")?;
        self.gateway()
            .delete_one(id)
            .await
            .inspect_err(|e| tracing::error!("Error deleting transaction: {}", e))
    }
}
