use crate::domain::numeric::Numeric;
use crate::utils::error::Result;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Status value that marks a task as done.
pub const COMPLETED_STATUS: &str = "Completed";

/// One record in the remote schema, keyed by remote field name.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    pub data: HashMap<String, serde_json::Value>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts an update record addressed at `id`.
    pub fn with_id(id: i64) -> Self {
        let mut record = Self::new();
        record.set("Id", id);
        record
    }

    pub fn set(&mut self, field: &str, value: impl Into<serde_json::Value>) {
        self.data.insert(field.to_string(), value.into());
    }

    /// Sets `field` only when a value was supplied.
    pub fn set_some<T: Into<serde_json::Value>>(&mut self, field: &str, value: Option<T>) {
        if let Some(value) = value {
            self.set(field, value);
        }
    }

    /// Patch semantics: absent fields are skipped, explicit nulls are sent as null.
    pub fn set_field<T>(&mut self, field: &str, value: &Option<Option<T>>)
    where
        T: Clone + Into<serde_json::Value>,
    {
        match value {
            None => {}
            Some(Some(value)) => self.set(field, value.clone()),
            Some(None) => self.set(field, serde_json::Value::Null),
        }
    }

    pub fn get(&self, field: &str) -> Option<&serde_json::Value> {
        self.data.get(field)
    }

    pub fn decode<T: DeserializeOwned>(self) -> Result<T> {
        let object: serde_json::Map<String, serde_json::Value> = self.data.into_iter().collect();
        Ok(serde_json::from_value(serde_json::Value::Object(object))?)
    }
}

/// Remote collection names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Crop,
    Farm,
    Task,
    Transaction,
}

impl Collection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Crop => "crop",
            Collection::Farm => "farm",
            Collection::Task => "task",
            Collection::Transaction => "transaction",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A reference to another record. The service returns either the bare id or a
/// lookup object carrying the referenced record's display name.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Lookup {
    pub id: i64,
    pub name: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LookupRepr {
    Id(i64),
    Object {
        #[serde(rename = "Id")]
        id: i64,
        #[serde(rename = "Name", default)]
        name: Option<String>,
    },
}

impl<'de> Deserialize<'de> for Lookup {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Ok(match LookupRepr::deserialize(deserializer)? {
            LookupRepr::Id(id) => Lookup { id, name: None },
            LookupRepr::Object { id, name } => Lookup { id, name },
        })
    }
}

fn reference_id<'de, D>(deserializer: D) -> std::result::Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Lookup>::deserialize(deserializer)?.map(|lookup| lookup.id))
}

/// Distinguishes an absent field from an explicit `null`.
fn present<'de, D, T>(deserializer: D) -> std::result::Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct Crop {
    #[serde(rename(deserialize = "Id"))]
    pub id: i64,
    #[serde(rename(deserialize = "Name"))]
    pub name: Option<String>,
    pub variety: Option<String>,
    pub planted_date: Option<String>,
    pub expected_harvest: Option<String>,
    pub area_planted: Option<f64>,
    pub growth_stage: Option<String>,
    pub status: Option<String>,
    #[serde(default, deserialize_with = "reference_id")]
    pub farm_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct Farm {
    #[serde(rename(deserialize = "Id"))]
    pub id: i64,
    #[serde(rename(deserialize = "Name"))]
    pub name: Option<String>,
    pub location: Option<String>,
    pub total_area: Option<f64>,
    pub area_unit: Option<String>,
    #[serde(rename(deserialize = "Tags"))]
    pub tags: Option<String>,
    #[serde(rename(deserialize = "Owner"))]
    pub owner: Option<Lookup>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct Task {
    #[serde(rename(deserialize = "Id"))]
    pub id: i64,
    #[serde(rename(deserialize = "Name"))]
    pub name: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<String>,
    pub priority: Option<String>,
    pub status: Option<String>,
    pub completed_at: Option<String>,
    #[serde(default, deserialize_with = "reference_id")]
    pub farm_id: Option<i64>,
    #[serde(default, deserialize_with = "reference_id")]
    pub crop_id: Option<i64>,
}

impl Task {
    pub fn is_completed(&self) -> bool {
        self.status.as_deref() == Some(COMPLETED_STATUS)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TransactionKind {
    Income,
    Expense,
    Other(String),
}

impl From<String> for TransactionKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Income" => TransactionKind::Income,
            "Expense" => TransactionKind::Expense,
            _ => TransactionKind::Other(value),
        }
    }
}

impl From<TransactionKind> for String {
    fn from(kind: TransactionKind) -> Self {
        match kind {
            TransactionKind::Income => "Income".to_string(),
            TransactionKind::Expense => "Expense".to_string(),
            TransactionKind::Other(value) => value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct Transaction {
    #[serde(rename(deserialize = "Id"))]
    pub id: i64,
    #[serde(rename(deserialize = "Name"))]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<TransactionKind>,
    pub category: Option<String>,
    pub amount: Option<f64>,
    pub description: Option<String>,
    pub date: Option<String>,
    #[serde(default, deserialize_with = "reference_id")]
    pub farm_id: Option<i64>,
}

/// Income and expense totals over a set of transactions.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionSummary {
    pub total_income: f64,
    pub total_expenses: f64,
    pub net_profit: f64,
    pub transaction_count: usize,
}

impl TransactionSummary {
    /// A missing amount counts as zero. Kinds other than income and expense are
    /// counted but not summed.
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        let total_for = |kind: TransactionKind| -> f64 {
            transactions
                .iter()
                .filter(|t| t.kind.as_ref() == Some(&kind))
                .map(|t| t.amount.unwrap_or(0.0))
                .sum()
        };

        let total_income = total_for(TransactionKind::Income);
        let total_expenses = total_for(TransactionKind::Expense);

        Self {
            total_income,
            total_expenses,
            net_profit: total_income - total_expenses,
            transaction_count: transactions.len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CropDraft {
    pub name: String,
    pub variety: Option<String>,
    pub planted_date: Option<String>,
    pub expected_harvest: Option<String>,
    pub area_planted: Option<Numeric>,
    pub growth_stage: Option<String>,
    pub status: Option<String>,
    pub farm_id: Numeric,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CropPatch {
    #[serde(default, deserialize_with = "present")]
    pub name: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub variety: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub planted_date: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub expected_harvest: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub area_planted: Option<Option<Numeric>>,
    #[serde(default, deserialize_with = "present")]
    pub growth_stage: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub status: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub farm_id: Option<Option<Numeric>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FarmDraft {
    pub name: String,
    pub location: Option<String>,
    pub total_area: Option<Numeric>,
    pub area_unit: Option<String>,
    pub tags: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FarmPatch {
    #[serde(default, deserialize_with = "present")]
    pub name: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub location: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub total_area: Option<Option<Numeric>>,
    #[serde(default, deserialize_with = "present")]
    pub area_unit: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub tags: Option<Option<String>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDraft {
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<String>,
    pub priority: Option<String>,
    pub status: Option<String>,
    pub farm_id: Numeric,
    pub crop_id: Option<Numeric>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    #[serde(default, deserialize_with = "present")]
    pub title: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub due_date: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub priority: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub status: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub farm_id: Option<Option<Numeric>>,
    /// `Some(None)` clears the crop link.
    #[serde(default, deserialize_with = "present")]
    pub crop_id: Option<Option<Numeric>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDraft {
    pub description: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub category: Option<String>,
    pub amount: Numeric,
    pub date: Option<String>,
    pub farm_id: Numeric,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionPatch {
    #[serde(default, deserialize_with = "present")]
    pub description: Option<Option<String>>,
    #[serde(rename = "type", default, deserialize_with = "present")]
    pub kind: Option<Option<TransactionKind>>,
    #[serde(default, deserialize_with = "present")]
    pub category: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub amount: Option<Option<Numeric>>,
    #[serde(default, deserialize_with = "present")]
    pub date: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub farm_id: Option<Option<Numeric>>,
}
