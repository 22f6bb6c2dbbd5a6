//! Request and response shapes of the remote record service.

use crate::domain::model::Record;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSelector {
    pub field: FieldName,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldName {
    #[serde(rename = "Name")]
    pub name: String,
}

impl FieldSelector {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            field: FieldName { name: name.into() },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    EqualTo,
    NotEqualTo,
    ExactMatch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubOperator {
    /// Compare date values at calendar-day granularity.
    Day,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Predicate {
    pub field_name: String,
    pub operator: Operator,
    pub values: Vec<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_operator: Option<SubOperator>,
}

impl Predicate {
    pub fn equal_to(field: &str, value: impl Into<serde_json::Value>) -> Self {
        Self::new(field, Operator::EqualTo, value)
    }

    pub fn not_equal_to(field: &str, value: impl Into<serde_json::Value>) -> Self {
        Self::new(field, Operator::NotEqualTo, value)
    }

    pub fn same_day(field: &str, day_label: impl Into<serde_json::Value>) -> Self {
        Self {
            sub_operator: Some(SubOperator::Day),
            ..Self::new(field, Operator::ExactMatch, day_label)
        }
    }

    fn new(field: &str, operator: Operator, value: impl Into<serde_json::Value>) -> Self {
        Self {
            field_name: field.to_string(),
            operator,
            values: vec![value.into()],
            sub_operator: None,
        }
    }
}

/// Projection plus optional filter, as sent to the list and get-by-id calls.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ListQuery {
    pub fields: Vec<FieldSelector>,
    #[serde(rename = "where", default, skip_serializing_if = "Vec::is_empty")]
    pub where_: Vec<Predicate>,
}

impl ListQuery {
    pub fn projecting(fields: &[&str]) -> Self {
        Self {
            fields: fields.iter().map(|name| FieldSelector::new(*name)).collect(),
            where_: Vec::new(),
        }
    }

    pub fn filter(mut self, predicate: Predicate) -> Self {
        self.where_.push(predicate);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RecordBatch {
    pub records: Vec<Record>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DeleteBatch {
    #[serde(rename = "RecordIds")]
    pub record_ids: Vec<i64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ListResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<Record>>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RecordResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Record>,
}

/// Envelope of create, update and delete calls: one result per submitted record.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BatchResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<Vec<BatchResult>>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BatchResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Record>,
}
