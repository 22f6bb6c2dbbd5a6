use crate::domain::model::{Collection, Record, Task, TaskDraft, TaskPatch, COMPLETED_STATUS};
use crate::domain::numeric::{patch_id, Numeric};
use crate::domain::ports::RecordStore;
use crate::domain::query::{ListQuery, Predicate};
use crate::services::Gateway;
use crate::utils::error::Result;
use chrono::{Local, NaiveDate, SecondsFormat, Utc};

const TASK_FIELDS: &[&str] = &[
    "Name",
    "title",
    "description",
    "due_date",
    "priority",
    "status",
    "completed_at",
    "farm_id",
    "crop_id",
];

const TASK_BY_FARM_FIELDS: &[&str] = &["title", "status", "due_date", "farm_id"];

const TODAYS_TASK_FIELDS: &[&str] = &[
    "title",
    "description",
    "due_date",
    "priority",
    "status",
    "farm_id",
    "crop_id",
];

/// Day label the service matches date fields against, e.g. `7 Mar 2026`.
pub fn day_label(date: NaiveDate) -> String {
    date.format("%-d %b %Y").to_string()
}

fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub struct TaskService<S: RecordStore> {
    store: S,
}

impl<S: RecordStore> TaskService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    fn gateway(&self) -> Gateway<'_, S> {
        Gateway::new(&self.store, Collection::Task)
    }

    pub async fn list(&self) -> Result<Vec<Task>> {
        self.gateway()
            .list(&ListQuery::projecting(TASK_FIELDS))
            .await
            .inspect_err(|e| tracing::error!("Error fetching tasks: {}", e))
    }

    pub async fn get_by_id(&self, id: impl Into<Numeric>) -> Result<Task> {
        let id = id.into().as_id("id")?;
        self.gateway()
            .get(id, &ListQuery::projecting(TASK_FIELDS))
            .await
            .inspect_err(|e| tracing::error!("Error fetching task with ID {}: {}", id, e))
    }

    pub async fn get_by_farm_id(&self, farm_id: impl Into<Numeric>) -> Result<Vec<Task>> {
        let farm_id = farm_id.into().as_id("farmId")?;
        let query = ListQuery::projecting(TASK_BY_FARM_FIELDS)
            .filter(Predicate::equal_to("farm_id", farm_id));

        self.gateway()
            .list(&query)
            .await
            .inspect_err(|e| tracing::error!("Error fetching tasks for farm {}: {}", farm_id, e))
    }

    /// Open tasks due on the current local calendar day.
    pub async fn todays_tasks(&self) -> Result<Vec<Task>> {
        let today = day_label(Local::now().date_naive());
        let query = ListQuery::projecting(TODAYS_TASK_FIELDS)
            .filter(Predicate::same_day("due_date", today))
            .filter(Predicate::not_equal_to("status", COMPLETED_STATUS));

        self.gateway()
            .list(&query)
            .await
            .inspect_err(|e| tracing::error!("Error fetching today's tasks: {}", e))
    }

    pub async fn create(&self, draft: &TaskDraft) -> Result<Task> {
        let mut record = Record::new();
        record.set("Name", draft.title.as_str());
        record.set("title", draft.title.as_str());
        record.set_some("description", draft.description.as_deref());
        record.set_some("due_date", draft.due_date.as_deref());
        record.set_some("priority", draft.priority.as_deref());
        record.set_some("status", draft.status.as_deref());
        record.set("farm_id", draft.farm_id.as_id("farmId")?);
        if let Some(crop_id) = draft.crop_id.as_ref().filter(|id| !id.is_blank()) {
            record.set("crop_id", crop_id.as_id("cropId")?);
        }

        self.gateway()
            .create_one(record)
            .await
            .inspect_err(|e| tracing::error!("Error creating task: {}", e))
    }

    /// Moving a task to `Completed` stamps `completed_at` with the current time.
    pub async fn update(&self, id: impl Into<Numeric>, patch: &TaskPatch) -> Result<Task> {
        let record = patch_record(id.into().as_id("id")?, patch)?;
        self.gateway()
            .update_one(record)
            .await
            .inspect_err(|e| tracing::error!("Error updating task: {}", e))
    }

    pub async fn delete(&self, id: impl Into<Numeric>) -> Result<bool> {
        let id = id.into().as_id("id")?;
        self.gateway()
            .delete_one(id)
            .await
            .inspect_err(|e| tracing::error!("Error deleting task: {}", e))
    }
}

fn patch_record(id: i64, patch: &TaskPatch) -> Result<Record> {
    let mut record = Record::with_id(id);
    record.set_field("Name", &patch.title);
    record.set_field("title", &patch.title);
    record.set_field("description", &patch.description);
    record.set_field("due_date", &patch.due_date);
    record.set_field("priority", &patch.priority);
    record.set_field("status", &patch.status);
    if matches!(&patch.status, Some(Some(status)) if status == COMPLETED_STATUS) {
        record.set("completed_at", now_timestamp());
    }
    record.set_field("farm_id", &patch_id(&patch.farm_id, "farmId")?);
    match &patch.crop_id {
        None => {}
        Some(Some(crop_id)) if !crop_id.is_blank() => {
            record.set("crop_id", crop_id.as_id("cropId")?);
        }
        Some(_) => record.set("crop_id", serde_json::Value::Null),
    }
    Ok(record)
}
