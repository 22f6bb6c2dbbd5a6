use crate::domain::model::{Collection, Farm, FarmDraft, FarmPatch, Record};
use crate::domain::numeric::{patch_number, Numeric};
use crate::domain::ports::RecordStore;
use crate::domain::query::ListQuery;
use crate::services::Gateway;
use crate::utils::error::Result;

const FARM_LIST_FIELDS: &[&str] = &["Name", "location", "total_area", "area_unit", "Tags", "Owner"];

const FARM_FIELDS: &[&str] = &["Name", "location", "total_area", "area_unit", "Tags"];

/// Farms are the parents of every other record; there is no by-parent lookup here.
pub struct FarmService<S: RecordStore> {
    store: S,
}

impl<S: RecordStore> FarmService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    fn gateway(&self) -> Gateway<'_, S> {
        Gateway::new(&self.store, Collection::Farm)
    }

    pub async fn list(&self) -> Result<Vec<Farm>> {
        self.gateway()
            .list(&ListQuery::projecting(FARM_LIST_FIELDS))
            .await
            .inspect_err(|e| tracing::error!("Error fetching farms: {}", e))
    }

    pub async fn get_by_id(&self, id: impl Into<Numeric>) -> Result<Farm> {
        let id = id.into().as_id("id")?;
        self.gateway()
            .get(id, &ListQuery::projecting(FARM_FIELDS))
            .await
            .inspect_err(|e| tracing::error!("Error fetching farm with ID {}: {}", id, e))
    }

    pub async fn create(&self, draft: &FarmDraft) -> Result<Farm> {
        let mut record = Record::new();
        record.set("Name", draft.name.as_str());
        record.set_some("location", draft.location.as_deref());
        if let Some(area) = &draft.total_area {
            record.set("total_area", area.as_number("totalArea")?);
        }
        record.set_some("area_unit", draft.area_unit.as_deref());
        record.set_some("Tags", draft.tags.as_deref());

        self.gateway()
            .create_one(record)
            .await
            .inspect_err(|e| tracing::error!("Error creating farm: {}", e))
    }

    pub async fn update(&self, id: impl Into<Numeric>, patch: &FarmPatch) -> Result<Farm> {
        let mut record = Record::with_id(id.into().as_id("id")?);
        record.set_field("Name", &patch.name);
        record.set_field("location", &patch.location);
        record.set_field("total_area", &patch_number(&patch.total_area, "totalArea")?);
        record.set_field("area_unit", &patch.area_unit);
        record.set_field("Tags", &patch.tags);

        self.gateway()
            .update_one(record)
            .await
            .inspect_err(|e| tracing::error!("Error updating farm: {}", e))
    }

    pub async fn delete(&self, id: impl Into<Numeric>) -> Result<bool> {
        let id = id.into().as_id("id")?;
        self.gateway()
            .delete_one(id)
            .await
            .inspect_err(|e| tracing::error!("Error deleting farm: {}", e))
    }
}
