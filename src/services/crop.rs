use crate::domain::model::{Collection, Crop, CropDraft, CropPatch, Record};
use crate::domain::numeric::{patch_id, patch_number, Numeric};
use crate::domain::ports::RecordStore;
use crate::domain::query::{ListQuery, Predicate};
use crate::services::Gateway;
use crate::utils::error::Result;

const CROP_FIELDS: &[&str] = &[
    "Name",
    "variety",
    "planted_date",
    "expected_harvest",
    "area_planted",
    "growth_stage",
    "status",
    "farm_id",
];

const CROP_BY_FARM_FIELDS: &[&str] = &["Name", "variety", "status", "farm_id"];

pub struct CropService<S: RecordStore> {
    store: S,
}

impl<S: RecordStore> CropService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    fn gateway(&self) -> Gateway<'_, S> {
        Gateway::new(&self.store, Collection::Crop)
    }

    pub async fn list(&self) -> Result<Vec<Crop>> {
        self.gateway()
            .list(&ListQuery::projecting(CROP_FIELDS))
            .await
            .inspect_err(|e| tracing::error!("Error fetching crops: {}", e))
    }

    pub async fn get_by_id(&self, id: impl Into<Numeric>) -> Result<Crop> {
        let id = id.into().as_id("id")?;
        self.gateway()
            .get(id, &ListQuery::projecting(CROP_FIELDS))
            .await
            .inspect_err(|e| tracing::error!("Error fetching crop with ID {}: {}", id, e))
    }

    pub async fn get_by_farm_id(&self, farm_id: impl Into<Numeric>) -> Result<Vec<Crop>> {
        let farm_id = farm_id.into().as_id("farmId")?;
        let query = ListQuery::projecting(CROP_BY_FARM_FIELDS)
            .filter(Predicate::equal_to("farm_id", farm_id));

        self.gateway()
            .list(&query)
            .await
            .inspect_err(|e| tracing::error!("Error fetching crops for farm {}: {}", farm_id, e))
    }

    pub async fn create(&self, draft: &CropDraft) -> Result<Crop> {
        let record = draft_record(draft)?;
        self.gateway()
            .create_one(record)
            .await
            .inspect_err(|e| tracing::error!("Error creating crop: {}", e))
    }

    pub async fn update(&self, id: impl Into<Numeric>, patch: &CropPatch) -> Result<Crop> {
        let record = patch_record(id.into().as_id("id")?, patch)?;
        self.gateway()
            .update_one(record)
            .await
            .inspect_err(|e| tracing::error!("Error updating crop: {}", e))
    }

    pub async fn delete(&self, id: impl Into<Numeric>) -> Result<bool> {
        let id = id.into().as_id("id")?;
        self.gateway()
            .delete_one(id)
            .await
            .inspect_err(|e| tracing::error!("Error deleting crop: {}", e))
    }
}

fn draft_record(draft: &CropDraft) -> Result<Record> {
    let mut record = Record::new();
    record.set("Name", draft.name.as_str());
    record.set_some("variety", draft.variety.as_deref());
    record.set_some("planted_date", draft.planted_date.as_deref());
    record.set_some("expected_harvest", draft.expected_harvest.as_deref());
    if let Some(area) = &draft.area_planted {
        record.set("area_planted", area.as_number("areaPlanted")?);
    }
    record.set_some("growth_stage", draft.growth_stage.as_deref());
    record.set_some("status", draft.status.as_deref());
    record.set("farm_id", draft.farm_id.as_id("farmId")?);
    Ok(record)
}

fn patch_record(id: i64, patch: &CropPatch) -> Result<Record> {
    let mut record = Record::with_id(id);
    record.set_field("Name", &patch.name);
    record.set_field("variety", &patch.variety);
    record.set_field("planted_date", &patch.planted_date);
    record.set_field("expected_harvest", &patch.expected_harvest);
    record.set_field("area_planted", &patch_number(&patch.area_planted, "areaPlanted")?);
    record.set_field("growth_stage", &patch.growth_stage);
    record.set_field("status", &patch.status);
    record.set_field("farm_id", &patch_id(&patch.farm_id, "farmId")?);
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::{submitted_record, Call, RecordingStore};
    use crate::utils::error::AdapterError;
    use serde_json::json;

    #[tokio::test]
    async fn test_create_coerces_numeric_fields() {
        let store = RecordingStore::batch(json!({
            "success": true,
            "results": [{"success": true, "data": {"Id": 21, "Name": "Wheat", "farm_id": 3}}]
        }));
        let service = CropService::new(store.clone());

        let draft: CropDraft = serde_json::from_value(json!({
            "name": "Wheat",
            "variety": "Hard Red",
            "areaPlanted": "12.5",
            "farmId": "3"
        }))
        .unwrap();
        let crop = service.create(&draft).await.unwrap();

        assert_eq!(crop.id, 21);
        assert_eq!(
            submitted_record(&store).await,
            json!({
                "Name": "Wheat",
                "variety": "Hard Red",
                "area_planted": 12.5,
                "farm_id": 3
            })
        );
    }

    #[tokio::test]
    async fn test_create_rejects_bad_area_before_dispatch() {
        let store = RecordingStore::batch(json!({"success": true}));
        let service = CropService::new(store.clone());

        let draft: CropDraft = serde_json::from_value(json!({
            "name": "Wheat",
            "areaPlanted": "lots",
            "farmId": 3
        }))
        .unwrap();
        let err = service.create(&draft).await.unwrap_err();

        assert!(matches!(err, AdapterError::InvalidValue { ref field, .. } if field == "areaPlanted"));
        assert!(store.calls().await.is_empty());
    }

    #[tokio::test]
    async fn test_update_sends_only_supplied_fields() {
        let store = RecordingStore::batch(json!({
            "success": true,
            "results": [{"success": true, "data": {"Id": 4, "growth_stage": "Flowering"}}]
        }));
        let service = CropService::new(store.clone());

        let patch = CropPatch {
            growth_stage: Some(Some("Flowering".to_string())),
            farm_id: Some(Some("2".into())),
            ..Default::default()
        };
        let crop = service.update("4", &patch).await.unwrap();

        assert_eq!(crop.growth_stage.as_deref(), Some("Flowering"));
        assert_eq!(
            submitted_record(&store).await,
            json!({"Id": 4, "growth_stage": "Flowering", "farm_id": 2})
        );
    }

    #[tokio::test]
    async fn test_update_sends_explicit_null() {
        let store = RecordingStore::batch(json!({
            "success": true,
            "results": [{"success": true, "data": {"Id": 4, "status": "Sown"}}]
        }));
        let service = CropService::new(store.clone());

        let patch: CropPatch =
            serde_json::from_value(json!({"expectedHarvest": null, "status": "Sown"})).unwrap();
        service.update(4, &patch).await.unwrap();

        assert_eq!(
            submitted_record(&store).await,
            json!({"Id": 4, "expected_harvest": null, "status": "Sown"})
        );
    }

    #[tokio::test]
    async fn test_update_clears_area_with_null() {
        let store = RecordingStore::batch(json!({
            "success": true,
            "results": [{"success": true, "data": {"Id": 4}}]
        }));
        let service = CropService::new(store.clone());

        let patch: CropPatch = serde_json::from_value(json!({"areaPlanted": null})).unwrap();
        service.update(4, &patch).await.unwrap();

        assert_eq!(
            submitted_record(&store).await,
            json!({"Id": 4, "area_planted": null})
        );
    }

    #[tokio::test]
    async fn test_get_by_farm_id_filters_on_foreign_key() {
        let store = RecordingStore::listing(json!({
            "success": true,
            "data": [
                {"Id": 1, "Name": "Wheat", "farm_id": 5},
                {"Id": 2, "Name": "Barley", "farm_id": 5}
            ]
        }));
        let service = CropService::new(store.clone());

        let crops = service.get_by_farm_id("5").await.unwrap();
        assert_eq!(crops.len(), 2);
        assert_eq!(crops[1].name.as_deref(), Some("Barley"));

        match store.last_call().await {
            Call::Fetch { collection, query } => {
                assert_eq!(collection, "crop");
                assert_eq!(query.fields.len(), CROP_BY_FARM_FIELDS.len());
                assert_eq!(query.where_, vec![Predicate::equal_to("farm_id", 5)]);
            }
            other => panic!("unexpected call: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_get_by_id_returns_requested_record() {
        let store = RecordingStore::returning(json!({
            "success": true,
            "data": {"Id": 9, "Name": "Maize", "area_planted": 3}
        }));
        let service = CropService::new(store.clone());

        let crop = service.get_by_id("9").await.unwrap();
        assert_eq!(crop.id, 9);
        assert_eq!(crop.area_planted, Some(3.0));
        assert!(matches!(store.last_call().await, Call::Get { id: 9, .. }));
    }

    #[tokio::test]
    async fn test_delete_sends_single_integer_id() {
        let store = RecordingStore::batch(json!({"success": true, "results": [{"success": true}]}));
        let service = CropService::new(store.clone());

        assert!(service.delete("17").await.unwrap());
        match store.last_call().await {
            Call::Delete { collection, batch } => {
                assert_eq!(collection, "crop");
                assert_eq!(batch.record_ids, vec![17]);
            }
            other => panic!("unexpected call: {:?}", other),
        }
    }
}
