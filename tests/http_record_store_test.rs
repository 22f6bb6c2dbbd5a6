use farm_records::domain::model::Record;
use farm_records::domain::query::{DeleteBatch, ListQuery, Predicate, RecordBatch};
use farm_records::{AdapterError, ClientConfig, HttpRecordStore, RecordStore};
use httpmock::prelude::*;
use serde_json::json;

fn store_for(server: &MockServer) -> HttpRecordStore {
    let config = ClientConfig {
        base_url: server.base_url(),
        project_id: "proj-1".to_string(),
        public_key: "pk_test".to_string(),
    };
    HttpRecordStore::new(&config).unwrap()
}

#[tokio::test]
async fn test_fetch_records_posts_query_with_credentials() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/projects/proj-1/tables/crop/records/query")
            .header("x-apper-project-id", "proj-1")
            .header("x-apper-public-key", "pk_test")
            .json_body(json!({
                "fields": [{"field": {"Name": "Name"}}, {"field": {"Name": "farm_id"}}],
                "where": [{"FieldName": "farm_id", "Operator": "EqualTo", "Values": [3]}]
            }));
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(json!({
                "success": true,
                "data": [{"Id": 1, "Name": "Wheat", "farm_id": 3}]
            }));
    });

    let store = store_for(&server);
    let query =
        ListQuery::projecting(&["Name", "farm_id"]).filter(Predicate::equal_to("farm_id", 3));
    let response = store.fetch_records("crop", &query).await.unwrap();

    api_mock.assert();
    assert!(response.success);
    let data = response.data.unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0].get("Name"), Some(&json!("Wheat")));
}

#[tokio::test]
async fn test_get_record_by_id_addresses_record() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/projects/proj-1/tables/farm/records/12/query");
        then.status(200)
            .json_body(json!({"success": true, "data": {"Id": 12, "Name": "Hilltop"}}));
    });

    let store = store_for(&server);
    let response = store
        .get_record_by_id("farm", 12, &ListQuery::projecting(&["Name"]))
        .await
        .unwrap();

    api_mock.assert();
    assert_eq!(response.data.unwrap().get("Id"), Some(&json!(12)));
}

#[tokio::test]
async fn test_create_update_and_delete_use_batch_verbs() {
    let server = MockServer::start();
    let create_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/projects/proj-1/tables/task/records")
            .json_body(json!({"records": [{"Name": "Spray", "title": "Spray"}]}));
        then.status(200).json_body(json!({
            "success": true,
            "results": [{"success": true, "data": {"Id": 4}}]
        }));
    });
    let update_mock = server.mock(|when, then| {
        when.method(PUT)
            .path("/projects/proj-1/tables/task/records")
            .json_body(json!({"records": [{"Id": 4, "priority": "Low"}]}));
        then.status(200).json_body(json!({
            "success": true,
            "results": [{"success": true, "data": {"Id": 4, "priority": "Low"}}]
        }));
    });
    let delete_mock = server.mock(|when, then| {
        when.method(DELETE)
            .path("/projects/proj-1/tables/task/records")
            .json_body(json!({"RecordIds": [4]}));
        then.status(200)
            .json_body(json!({"success": true, "results": [{"success": true}]}));
    });

    let store = store_for(&server);

    let mut record = Record::new();
    record.set("Name", "Spray");
    record.set("title", "Spray");
    let created = store
        .create_records("task", &RecordBatch { records: vec![record] })
        .await
        .unwrap();
    assert!(created.success);

    let mut patch = Record::with_id(4);
    patch.set("priority", "Low");
    let updated = store
        .update_records("task", &RecordBatch { records: vec![patch] })
        .await
        .unwrap();
    assert_eq!(updated.results.unwrap().len(), 1);

    let deleted = store
        .delete_records("task", &DeleteBatch { record_ids: vec![4] })
        .await
        .unwrap();
    assert!(deleted.success);

    create_mock.assert();
    update_mock.assert();
    delete_mock.assert();
}

#[tokio::test]
async fn test_error_status_with_envelope_is_returned_as_envelope() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/projects/proj-1/tables/crop/records/query");
        then.status(401)
            .json_body(json!({"success": false, "message": "Invalid public key"}));
    });

    let store = store_for(&server);
    let response = store
        .fetch_records("crop", &ListQuery::projecting(&["Name"]))
        .await
        .unwrap();

    assert!(!response.success);
    assert_eq!(response.message.as_deref(), Some("Invalid public key"));
}

#[tokio::test]
async fn test_error_status_without_envelope_is_http_status_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/projects/proj-1/tables/crop/records/query");
        then.status(502).body("Bad Gateway");
    });

    let store = store_for(&server);
    let err = store
        .fetch_records("crop", &ListQuery::projecting(&["Name"]))
        .await
        .unwrap_err();

    match err {
        AdapterError::HttpStatus { status, body } => {
            assert_eq!(status, 502);
            assert_eq!(body, "Bad Gateway");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_base_url_trailing_slash_is_ignored() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST).path("/projects/proj-1/tables/farm/records/query");
        then.status(200).json_body(json!({"success": true, "data": []}));
    });

    let config = ClientConfig {
        base_url: format!("{}/", server.base_url()),
        project_id: "proj-1".to_string(),
        public_key: "pk_test".to_string(),
    };
    let store = HttpRecordStore::new(&config).unwrap();
    store
        .fetch_records("farm", &ListQuery::projecting(&["Name"]))
        .await
        .unwrap();

    api_mock.assert();
}

#[test]
fn test_invalid_header_value_is_rejected() {
    let config = ClientConfig {
        base_url: "http://localhost:1".to_string(),
        project_id: "proj-1".to_string(),
        public_key: "bad\nkey".to_string(),
    };
    let err = HttpRecordStore::new(&config).unwrap_err();
    assert!(matches!(err, AdapterError::InvalidValue { ref field, .. } if field == "public_key"));
}
