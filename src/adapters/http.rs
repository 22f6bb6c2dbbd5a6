use crate::domain::ports::{ConfigProvider, RecordStore};
use crate::domain::query::{
    BatchResponse, DeleteBatch, ListQuery, ListResponse, RecordBatch, RecordResponse,
};
use crate::utils::error::{AdapterError, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;

pub const PROJECT_ID_HEADER: &str = "x-apper-project-id";
pub const PUBLIC_KEY_HEADER: &str = "x-apper-public-key";

/// `RecordStore` over the service's JSON HTTP API.
///
/// One client per process is enough; every call is a single request with no retry.
#[derive(Debug, Clone)]
pub struct HttpRecordStore {
    client: Client,
    base_url: String,
    project_id: String,
}

impl HttpRecordStore {
    pub fn new<C: ConfigProvider + ?Sized>(config: &C) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_static(PROJECT_ID_HEADER),
            header_value("project_id", config.project_id())?,
        );
        headers.insert(
            HeaderName::from_static(PUBLIC_KEY_HEADER),
            header_value("public_key", config.public_key())?,
        );

        let client = Client::builder().default_headers(headers).build()?;

        Ok(Self {
            client,
            base_url: config.base_url().trim_end_matches('/').to_string(),
            project_id: config.project_id().to_string(),
        })
    }

    fn records_url(&self, collection: &str) -> String {
        format!(
            "{}/projects/{}/tables/{}/records",
            self.base_url, self.project_id, collection
        )
    }

    async fn send<B, R>(&self, method: Method, url: String, body: &B) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        tracing::debug!("{} {}", method, url);
        let response = self.client.request(method, &url).json(body).send().await?;

        let status = response.status();
        tracing::debug!("Record service response status: {}", status);
        let text = response.text().await?;

        if status.is_success() {
            return Ok(serde_json::from_str(&text)?);
        }

        // Error statuses usually still carry the envelope with a message.
        serde_json::from_str(&text).map_err(|_| AdapterError::HttpStatus {
            status: status.as_u16(),
            body: text,
        })
    }
}

fn header_value(field: &str, value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value).map_err(|e| AdapterError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: format!("not a valid header value: {}", e),
    })
}

#[async_trait]
impl RecordStore for HttpRecordStore {
    async fn fetch_records(&self, collection: &str, query: &ListQuery) -> Result<ListResponse> {
        let url = format!("{}/query", self.records_url(collection));
        self.send(Method::POST, url, query).await
    }

    async fn get_record_by_id(
        &self,
        collection: &str,
        id: i64,
        query: &ListQuery,
    ) -> Result<RecordResponse> {
        let url = format!("{}/{}/query", self.records_url(collection), id);
        self.send(Method::POST, url, query).await
    }

    async fn create_records(
        &self,
        collection: &str,
        batch: &RecordBatch,
    ) -> Result<BatchResponse> {
        self.send(Method::POST, self.records_url(collection), batch)
            .await
    }

    async fn update_records(
        &self,
        collection: &str,
        batch: &RecordBatch,
    ) -> Result<BatchResponse> {
        self.send(Method::PUT, self.records_url(collection), batch)
            .await
    }

    async fn delete_records(
        &self,
        collection: &str,
        batch: &DeleteBatch,
    ) -> Result<BatchResponse> {
        self.send(Method::DELETE, self.records_url(collection), batch)
            .await
    }
}
