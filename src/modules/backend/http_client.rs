use async_trait::async_trait;
use serde_json::Value;

use crate::core::config::BackendConfig;

use super::{BackendError, FieldFilter, Page, PageRequest, RecordStore};

/// Record store client for the hosted data platform
///
/// Collections are addressed as `{base_url}/collections/{collection}/items`.
pub struct HttpRecordStore {
    base_url: String,
    api_key: String,
    http_client: reqwest::Client,
}

impl HttpRecordStore {
    pub fn new(config: &BackendConfig) -> Result<Self, BackendError> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent("CleanMaduraiCore/1.0 (citizen-report-system)")
            .build()
            .map_err(|e| BackendError::Request(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            http_client,
        })
    }

    fn items_url(&self, collection: &str) -> String {
        format!(
            "{}/collections/{}/items",
            self.base_url,
            urlencoding::encode(collection)
        )
    }

    /// Turn a non-success response into a `BackendError::Status`
    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, BackendError> {
        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        tracing::error!("Backend API error: HTTP {} - {}", status, body);
        Err(BackendError::Status {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl RecordStore for HttpRecordStore {
    async fn create(&self, collection: &str, record: Value) -> Result<Value, BackendError> {
        let url = self.items_url(collection);
        tracing::debug!("Creating record in backend: {}", url);

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&record)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to create record in {}: {}", collection, e);
                BackendError::Request(e.to_string())
            })?;

        let response = Self::check_status(response).await?;

        response.json::<Value>().await.map_err(|e| {
            tracing::error!("Failed to parse create response: {}", e);
            BackendError::Decode(e.to_string())
        })
    }

    async fn get_all(
        &self,
        collection: &str,
        filters: &[FieldFilter],
        page: PageRequest,
    ) -> Result<Page<Value>, BackendError> {
        let url = self.items_url(collection);

        let mut query: Vec<(String, String)> = vec![
            ("limit".to_string(), page.limit.to_string()),
            ("skip".to_string(), page.skip.to_string()),
        ];
        query.extend(
            filters
                .iter()
                .map(|f| (f.field.clone(), f.value.clone())),
        );

        tracing::debug!(
            "Fetching records from backend: {} (limit={}, skip={})",
            url,
            page.limit,
            page.skip
        );

        let response = self
            .http_client
            .get(&url)
            .bearer_auth(&self.api_key)
            .query(&query)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch records from {}: {}", collection, e);
                BackendError::Request(e.to_string())
            })?;

        let response = Self::check_status(response).await?;

        response.json::<Page<Value>>().await.map_err(|e| {
            tracing::error!("Failed to parse page response: {}", e);
            BackendError::Decode(e.to_string())
        })
    }

    async fn get_by_id(&self, collection: &str, id: &str) -> Result<Option<Value>, BackendError> {
        let url = format!("{}/{}", self.items_url(collection), urlencoding::encode(id));
        tracing::debug!("Fetching record from backend: {}", url);

        let response = self
            .http_client
            .get(&url)
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch record {} from {}: {}", id, collection, e);
                BackendError::Request(e.to_string())
            })?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let response = Self::check_status(response).await?;

        response.json::<Value>().await.map(Some).map_err(|e| {
            tracing::error!("Failed to parse record response: {}", e);
            BackendError::Decode(e.to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::BackendMode;
    use std::time::Duration;

    fn store() -> HttpRecordStore {
        HttpRecordStore::new(&BackendConfig {
            mode: BackendMode::Http,
            base_url: "https://data.example.com/v1".to_string(),
            api_key: "key".to_string(),
            timeout: Duration::from_secs(5),
        })
        .unwrap()
    }

    #[test]
    fn test_items_url() {
        assert_eq!(
            store().items_url("cleanlinessreports"),
            "https://data.example.com/v1/collections/cleanlinessreports/items"
        );
    }
}
