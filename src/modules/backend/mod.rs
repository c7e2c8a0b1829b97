//! Record store client for the hosted content/data platform
//!
//! Every collection (reports, resources, inquiries) lives in the external
//! backend. This module defines the CRUD contract the features depend on and
//! two implementations: an HTTP client for the hosted platform and an
//! in-memory store for tests and local development.

mod http_client;
mod memory;

pub use http_client::HttpRecordStore;
pub use memory::InMemoryRecordStore;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Offset-based pagination window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub limit: u32,
    pub skip: u32,
}

impl PageRequest {
    pub fn first(limit: u32) -> Self {
        Self { limit, skip: 0 }
    }
}

/// One page of records as returned by `get_all`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    #[serde(default)]
    pub has_next: bool,
    #[serde(default)]
    pub next_skip: Option<u32>,
}

/// Equality condition on a single record field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldFilter {
    pub field: String,
    pub value: String,
}

impl FieldFilter {
    pub fn eq(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("Request to backend failed: {0}")]
    Request(String),

    #[error("Backend returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to decode backend response: {0}")]
    Decode(String),

    #[error("Invalid record: {0}")]
    InvalidRecord(String),
}

/// CRUD surface of the managed backend
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Store one record and return it as persisted
    async fn create(&self, collection: &str, record: Value) -> Result<Value, BackendError>;

    /// Fetch one page of records matching all `filters`
    async fn get_all(
        &self,
        collection: &str,
        filters: &[FieldFilter],
        page: PageRequest,
    ) -> Result<Page<Value>, BackendError>;

    /// Fetch a record by id, `None` when it does not exist
    async fn get_by_id(&self, collection: &str, id: &str) -> Result<Option<Value>, BackendError>;
}

/// Decode a raw record into a typed model
pub fn decode_record<T: DeserializeOwned>(record: Value) -> Result<T, BackendError> {
    serde_json::from_value(record).map_err(|e| BackendError::Decode(e.to_string()))
}

/// Decode a page, dropping records that do not match the model.
///
/// The backend owns the data, so a malformed record must not hide the rest
/// of the page.
pub fn decode_page<T: DeserializeOwned>(collection: &str, page: Page<Value>) -> Page<T> {
    let items = page
        .items
        .into_iter()
        .filter_map(|record| match decode_record::<T>(record) {
            Ok(item) => Some(item),
            Err(e) => {
                tracing::warn!("Skipping malformed record in {}: {}", collection, e);
                None
            }
        })
        .collect();

    Page {
        items,
        has_next: page.has_next,
        next_skip: page.next_skip,
    }
}
