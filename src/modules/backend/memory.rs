use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{BackendError, FieldFilter, Page, PageRequest, RecordStore};

/// Process-local record store.
///
/// Records are listed newest first, mirroring the hosted platform's default
/// ordering. Nothing survives a restart.
#[derive(Default)]
pub struct InMemoryRecordStore {
    collections: RwLock<HashMap<String, Vec<Value>>>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a collection, oldest record first
    #[cfg(test)]
    pub async fn seed(&self, collection: &str, records: Vec<Value>) {
        let mut collections = self.collections.write().await;
        collections
            .entry(collection.to_string())
            .or_default()
            .extend(records);
    }

    #[cfg(test)]
    pub async fn len(&self, collection: &str) -> usize {
        self.collections
            .read()
            .await
            .get(collection)
            .map_or(0, Vec::len)
    }

    fn matches(record: &Value, filters: &[FieldFilter]) -> bool {
        filters.iter().all(|f| match record.get(&f.field) {
            Some(Value::String(s)) => *s == f.value,
            Some(Value::Null) | None => false,
            Some(other) => other.to_string() == f.value,
        })
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn create(&self, collection: &str, record: Value) -> Result<Value, BackendError> {
        let Value::Object(mut fields) = record else {
            return Err(BackendError::InvalidRecord(
                "record must be a JSON object".to_string(),
            ));
        };

        if !matches!(fields.get("_id"), Some(Value::String(_))) {
            fields.insert("_id".to_string(), Value::String(Uuid::new_v4().to_string()));
        }
        let now = Value::String(Utc::now().to_rfc3339());
        fields.entry("_createdDate").or_insert_with(|| now.clone());
        fields.insert("_updatedDate".to_string(), now);

        let stored = Value::Object(fields);
        let mut collections = self.collections.write().await;
        let records = collections.entry(collection.to_string()).or_default();

        if records.iter().any(|r| r.get("_id") == stored.get("_id")) {
            return Err(BackendError::Status {
                status: 409,
                body: "duplicate _id".to_string(),
            });
        }

        records.push(stored.clone());
        Ok(stored)
    }

    async fn get_all(
        &self,
        collection: &str,
        filters: &[FieldFilter],
        page: PageRequest,
    ) -> Result<Page<Value>, BackendError> {
        let collections = self.collections.read().await;
        let matching: Vec<&Value> = collections
            .get(collection)
            .map(|records| {
                records
                    .iter()
                    .rev()
                    .filter(|r| Self::matches(r, filters))
                    .collect()
            })
            .unwrap_or_default();

        let skip = page.skip as usize;
        let items: Vec<Value> = matching
            .iter()
            .skip(skip)
            .take(page.limit as usize)
            .map(|r| (*r).clone())
            .collect();

        let consumed = skip + items.len();
        let has_next = consumed < matching.len();

        Ok(Page {
            items,
            has_next,
            next_skip: has_next.then_some(consumed as u32),
        })
    }

    async fn get_by_id(&self, collection: &str, id: &str) -> Result<Option<Value>, BackendError> {
        let collections = self.collections.read().await;
        Ok(collections.get(collection).and_then(|records| {
            records
                .iter()
                .find(|r| r.get("_id").and_then(Value::as_str) == Some(id))
                .cloned()
        }))
    }
}
