use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::{extract::Request, middleware::Next, response::Response, Router};
use serde_json::Value;

use crate::features::auth::model::AuthenticatedUser;
use crate::modules::backend::{
    BackendError, FieldFilter, InMemoryRecordStore, Page, PageRequest, RecordStore,
};

pub fn test_member_id() -> String {
    "member-test-1".to_string()
}

pub fn create_member_user() -> AuthenticatedUser {
    member_user(&test_member_id())
}

pub fn member_user(member_id: &str) -> AuthenticatedUser {
    AuthenticatedUser {
        member_id: member_id.to_string(),
        session_id: Some("test-session".to_string()),
    }
}

async fn inject_member_middleware(mut request: Request, next: Next) -> Response {
    request.extensions_mut().insert(create_member_user());
    next.run(request).await
}

/// Run every request as the signed-in test member
pub fn with_member_auth(router: Router) -> Router {
    router.layer(axum::middleware::from_fn(inject_member_middleware))
}

/// Run every request as `user`
pub fn with_user(router: Router, user: AuthenticatedUser) -> Router {
    router.layer(axum::middleware::from_fn(
        move |mut request: Request, next: Next| {
            let user = user.clone();
            async move {
                request.extensions_mut().insert(user);
                next.run(request).await
            }
        },
    ))
}

/// Record store whose every call fails like an unreachable backend
pub struct FailingRecordStore;

impl FailingRecordStore {
    pub fn shared() -> Arc<dyn RecordStore> {
        Arc::new(Self)
    }

    fn error() -> BackendError {
        BackendError::Request("connection refused".to_string())
    }
}

#[async_trait]
impl RecordStore for FailingRecordStore {
    async fn create(&self, _collection: &str, _record: Value) -> Result<Value, BackendError> {
        Err(Self::error())
    }

    async fn get_all(
        &self,
        _collection: &str,
        _filters: &[FieldFilter],
        _page: PageRequest,
    ) -> Result<Page<Value>, BackendError> {
        Err(Self::error())
    }

    async fn get_by_id(&self, _collection: &str, _id: &str) -> Result<Option<Value>, BackendError> {
        Err(Self::error())
    }
}

/// In-memory record store whose creates take `delay` to land
pub struct SlowRecordStore {
    inner: Arc<InMemoryRecordStore>,
    delay: Duration,
}

impl SlowRecordStore {
    pub fn new(inner: Arc<InMemoryRecordStore>, delay: Duration) -> Self {
        Self { inner, delay }
    }
}

#[async_trait]
impl RecordStore for SlowRecordStore {
    async fn create(&self, collection: &str, record: Value) -> Result<Value, BackendError> {
        tokio::time::sleep(self.delay).await;
        self.inner.create(collection, record).await
    }

    async fn get_all(
        &self,
        collection: &str,
        filters: &[FieldFilter],
        page: PageRequest,
    ) -> Result<Page<Value>, BackendError> {
        self.inner.get_all(collection, filters, page).await
    }

    async fn get_by_id(&self, collection: &str, id: &str) -> Result<Option<Value>, BackendError> {
        self.inner.get_by_id(collection, id).await
    }
}
