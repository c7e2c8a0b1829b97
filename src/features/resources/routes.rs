use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::resources::handlers;
use crate::features::resources::services::ResourceService;

pub fn routes(service: Arc<ResourceService>) -> Router {
    Router::new()
        .route("/api/resources", get(handlers::list_resources))
        .route("/api/resources/filters", get(handlers::list_resource_filters))
        .with_state(service)
}
