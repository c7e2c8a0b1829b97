use std::sync::Arc;

use axum::{routing::post, Router};

use crate::features::inquiries::handlers;
use crate::features::inquiries::services::InquiryService;

pub fn routes(service: Arc<InquiryService>) -> Router {
    Router::new()
        .route("/api/inquiries", post(handlers::create_inquiry))
        .with_state(service)
}
