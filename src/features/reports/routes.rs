use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::features::navigation::{member_route_gate, RouteGate};
use crate::features::reports::handlers;
use crate::features::reports::services::{DraftService, ReportService};
use crate::shared::constants::MAX_IMAGE_SIZE;

/// Community report listing and detail, open to everyone
pub fn routes(report_service: Arc<ReportService>) -> Router {
    Router::new()
        .route("/api/reports", get(handlers::list_reports))
        .route("/api/reports/{id}", get(handlers::get_report))
        .with_state(report_service)
}

/// Report submission drafts, gated like the report page
pub fn draft_routes(draft_service: Arc<DraftService>, gate: RouteGate) -> Router {
    Router::new()
        .route("/api/report-drafts", post(handlers::create_draft))
        .route(
            "/api/report-drafts/{id}",
            get(handlers::get_draft)
                .patch(handlers::update_draft)
                .delete(handlers::cancel_draft),
        )
        .route("/api/report-drafts/{id}/location", post(handlers::locate_draft))
        .route(
            "/api/report-drafts/{id}/image",
            post(handlers::upload_image)
                .layer(DefaultBodyLimit::max(MAX_IMAGE_SIZE + 1024 * 1024))
                .get(handlers::get_image)
                .delete(handlers::remove_image),
        )
        .route("/api/report-drafts/{id}/submit", post(handlers::submit_draft))
        .route_layer(axum::middleware::from_fn_with_state(
            gate,
            member_route_gate,
        ))
        .with_state(draft_service)
}
