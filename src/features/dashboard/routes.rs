use axum::{routing::get, Router};
use std::sync::Arc;

use crate::features::dashboard::handlers;
use crate::features::dashboard::services::DashboardService;
use crate::features::navigation::{member_route_gate, RouteGate};

/// Member dashboard, gated like the dashboard page
pub fn routes(dashboard_service: Arc<DashboardService>, gate: RouteGate) -> Router {
    Router::new()
        .route("/api/dashboard", get(handlers::get_dashboard))
        .route_layer(axum::middleware::from_fn_with_state(
            gate,
            member_route_gate,
        ))
        .with_state(dashboard_service)
}
