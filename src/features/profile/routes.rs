use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::navigation::{member_route_gate, RouteGate};
use crate::features::profile::handlers;
use crate::features::profile::services::ProfileService;

pub fn routes(service: Arc<ProfileService>, gate: RouteGate) -> Router {
    Router::new()
        .route("/api/profile", get(handlers::get_profile))
        .route_layer(axum::middleware::from_fn_with_state(
            gate,
            member_route_gate,
        ))
        .with_state(service)
}
