use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::auth::SessionService;
use crate::features::navigation::handlers;

pub fn routes(sessions: Arc<SessionService>) -> Router {
    Router::new()
        .route("/api/navigation", get(handlers::resolve_navigation))
        .with_state(sessions)
}
