use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::auth::handlers;
use crate::features::auth::services::SessionService;

/// Session routes, open to anonymous callers
pub fn routes(service: Arc<SessionService>) -> Router {
    Router::new()
        .route("/api/auth/session", get(handlers::get_session))
        .route("/api/auth/login", get(handlers::login))
        .route("/api/auth/logout", get(handlers::logout))
        .with_state(service)
}
