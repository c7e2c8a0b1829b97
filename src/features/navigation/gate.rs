//! Route guard applied to member-only API endpoints.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::core::error::AppError;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::auth::SessionService;
use crate::features::navigation::models::AppRoute;
use crate::features::navigation::services::{guard, GuardOutcome};

/// Page whose access rules an API router inherits
#[derive(Clone)]
pub struct RouteGate {
    route: AppRoute,
    sessions: Arc<SessionService>,
}

impl RouteGate {
    pub fn new(route: AppRoute, sessions: Arc<SessionService>) -> Self {
        Self { route, sessions }
    }
}

/// Reject callers the page guard would send to sign-in, with the page's
/// sign-in message
pub async fn member_route_gate(
    State(gate): State<RouteGate>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user = req.extensions().get::<AuthenticatedUser>().cloned();
    let ctx = gate.sessions.context(user);

    match guard(&gate.route, &ctx) {
        GuardOutcome::Render => Ok(next.run(req).await),
        GuardOutcome::RedirectToSignIn { message, .. } => Err(AppError::Unauthorized(message)),
        GuardOutcome::Redirect { .. } => Err(AppError::NotFound("Page not found".to_string())),
    }
}
