use std::sync::Arc;

use axum::{extract::State, Json};

use crate::core::error::Result;
use crate::features::auth::guards::RequireMember;
use crate::features::dashboard::dtos::DashboardDto;
use crate::features::dashboard::services::DashboardService;
use crate::shared::types::ApiResponse;

/// Member dashboard: counters, points, rank, badges and recent reports
#[utoipa::path(
    get,
    path = "/api/dashboard",
    responses(
        (status = 200, description = "Dashboard", body = ApiResponse<DashboardDto>),
        (status = 401, description = "Sign in to access your dashboard"),
        (status = 502, description = "Backend unavailable")
    ),
    security(("bearer_auth" = [])),
    tag = "dashboard"
)]
pub async fn get_dashboard(
    State(service): State<Arc<DashboardService>>,
    RequireMember(user): RequireMember,
) -> Result<Json<ApiResponse<DashboardDto>>> {
    let dashboard = service.load(user).await?;
    Ok(Json(ApiResponse::success(Some(dashboard), None, None)))
}
