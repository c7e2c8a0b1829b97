use std::sync::Arc;

use axum::{extract::State, Json};

use crate::core::error::Result;
use crate::core::extractor::AppQuery;
use crate::features::auth::guards::MaybeMember;
use crate::features::auth::SessionService;
use crate::features::navigation::dtos::{NavigationQuery, NavigationResponseDto};
use crate::features::navigation::models::{AppRoute, RouteAccess};
use crate::features::navigation::services::guard;
use crate::shared::types::ApiResponse;

/// Resolve a frontend path and decide whether the caller may open it
#[utoipa::path(
    get,
    path = "/api/navigation",
    params(NavigationQuery),
    responses(
        (status = 200, description = "Navigation decision", body = ApiResponse<NavigationResponseDto>),
        (status = 400, description = "Missing path")
    ),
    tag = "navigation",
    security(
        (),
        ("bearer_auth" = [])
    )
)]
pub async fn resolve_navigation(
    State(sessions): State<Arc<SessionService>>,
    MaybeMember(user): MaybeMember,
    AppQuery(query): AppQuery<NavigationQuery>,
) -> Result<Json<ApiResponse<NavigationResponseDto>>> {
    let route = AppRoute::resolve(&query.path);
    let ctx = sessions.context(user);

    let response = NavigationResponseDto {
        route: route.name().to_string(),
        member_only: matches!(route.access(), RouteAccess::MemberOnly { .. }),
        outcome: guard(&route, &ctx),
    };

    Ok(Json(ApiResponse::success(Some(response), None, None)))
}
