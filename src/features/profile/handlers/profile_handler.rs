use std::sync::Arc;

use axum::{extract::State, Json};

use crate::core::error::Result;
use crate::features::auth::guards::RequireMember;
use crate::features::profile::dtos::ProfileResponseDto;
use crate::features::profile::services::ProfileService;
use crate::shared::types::ApiResponse;

#[utoipa::path(
    get,
    path = "/api/profile",
    responses(
        (status = 200, description = "Profile retrieved successfully", body = ApiResponse<ProfileResponseDto>),
        (status = 401, description = "Sign in to continue"),
        (status = 404, description = "Member unknown to the provider"),
        (status = 502, description = "Member provider unavailable")
    ),
    tag = "profile",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_profile(
    RequireMember(user): RequireMember,
    State(service): State<Arc<ProfileService>>,
) -> Result<Json<ApiResponse<ProfileResponseDto>>> {
    let profile = service.get_profile(&user).await?;
    Ok(Json(ApiResponse::success(Some(profile), None, None)))
}
