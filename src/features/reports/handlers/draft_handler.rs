use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use tracing::debug;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::guards::RequireMember;
use crate::features::reports::dtos::{
    CreateDraftDto, DraftResponseDto, LocationReportDto, NextStepDto, SubmitReportResponseDto,
    UpdateDraftDto, UploadImageDto,
};
use crate::features::reports::models::DraftImage;
use crate::features::reports::services::{DraftService, Geolocator, ReportedPosition};
use crate::shared::constants::{CANCEL_DRAFT_PATH, MAX_IMAGE_SIZE};
use crate::shared::types::ApiResponse;

/// Open a report draft
///
/// Send the outcome of the browser geolocation call in `location` to make
/// the first location attempt.
#[utoipa::path(
    post,
    path = "/api/report-drafts",
    request_body = CreateDraftDto,
    responses(
        (status = 201, description = "Draft opened", body = ApiResponse<DraftResponseDto>),
        (status = 401, description = "Sign in to report cleanliness issues")
    ),
    security(("bearer_auth" = [])),
    tag = "report-drafts"
)]
pub async fn create_draft(
    RequireMember(user): RequireMember,
    State(service): State<Arc<DraftService>>,
    AppJson(dto): AppJson<CreateDraftDto>,
) -> Result<(StatusCode, Json<ApiResponse<DraftResponseDto>>)> {
    let position = dto.location.map(ReportedPosition::from);
    let draft = service
        .open(&user, position.as_ref().map(|p| p as &dyn Geolocator))
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(draft), None, None)),
    ))
}

/// Get a report draft
#[utoipa::path(
    get,
    path = "/api/report-drafts/{id}",
    params(("id" = Uuid, Path, description = "Draft ID")),
    responses(
        (status = 200, description = "Draft found", body = ApiResponse<DraftResponseDto>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Draft belongs to another member"),
        (status = 404, description = "Draft not found")
    ),
    security(("bearer_auth" = [])),
    tag = "report-drafts"
)]
pub async fn get_draft(
    RequireMember(user): RequireMember,
    State(service): State<Arc<DraftService>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<DraftResponseDto>>> {
    let draft = service.get(&id, &user).await?;
    Ok(Json(ApiResponse::success(Some(draft), None, None)))
}

/// Update violation type, waste classification or description
#[utoipa::path(
    patch,
    path = "/api/report-drafts/{id}",
    params(("id" = Uuid, Path, description = "Draft ID")),
    request_body = UpdateDraftDto,
    responses(
        (status = 200, description = "Draft updated", body = ApiResponse<DraftResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Draft belongs to another member"),
        (status = 404, description = "Draft not found")
    ),
    security(("bearer_auth" = [])),
    tag = "report-drafts"
)]
pub async fn update_draft(
    RequireMember(user): RequireMember,
    State(service): State<Arc<DraftService>>,
    Path(id): Path<String>,
    AppJson(dto): AppJson<UpdateDraftDto>,
) -> Result<Json<ApiResponse<DraftResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let draft = service.update(&id, &user, dto).await?;
    Ok(Json(ApiResponse::success(Some(draft), None, None)))
}

/// Retry the location attempt
#[utoipa::path(
    post,
    path = "/api/report-drafts/{id}/location",
    params(("id" = Uuid, Path, description = "Draft ID")),
    request_body = LocationReportDto,
    responses(
        (status = 200, description = "Location updated, fallback used on failure", body = ApiResponse<DraftResponseDto>),
        (status = 403, description = "Draft belongs to another member"),
        (status = 404, description = "Draft not found")
    ),
    security(("bearer_auth" = [])),
    tag = "report-drafts"
)]
pub async fn locate_draft(
    RequireMember(user): RequireMember,
    State(service): State<Arc<DraftService>>,
    Path(id): Path<String>,
    AppJson(dto): AppJson<LocationReportDto>,
) -> Result<Json<ApiResponse<DraftResponseDto>>> {
    let position = ReportedPosition::from(dto);
    let draft = service.locate(&id, &user, &position).await?;
    Ok(Json(ApiResponse::success(Some(draft), None, None)))
}

/// Attach a photo and classify it
///
/// Responds once the classification has finished. Selecting another photo
/// replaces this one and its classification.
#[utoipa::path(
    post,
    path = "/api/report-drafts/{id}/image",
    params(("id" = Uuid, Path, description = "Draft ID")),
    request_body(
        content = UploadImageDto,
        content_type = "multipart/form-data",
        description = "Photo of the violation",
    ),
    responses(
        (status = 200, description = "Photo attached and classified", body = ApiResponse<DraftResponseDto>),
        (status = 400, description = "Missing, oversized or non-image file"),
        (status = 403, description = "Draft belongs to another member"),
        (status = 404, description = "Draft not found")
    ),
    security(("bearer_auth" = [])),
    tag = "report-drafts"
)]
pub async fn upload_image(
    RequireMember(user): RequireMember,
    State(service): State<Arc<DraftService>>,
    Path(id): Path<String>,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<DraftResponseDto>>> {
    let mut image: Option<DraftImage> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        debug!("Failed to read multipart field: {}", e);
        AppError::BadRequest(format!("Failed to read multipart data: {}", e))
    })? {
        let field_name = field.name().unwrap_or("").to_string();
        if field_name != "image" {
            debug!("Ignoring unknown field: {}", field_name);
            continue;
        }

        let content_type = field
            .content_type()
            .map(|s| s.to_string())
            .unwrap_or_else(|| "application/octet-stream".to_string());
        let file_name = field
            .file_name()
            .map(|s| s.to_string())
            .unwrap_or_else(|| "unnamed".to_string());

        let data = field.bytes().await.map_err(|e| {
            debug!("Failed to read image bytes: {}", e);
            AppError::BadRequest(format!("Failed to read image data: {}", e))
        })?;

        image = Some(DraftImage {
            file_name,
            content_type,
            data,
        });
    }

    let image = image.ok_or_else(|| AppError::BadRequest("Image is required".to_string()))?;

    if !image.content_type.starts_with("image/") {
        return Err(AppError::BadRequest(format!(
            "File type '{}' is not allowed. Please choose an image",
            image.content_type
        )));
    }

    if image.data.len() > MAX_IMAGE_SIZE {
        return Err(AppError::BadRequest(format!(
            "Image too large. Maximum size is {} MB",
            MAX_IMAGE_SIZE / 1024 / 1024
        )));
    }

    let draft = service.attach_image(&id, &user, image).await?;
    Ok(Json(ApiResponse::success(Some(draft), None, None)))
}

/// Remove the photo and its classification
#[utoipa::path(
    delete,
    path = "/api/report-drafts/{id}/image",
    params(("id" = Uuid, Path, description = "Draft ID")),
    responses(
        (status = 200, description = "Photo removed", body = ApiResponse<DraftResponseDto>),
        (status = 403, description = "Draft belongs to another member"),
        (status = 404, description = "Draft not found")
    ),
    security(("bearer_auth" = [])),
    tag = "report-drafts"
)]
pub async fn remove_image(
    RequireMember(user): RequireMember,
    State(service): State<Arc<DraftService>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<DraftResponseDto>>> {
    let draft = service.remove_image(&id, &user).await?;
    Ok(Json(ApiResponse::success(Some(draft), None, None)))
}

/// Preview of the attached photo
#[utoipa::path(
    get,
    path = "/api/report-drafts/{id}/image",
    params(("id" = Uuid, Path, description = "Draft ID")),
    responses(
        (status = 200, description = "Raw image bytes", content_type = "image/*"),
        (status = 403, description = "Draft belongs to another member"),
        (status = 404, description = "Draft or image not found")
    ),
    security(("bearer_auth" = [])),
    tag = "report-drafts"
)]
pub async fn get_image(
    RequireMember(user): RequireMember,
    State(service): State<Arc<DraftService>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let image = service.image(&id, &user).await?;
    Ok(([(header::CONTENT_TYPE, image.content_type)], image.data))
}

/// Submit the draft as a report
#[utoipa::path(
    post,
    path = "/api/report-drafts/{id}/submit",
    params(("id" = Uuid, Path, description = "Draft ID")),
    responses(
        (status = 201, description = "Report submitted", body = ApiResponse<SubmitReportResponseDto>),
        (status = 400, description = "Draft incomplete, image still being analysed, or already being submitted"),
        (status = 403, description = "Draft belongs to another member"),
        (status = 404, description = "Draft not found"),
        (status = 502, description = "Backend unavailable, the draft is kept")
    ),
    security(("bearer_auth" = [])),
    tag = "report-drafts"
)]
pub async fn submit_draft(
    RequireMember(user): RequireMember,
    State(service): State<Arc<DraftService>>,
    Path(id): Path<String>,
) -> Result<(StatusCode, Json<ApiResponse<SubmitReportResponseDto>>)> {
    let submitted = service.submit(&id, &user).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(submitted),
            Some("Report submitted".to_string()),
            None,
        )),
    ))
}

/// Cancel the draft
#[utoipa::path(
    delete,
    path = "/api/report-drafts/{id}",
    params(("id" = Uuid, Path, description = "Draft ID")),
    responses(
        (status = 200, description = "Draft discarded", body = ApiResponse<NextStepDto>),
        (status = 403, description = "Draft belongs to another member"),
        (status = 404, description = "Draft not found")
    ),
    security(("bearer_auth" = [])),
    tag = "report-drafts"
)]
pub async fn cancel_draft(
    RequireMember(user): RequireMember,
    State(service): State<Arc<DraftService>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<NextStepDto>>> {
    service.cancel(&id, &user).await?;
    Ok(Json(ApiResponse::success(
        Some(NextStepDto {
            next: CANCEL_DRAFT_PATH.to_string(),
        }),
        None,
        None,
    )))
}
