use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::core::error::Result;
use crate::core::extractor::AppQuery;
use crate::features::reports::dtos::{ReportFeedDto, ReportListQuery, ReportNotFoundDto};
use crate::features::reports::models::Report;
use crate::features::reports::services::ReportService;
use crate::shared::types::ApiResponse;

/// List community reports
///
/// Loads `pages` pages of 12 reports, newest first, then keeps the loaded
/// reports matching `status` and `violationType`. Ask for `pages + 1` while
/// `hasNext` is true to see more.
#[utoipa::path(
    get,
    path = "/api/reports",
    params(ReportListQuery),
    responses(
        (status = 200, description = "Loaded reports after filtering", body = ApiResponse<ReportFeedDto>),
        (status = 502, description = "Backend unavailable")
    ),
    tag = "reports"
)]
pub async fn list_reports(
    State(service): State<Arc<ReportService>>,
    AppQuery(query): AppQuery<ReportListQuery>,
) -> Result<Json<ApiResponse<ReportFeedDto>>> {
    let feed = service.list(&query).await?;
    Ok(Json(ApiResponse::success(Some(feed), None, None)))
}

/// Get a report by ID
#[utoipa::path(
    get,
    path = "/api/reports/{id}",
    params(
        ("id" = String, Path, description = "Report ID")
    ),
    responses(
        (status = 200, description = "Report found", body = ApiResponse<Report>),
        (status = 404, description = "Report not found", body = ApiResponse<ReportNotFoundDto>),
        (status = 502, description = "Backend unavailable")
    ),
    tag = "reports"
)]
pub async fn get_report(
    State(service): State<Arc<ReportService>>,
    Path(id): Path<String>,
) -> Result<Response> {
    match service.get(&id).await? {
        Some(report) => Ok(Json(ApiResponse::success(Some(report), None, None)).into_response()),
        None => {
            let body = ApiResponse::failure(
                Some(ReportNotFoundDto {
                    back_link: "/reports".to_string(),
                }),
                Some("Report not found".to_string()),
            );
            Ok((StatusCode::NOT_FOUND, Json(body)).into_response())
        }
    }
}
