use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::reports::models::{
    Coordinates, LocationStatus, Report, SubmissionDraft, ViolationType, WasteClassification,
};
use crate::features::reports::services::ReportedPosition;

/// Outcome of the browser geolocation call.
///
/// Send `latitude` and `longitude` on success, `error` on failure, and
/// neither when the browser has no geolocation support.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct LocationReportDto {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub error: Option<String>,
}

impl From<LocationReportDto> for ReportedPosition {
    fn from(dto: LocationReportDto) -> Self {
        match (dto.latitude, dto.longitude, dto.error) {
            (Some(latitude), Some(longitude), _) => {
                ReportedPosition::Position(Coordinates::new(latitude, longitude))
            }
            (_, _, Some(error)) => ReportedPosition::Failed(error),
            _ => ReportedPosition::Unsupported,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CreateDraftDto {
    /// First location attempt, made when the report page opens
    pub location: Option<LocationReportDto>,
}

/// Partial update of the editable draft fields.
///
/// Absent fields are left unchanged, `null` clears a field.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDraftDto {
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<ViolationType>)]
    pub violation_type: Option<Option<ViolationType>>,

    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<WasteClassification>)]
    pub waste_classification: Option<Option<WasteClassification>>,

    #[validate(length(max = 2000, message = "Description must not exceed 2000 characters"))]
    pub description: Option<String>,
}

/// Marks a field that appeared in the payload, even as `null`
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Multipart form for the draft photo (documentation only)
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct UploadImageDto {
    /// Photo of the violation, any `image/*` type up to 10MB
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub image: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DraftResponseDto {
    pub id: Uuid,
    pub has_image: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_name: Option<String>,
    /// Where the client can fetch the local preview of the photo
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_preview_url: Option<String>,
    pub is_analyzing: bool,
    pub ai_classification: Option<WasteClassification>,
    pub ai_message: Option<String>,
    pub violation_type: Option<ViolationType>,
    pub waste_classification: Option<WasteClassification>,
    pub description: String,
    pub location: Coordinates,
    pub location_status: LocationStatus,
    pub can_retry_location: bool,
    pub is_submitting: bool,
    pub can_submit: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&SubmissionDraft> for DraftResponseDto {
    fn from(draft: &SubmissionDraft) -> Self {
        let image = draft.image();
        Self {
            id: draft.id(),
            has_image: image.is_some(),
            image_name: image.map(|i| i.file_name.clone()),
            image_preview_url: image.map(|_| format!("/api/report-drafts/{}/image", draft.id())),
            is_analyzing: draft.is_analyzing(),
            ai_classification: draft.ai_classification(),
            ai_message: draft.ai_message().map(str::to_string),
            violation_type: draft.violation_type(),
            waste_classification: draft.waste_classification(),
            description: draft.description().to_string(),
            location: draft.location(),
            location_status: draft.location_status(),
            can_retry_location: draft.can_retry_location(),
            is_submitting: draft.is_submitting(),
            can_submit: draft.can_submit(),
            created_at: draft.created_at(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitReportResponseDto {
    pub report: Report,
    /// Page the client should open next
    pub next: String,
}

/// Where the client goes after leaving the report page
#[derive(Debug, Serialize, ToSchema)]
pub struct NextStepDto {
    pub next: String,
}
