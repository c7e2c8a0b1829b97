use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::inquiries::dtos::{CreateInquiryDto, InquiryResponseDto};
use crate::features::inquiries::services::InquiryService;
use crate::shared::types::ApiResponse;

/// Submit the contact form
///
/// Public endpoint, no sign-in required.
#[utoipa::path(
    post,
    path = "/api/inquiries",
    request_body = CreateInquiryDto,
    responses(
        (status = 201, description = "Inquiry submitted", body = ApiResponse<InquiryResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 502, description = "Backend unavailable")
    ),
    tag = "inquiries"
)]
pub async fn create_inquiry(
    State(service): State<Arc<InquiryService>>,
    AppJson(dto): AppJson<CreateInquiryDto>,
) -> Result<(StatusCode, Json<ApiResponse<InquiryResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let inquiry = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(inquiry),
            Some("Thank you! We will get back to you soon.".to_string()),
            None,
        )),
    ))
}

#[cfg(test)]
mod tests {
    use crate::features::inquiries::{routes, InquiryService};
    use crate::modules::backend::InMemoryRecordStore;
    use axum_test::TestServer;
    use serde_json::{json, Value};
    use std::sync::Arc;

    fn server() -> TestServer {
        let service = Arc::new(InquiryService::new(Arc::new(InMemoryRecordStore::new())));
        TestServer::new(routes::routes(service)).unwrap()
    }

    #[tokio::test]
    async fn test_submit_inquiry() {
        let response = server()
            .post("/api/inquiries")
            .json(&json!({
                "senderName": "Meena",
                "senderEmail": "meena@example.com",
                "subject": "Collection timings",
                "messageContent": "When is garbage collected in ward 12?"
            }))
            .await;

        response.assert_status(axum::http::StatusCode::CREATED);
        let body: Value = response.json();
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["subject"], "Collection timings");
    }

    #[tokio::test]
    async fn test_invalid_email_is_rejected() {
        let response = server()
            .post("/api/inquiries")
            .json(&json!({
                "senderName": "Meena",
                "senderEmail": "meena",
                "subject": "Hi",
                "messageContent": "Hello"
            }))
            .expect_failure()
            .await;

        response.assert_status_bad_request();
    }
}
