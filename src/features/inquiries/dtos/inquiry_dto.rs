use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::inquiries::models::Inquiry;

/// Contact form submission
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateInquiryDto {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub sender_name: String,

    #[validate(email(message = "Invalid email format"))]
    pub sender_email: String,

    #[validate(length(min = 1, max = 200, message = "Subject must be 1-200 characters"))]
    pub subject: String,

    #[validate(length(min = 1, max = 5000, message = "Message must be 1-5000 characters"))]
    pub message_content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InquiryResponseDto {
    pub id: String,
    pub sender_name: String,
    pub sender_email: String,
    pub subject: String,
    pub submission_time: DateTime<Utc>,
}

impl From<Inquiry> for InquiryResponseDto {
    fn from(i: Inquiry) -> Self {
        Self {
            id: i.id,
            sender_name: i.sender_name,
            sender_email: i.sender_email,
            subject: i.subject,
            submission_time: i.submission_time,
        }
    }
}
