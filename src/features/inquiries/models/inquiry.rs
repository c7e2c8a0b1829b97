use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::features::inquiries::dtos::CreateInquiryDto;

/// Record stored in the `inquiries` collection
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Inquiry {
    #[serde(rename = "_id")]
    pub id: String,
    pub sender_name: String,
    pub sender_email: String,
    pub subject: String,
    pub message_content: String,
    pub submission_time: DateTime<Utc>,
}

impl Inquiry {
    pub fn from_form(dto: CreateInquiryDto, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            sender_name: dto.sender_name.trim().to_string(),
            sender_email: dto.sender_email.trim().to_string(),
            subject: dto.subject.trim().to_string(),
            message_content: dto.message_content,
            submission_time: now,
        }
    }
}
