use std::sync::Arc;

use chrono::Utc;

use crate::core::error::{AppError, Result};
use crate::features::inquiries::dtos::{CreateInquiryDto, InquiryResponseDto};
use crate::features::inquiries::models::Inquiry;
use crate::modules::backend::RecordStore;
use crate::shared::constants::INQUIRIES_COLLECTION;

/// Service for contact form submissions
pub struct InquiryService {
    store: Arc<dyn RecordStore>,
}

impl InquiryService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Store a contact form submission
    pub async fn create(&self, dto: CreateInquiryDto) -> Result<InquiryResponseDto> {
        let inquiry = Inquiry::from_form(dto, Utc::now());
        let record = serde_json::to_value(&inquiry)
            .map_err(|e| AppError::Internal(format!("Failed to serialize inquiry: {}", e)))?;

        self.store
            .create(INQUIRIES_COLLECTION, record)
            .await
            .inspect_err(|e| tracing::error!("Failed to create inquiry: {}", e))?;

        tracing::info!("Inquiry created: id={}", inquiry.id);

        Ok(inquiry.into())
    }
}
