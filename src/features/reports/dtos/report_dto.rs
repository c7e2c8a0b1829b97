use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::features::reports::models::Report;

/// Query for the community reports listing
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ReportListQuery {
    /// Number of pages of 12 to load, starting from the newest (default 1)
    pub pages: Option<u32>,
    /// Exact status to keep, `all` for any
    pub status: Option<String>,
    /// Exact violation type to keep, `all` for any
    pub violation_type: Option<String>,
}

/// Loaded window of the reports feed after filtering
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportFeedDto {
    pub items: Vec<Report>,
    /// More pages are available from the backend
    pub has_next: bool,
    pub next_skip: u32,
    /// Records loaded before filtering
    pub loaded_count: usize,
    pub loaded_pages: u32,
}

/// Payload of the report detail 404
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportNotFoundDto {
    pub back_link: String,
}
