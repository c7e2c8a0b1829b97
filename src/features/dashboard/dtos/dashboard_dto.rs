use serde::Serialize;
use utoipa::ToSchema;

use crate::features::dashboard::models::{Badge, DashboardStats};
use crate::features::reports::models::Report;

/// Everything the dashboard page renders
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardDto {
    /// Member nickname, or "Citizen"
    pub greeting_name: String,
    pub stats: DashboardStats,
    pub badges: Vec<Badge>,
    /// Newest fetched reports
    pub recent_reports: Vec<Report>,
}
