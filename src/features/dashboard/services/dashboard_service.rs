use std::sync::Arc;

use crate::core::error::Result;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::auth::SessionService;
use crate::features::dashboard::dtos::DashboardDto;
use crate::features::dashboard::models::DashboardStats;
use crate::features::reports::models::{Report, ReportStatus};
use crate::modules::backend::{decode_page, PageRequest, RecordStore};
use crate::shared::constants::{
    DASHBOARD_FETCH_LIMIT, DASHBOARD_RECENT_COUNT, DEFAULT_GREETING_NAME, MAX_COMMUNITY_RANK,
    MIN_COMMUNITY_RANK, REPORTS_COLLECTION,
};
use crate::shared::random::RandomSource;

/// Aggregates the member dashboard.
///
/// Reports carry no owner, so the counters cover the newest
/// `DASHBOARD_FETCH_LIMIT` community reports. The rank is drawn fresh on
/// every load.
pub struct DashboardService {
    store: Arc<dyn RecordStore>,
    random: Arc<dyn RandomSource>,
    sessions: Arc<SessionService>,
}

impl DashboardService {
    pub fn new(
        store: Arc<dyn RecordStore>,
        random: Arc<dyn RandomSource>,
        sessions: Arc<SessionService>,
    ) -> Self {
        Self {
            store,
            random,
            sessions,
        }
    }

    pub async fn load(&self, user: AuthenticatedUser) -> Result<DashboardDto> {
        let raw = self
            .store
            .get_all(
                REPORTS_COLLECTION,
                &[],
                PageRequest::first(DASHBOARD_FETCH_LIMIT),
            )
            .await
            .inspect_err(|e| tracing::error!("Failed to fetch dashboard reports: {}", e))?;
        let reports = decode_page::<Report>(REPORTS_COLLECTION, raw).items;

        let stats = self.stats(&reports);

        let ctx = self.sessions.resolve(Some(user)).await;
        let greeting_name = ctx
            .current_member()
            .and_then(|m| m.nickname())
            .unwrap_or(DEFAULT_GREETING_NAME)
            .to_string();

        Ok(DashboardDto {
            greeting_name,
            badges: stats.badges(),
            stats,
            recent_reports: reports.into_iter().take(DASHBOARD_RECENT_COUNT).collect(),
        })
    }

    fn stats(&self, reports: &[Report]) -> DashboardStats {
        let total = reports.len() as u32;
        let resolved = reports
            .iter()
            .filter(|r| r.has_status(ReportStatus::Resolved))
            .count() as u32;
        let rank = self.random.between(MIN_COMMUNITY_RANK, MAX_COMMUNITY_RANK);

        DashboardStats::new(total, resolved, rank)
    }
}
