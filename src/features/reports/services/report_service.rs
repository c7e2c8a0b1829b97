use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::reports::dtos::{ReportFeedDto, ReportListQuery};
use crate::features::reports::models::{NewReport, Report};
use crate::modules::backend::{decode_record, RecordStore};
use crate::shared::constants::{FEED_PAGE_SIZE, MAX_FEED_PAGES, REPORTS_COLLECTION};
use crate::shared::feed::{FeedFilter, FieldMatch, PagedFeed};
use crate::shared::validation::is_valid_record_id;

/// Status and violation type filter over loaded reports
pub struct ReportFilter {
    pub status: FieldMatch,
    pub violation_type: FieldMatch,
}

impl FeedFilter<Report> for ReportFilter {
    fn matches(&self, report: &Report) -> bool {
        self.status.accepts(report.status.as_deref())
            && self.violation_type.accepts(report.violation_type.as_deref())
    }
}

/// Service for community report operations
pub struct ReportService {
    store: Arc<dyn RecordStore>,
}

impl ReportService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Load the newest `pages` pages and filter what was loaded
    pub async fn list(&self, query: &ReportListQuery) -> Result<ReportFeedDto> {
        let pages = query.pages.unwrap_or(1).clamp(1, MAX_FEED_PAGES);
        let filter = ReportFilter {
            status: FieldMatch::from_query(query.status.as_deref()),
            violation_type: FieldMatch::from_query(query.violation_type.as_deref()),
        };

        let mut feed = PagedFeed::<Report>::new(REPORTS_COLLECTION, FEED_PAGE_SIZE);
        feed.load_pages(self.store.as_ref(), pages).await?;

        let items: Vec<Report> = feed.filtered(&filter).into_iter().cloned().collect();
        tracing::debug!(
            "Loaded {} reports over {} pages, {} after filtering",
            feed.items().len(),
            feed.loaded_pages(),
            items.len()
        );

        Ok(ReportFeedDto {
            items,
            has_next: feed.has_next(),
            next_skip: feed.next_skip(),
            loaded_count: feed.items().len(),
            loaded_pages: feed.loaded_pages(),
        })
    }

    /// Fetch one report, `None` when it does not exist
    pub async fn get(&self, id: &str) -> Result<Option<Report>> {
        if !is_valid_record_id(id) {
            return Ok(None);
        }

        match self.store.get_by_id(REPORTS_COLLECTION, id).await? {
            Some(record) => Ok(Some(decode_record(record)?)),
            None => Ok(None),
        }
    }

    /// Store a new report with a single create request
    pub async fn create(&self, report: &NewReport) -> Result<Report> {
        let record = serde_json::to_value(report)
            .map_err(|e| AppError::Internal(format!("Failed to serialize report: {}", e)))?;

        let created = self
            .store
            .create(REPORTS_COLLECTION, record)
            .await
            .inspect_err(|e| tracing::error!("Failed to create report {}: {}", report.id, e))?;

        tracing::info!(
            "Created report: {} ({}, severity {})",
            report.id,
            report.violation_type.as_str(),
            report.severity_score.value()
        );

        Ok(decode_record(created)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::backend::InMemoryRecordStore;
    use crate::shared::test_helpers::FailingRecordStore;
    use serde_json::{json, Value};

    fn report(i: usize, status: &str, violation_type: &str) -> Value {
        json!({
            "_id": format!("r{:02}", i),
            "status": status,
            "violationType": violation_type,
            "severityScore": 5
        })
    }

    /// 15 reports, oldest first: r00..r02 Resolved, the rest Submitted
    async fn seeded_store() -> Arc<InMemoryRecordStore> {
        let store = Arc::new(InMemoryRecordStore::new());
        let records = (0..15)
            .map(|i| {
                let status = if i < 3 { "Resolved" } else { "Submitted" };
                let kind = if i % 2 == 0 { "Littering" } else { "Garbage Pile" };
                report(i, status, kind)
            })
            .collect();
        store.seed(REPORTS_COLLECTION, records).await;
        store
    }

    fn query(pages: Option<u32>, status: Option<&str>, kind: Option<&str>) -> ReportListQuery {
        ReportListQuery {
            pages,
            status: status.map(str::to_string),
            violation_type: kind.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_list_first_page_without_filters() {
        let service = ReportService::new(seeded_store().await);

        let feed = service.list(&query(None, None, None)).await.unwrap();
        assert_eq!(feed.items.len(), 12);
        assert_eq!(feed.loaded_count, 12);
        assert!(feed.has_next);
        assert_eq!(feed.next_skip, 12);
        assert_eq!(feed.items[0].id, "r14");
    }

    #[tokio::test]
    async fn test_resolved_filter_only_sees_loaded_pages() {
        let service = ReportService::new(seeded_store().await);

        // resolved reports are the oldest three, beyond the first page
        let first = service
            .list(&query(Some(1), Some("Resolved"), Some("all")))
            .await
            .unwrap();
        assert!(first.items.is_empty());
        assert_eq!(first.loaded_count, 12);

        let both = service
            .list(&query(Some(2), Some("Resolved"), Some("all")))
            .await
            .unwrap();
        assert_eq!(both.loaded_count, 15);
        assert!(!both.has_next);
        let ids: Vec<&str> = both.items.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["r02", "r01", "r00"]);
    }

    #[tokio::test]
    async fn test_two_field_filter() {
        let service = ReportService::new(seeded_store().await);

        let feed = service
            .list(&query(Some(2), Some("Resolved"), Some("Littering")))
            .await
            .unwrap();
        let ids: Vec<&str> = feed.items.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["r02", "r00"]);
    }

    #[tokio::test]
    async fn test_page_count_is_clamped() {
        let service = ReportService::new(seeded_store().await);

        let zero = service.list(&query(Some(0), None, None)).await.unwrap();
        assert_eq!(zero.loaded_pages, 1);

        let many = service.list(&query(Some(500), None, None)).await.unwrap();
        assert_eq!(many.loaded_pages, 2);
        assert_eq!(many.loaded_count, 15);
    }

    #[tokio::test]
    async fn test_get_missing_and_malformed_ids() {
        let service = ReportService::new(seeded_store().await);

        assert_eq!(service.get("r03").await.unwrap().unwrap().id, "r03");
        assert!(service.get("nope").await.unwrap().is_none());
        assert!(service.get("../etc").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_backend_failure_surfaces() {
        let service = ReportService::new(FailingRecordStore::shared());

        let err = service.list(&query(None, None, None)).await.unwrap_err();
        assert!(matches!(err, AppError::Backend(_)));
    }
}
