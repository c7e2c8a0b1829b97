use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tokio::time::interval;
use uuid::Uuid;

use crate::core::config::PipelineConfig;
use crate::core::error::{AppError, Result};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::reports::dtos::{DraftResponseDto, SubmitReportResponseDto, UpdateDraftDto};
use crate::features::reports::models::{Coordinates, DraftImage, SeverityScore, SubmissionDraft};
use crate::features::reports::services::classifier::WasteClassifier;
use crate::features::reports::services::geolocation::{acquire_location, Geolocator};
use crate::features::reports::services::report_service::ReportService;
use crate::shared::constants::POST_SUBMIT_PATH;
use crate::shared::random::RandomSource;

/// Open report drafts, held in memory and owned by the member who opened
/// them.
///
/// The lock is never held across the classifier or the backend call.
/// Drafts older than the configured TTL are discarded on `open` and by
/// `run_expiry_sweep`.
pub struct DraftService {
    drafts: RwLock<HashMap<Uuid, SubmissionDraft>>,
    classifier: Arc<dyn WasteClassifier>,
    random: Arc<dyn RandomSource>,
    reports: Arc<ReportService>,
    config: PipelineConfig,
}

impl DraftService {
    pub fn new(
        classifier: Arc<dyn WasteClassifier>,
        random: Arc<dyn RandomSource>,
        reports: Arc<ReportService>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            drafts: RwLock::new(HashMap::new()),
            classifier,
            random,
            reports,
            config,
        }
    }

    fn fallback_location(&self) -> Coordinates {
        Coordinates::new(self.config.fallback_latitude, self.config.fallback_longitude)
    }

    fn parse_id(id: &str) -> Result<Uuid> {
        Uuid::parse_str(id).map_err(|_| draft_not_found())
    }

    async fn with_draft<R>(
        &self,
        id: Uuid,
        user: &AuthenticatedUser,
        f: impl FnOnce(&SubmissionDraft) -> R,
    ) -> Result<R> {
        let drafts = self.drafts.read().await;
        let draft = drafts.get(&id).ok_or_else(draft_not_found)?;
        ensure_owner(draft, user)?;
        Ok(f(draft))
    }

    async fn with_draft_mut<R>(
        &self,
        id: Uuid,
        user: &AuthenticatedUser,
        f: impl FnOnce(&mut SubmissionDraft) -> R,
    ) -> Result<R> {
        let mut drafts = self.drafts.write().await;
        let draft = drafts.get_mut(&id).ok_or_else(draft_not_found)?;
        ensure_owner(draft, user)?;
        Ok(f(draft))
    }

    /// Open a draft, making the first location attempt when the client
    /// forwarded one
    pub async fn open(
        &self,
        user: &AuthenticatedUser,
        location: Option<&dyn Geolocator>,
    ) -> Result<DraftResponseDto> {
        let draft = SubmissionDraft::new(&user.member_id);
        let id = draft.id();
        let view = DraftResponseDto::from(&draft);
        {
            let mut drafts = self.drafts.write().await;
            self.evict_expired_locked(&mut drafts, Utc::now());
            self.make_room_for(&mut drafts, &user.member_id);
            drafts.insert(id, draft);
        }

        tracing::info!("Opened report draft {} for member {}", id, user.member_id);

        match location {
            Some(geolocator) => self.locate_draft(id, user, geolocator).await,
            None => Ok(view),
        }
    }

    /// Drop drafts that outlived the TTL. Returns how many were dropped.
    pub async fn evict_expired(&self, now: DateTime<Utc>) -> usize {
        let mut drafts = self.drafts.write().await;
        self.evict_expired_locked(&mut drafts, now)
    }

    fn evict_expired_locked(
        &self,
        drafts: &mut HashMap<Uuid, SubmissionDraft>,
        now: DateTime<Utc>,
    ) -> usize {
        let before = drafts.len();
        let ttl = self.config.draft_ttl;
        drafts.retain(|_, draft| draft.is_submitting() || !draft.is_expired(now, ttl));
        let evicted = before - drafts.len();
        if evicted > 0 {
            tracing::debug!("Evicted {} expired report drafts", evicted);
        }
        evicted
    }

    /// Discard the member's oldest drafts until a new one fits under the cap
    fn make_room_for(&self, drafts: &mut HashMap<Uuid, SubmissionDraft>, member_id: &str) {
        let limit = self.config.max_open_drafts_per_member.max(1);
        let mut owned: Vec<(DateTime<Utc>, Uuid)> = drafts
            .values()
            .filter(|draft| draft.is_owned_by(member_id) && !draft.is_submitting())
            .map(|draft| (draft.created_at(), draft.id()))
            .collect();
        if owned.len() < limit {
            return;
        }

        owned.sort();
        for (_, id) in owned.iter().take(owned.len() + 1 - limit) {
            drafts.remove(id);
            tracing::debug!("Discarded report draft {} of member {} over the cap", id, member_id);
        }
    }

    /// Periodically drop expired drafts. Runs until the task is aborted.
    pub async fn run_expiry_sweep(&self, period: Duration) {
        tracing::info!("Starting report draft expiry sweep");

        let mut interval = interval(period);
        loop {
            interval.tick().await;
            self.evict_expired(Utc::now()).await;
        }
    }

    #[cfg(test)]
    pub async fn open_drafts(&self) -> usize {
        self.drafts.read().await.len()
    }

    pub async fn get(&self, id: &str, user: &AuthenticatedUser) -> Result<DraftResponseDto> {
        let id = Self::parse_id(id)?;
        self.with_draft(id, user, |draft| DraftResponseDto::from(draft))
            .await
    }

    pub async fn update(
        &self,
        id: &str,
        user: &AuthenticatedUser,
        dto: UpdateDraftDto,
    ) -> Result<DraftResponseDto> {
        let id = Self::parse_id(id)?;
        self.with_draft_mut(id, user, |draft| {
            if let Some(violation_type) = dto.violation_type {
                draft.set_violation_type(violation_type);
            }
            if let Some(classification) = dto.waste_classification {
                draft.set_waste_classification(classification);
            }
            if let Some(description) = dto.description {
                draft.set_description(description);
            }
            DraftResponseDto::from(&*draft)
        })
        .await
    }

    /// Retry the location attempt
    pub async fn locate(
        &self,
        id: &str,
        user: &AuthenticatedUser,
        geolocator: &dyn Geolocator,
    ) -> Result<DraftResponseDto> {
        let id = Self::parse_id(id)?;
        self.locate_draft(id, user, geolocator).await
    }

    async fn locate_draft(
        &self,
        id: Uuid,
        user: &AuthenticatedUser,
        geolocator: &dyn Geolocator,
    ) -> Result<DraftResponseDto> {
        self.with_draft_mut(id, user, |draft| draft.begin_locating())
            .await?;

        let fix = acquire_location(geolocator, self.fallback_location()).await;

        self.with_draft_mut(id, user, |draft| {
            draft.set_location(fix);
            DraftResponseDto::from(&*draft)
        })
        .await
    }

    /// Attach a photo and wait for its classification
    pub async fn attach_image(
        &self,
        id: &str,
        user: &AuthenticatedUser,
        image: DraftImage,
    ) -> Result<DraftResponseDto> {
        let id = Self::parse_id(id)?;
        let revision = self
            .with_draft_mut(id, user, |draft| draft.attach_image(image.clone()))
            .await?;

        let result = self.classifier.classify(&image).await;

        self.with_draft_mut(id, user, |draft| {
            if !draft.apply_classification(revision, result) {
                tracing::debug!("Dropping classification for replaced image on draft {}", id);
            }
            DraftResponseDto::from(&*draft)
        })
        .await
    }

    pub async fn remove_image(
        &self,
        id: &str,
        user: &AuthenticatedUser,
    ) -> Result<DraftResponseDto> {
        let id = Self::parse_id(id)?;
        self.with_draft_mut(id, user, |draft| {
            draft.remove_image();
            DraftResponseDto::from(&*draft)
        })
        .await
    }

    /// Local preview of the attached photo
    pub async fn image(&self, id: &str, user: &AuthenticatedUser) -> Result<DraftImage> {
        let id = Self::parse_id(id)?;
        self.with_draft(id, user, |draft| draft.image().cloned())
            .await?
            .ok_or_else(|| AppError::NotFound("No image attached".to_string()))
    }

    /// Build the report, store it, and close the draft.
    ///
    /// The draft is claimed under the write lock before the create, so a
    /// second submit arriving meanwhile is rejected. A failed create
    /// releases the claim and leaves the draft in place for a retry.
    pub async fn submit(
        &self,
        id: &str,
        user: &AuthenticatedUser,
    ) -> Result<SubmitReportResponseDto> {
        let id = Self::parse_id(id)?;
        let new_report = self
            .with_draft_mut(id, user, |draft| {
                if draft.is_submitting() {
                    return Err(AppError::BadRequest(
                        "This report is already being submitted".to_string(),
                    ));
                }
                let missing = draft.missing_fields();
                if !missing.is_empty() {
                    return Err(AppError::Validation(format!(
                        "Missing required fields: {}",
                        missing.join(", ")
                    )));
                }
                let severity = SeverityScore::draw(self.random.as_ref());
                let report = draft
                    .build_report(severity, &self.config.placeholder_image_url, Utc::now())
                    .ok_or_else(|| AppError::Validation("Draft is incomplete".to_string()))?;
                draft.begin_submit();
                Ok(report)
            })
            .await??;

        match self.reports.create(&new_report).await {
            Ok(report) => {
                self.drafts.write().await.remove(&id);
                Ok(SubmitReportResponseDto {
                    report,
                    next: POST_SUBMIT_PATH.to_string(),
                })
            }
            Err(e) => {
                if let Some(draft) = self.drafts.write().await.get_mut(&id) {
                    draft.abort_submit();
                }
                Err(e)
            }
        }
    }

    /// Discard the draft
    pub async fn cancel(&self, id: &str, user: &AuthenticatedUser) -> Result<()> {
        let id = Self::parse_id(id)?;
        let mut drafts = self.drafts.write().await;
        let draft = drafts.get(&id).ok_or_else(draft_not_found)?;
        ensure_owner(draft, user)?;
        drafts.remove(&id);
        Ok(())
    }
}

fn draft_not_found() -> AppError {
    AppError::NotFound("Draft not found".to_string())
}

fn ensure_owner(draft: &SubmissionDraft, user: &AuthenticatedUser) -> Result<()> {
    if draft.is_owned_by(&user.member_id) {
        Ok(())
    } else {
        Err(AppError::Forbidden(
            "This draft belongs to another member".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::reports::models::{
        LocationStatus, ViolationType, WasteClassification, CLASSIFICATIONS,
    };
    use crate::features::reports::services::{ReportedPosition, SimulatedClassifier};
    use crate::modules::backend::{InMemoryRecordStore, RecordStore};
    use crate::shared::constants::REPORTS_COLLECTION;
    use crate::shared::random::ScriptedRandom;
    use crate::shared::test_helpers::{
        create_member_user, member_user, FailingRecordStore, SlowRecordStore,
    };
    use axum::body::Bytes;
    use std::time::Duration;

    fn image(name: &str) -> DraftImage {
        DraftImage {
            file_name: name.to_string(),
            content_type: "image/png".to_string(),
            data: Bytes::from_static(b"png"),
        }
    }

    fn service_with(store: Arc<dyn RecordStore>, draws: Vec<u32>) -> DraftService {
        service_with_config(store, draws, PipelineConfig::default())
    }

    fn service_with_config(
        store: Arc<dyn RecordStore>,
        draws: Vec<u32>,
        config: PipelineConfig,
    ) -> DraftService {
        let random: Arc<dyn RandomSource> = Arc::new(ScriptedRandom::new(draws));
        DraftService::new(
            Arc::new(SimulatedClassifier::new(
                Duration::from_secs(2),
                Arc::clone(&random),
            )),
            random,
            Arc::new(ReportService::new(store)),
            config,
        )
    }

    async fn complete_draft(service: &DraftService) -> String {
        let user = create_member_user();
        let draft = service.open(&user, None).await.unwrap();
        let id = draft.id.to_string();
        service.attach_image(&id, &user, image("a.png")).await.unwrap();
        service
            .update(
                &id,
                &user,
                UpdateDraftDto {
                    violation_type: Some(Some(ViolationType::GarbagePile)),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        id
    }

    #[tokio::test]
    async fn test_open_without_location_is_idle() {
        let service = service_with(Arc::new(InMemoryRecordStore::new()), vec![0]);

        let draft = service.open(&create_member_user(), None).await.unwrap();
        assert_eq!(draft.location_status, LocationStatus::Idle);
        assert!(!draft.can_submit);
    }

    #[tokio::test]
    async fn test_open_with_failed_location_uses_fallback() {
        let service = service_with(Arc::new(InMemoryRecordStore::new()), vec![0]);
        let denied = ReportedPosition::Failed("denied".to_string());

        let draft = service
            .open(&create_member_user(), Some(&denied))
            .await
            .unwrap();
        assert_eq!(draft.location_status, LocationStatus::Error);
        assert_eq!(draft.location, Coordinates::new(9.9252, 78.1198));
        assert!(draft.can_retry_location);

        let retry = ReportedPosition::Position(Coordinates::new(9.91, 78.11));
        let located = service
            .locate(&draft.id.to_string(), &create_member_user(), &retry)
            .await
            .unwrap();
        assert_eq!(located.location_status, LocationStatus::Success);
        assert!(!located.can_retry_location);
    }

    #[tokio::test(start_paused = true)]
    async fn test_attach_image_classifies_after_delay() {
        let service = service_with(Arc::new(InMemoryRecordStore::new()), vec![1]);
        let user = create_member_user();
        let id = service.open(&user, None).await.unwrap().id.to_string();

        let started = tokio::time::Instant::now();
        let draft = service.attach_image(&id, &user, image("a.png")).await.unwrap();

        assert!(started.elapsed() >= Duration::from_secs(2));
        assert!(!draft.is_analyzing);
        assert_eq!(draft.ai_classification, Some(WasteClassification::Organic));
        assert_eq!(draft.waste_classification, Some(WasteClassification::Organic));
        assert_eq!(draft.ai_message.as_deref(), Some(CLASSIFICATIONS[1].message));
        assert_eq!(draft.image_name.as_deref(), Some("a.png"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_last_selected_image_wins() {
        let service = Arc::new(service_with(
            Arc::new(InMemoryRecordStore::new()),
            vec![0, 4],
        ));
        let user = create_member_user();
        let id = service.open(&user, None).await.unwrap().id.to_string();

        let first = {
            let service = Arc::clone(&service);
            let (id, user) = (id.clone(), user.clone());
            tokio::spawn(async move { service.attach_image(&id, &user, image("a.png")).await })
        };
        tokio::time::sleep(Duration::from_millis(500)).await;
        let second = service.attach_image(&id, &user, image("b.png")).await.unwrap();
        first.await.unwrap().unwrap();

        let draft = service.get(&id, &user).await.unwrap();
        assert_eq!(draft.image_name.as_deref(), Some("b.png"));
        assert_eq!(draft.ai_classification, second.ai_classification);
        assert_eq!(draft.ai_classification, Some(WasteClassification::Glass));
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_creates_report_and_closes_draft() {
        let store = Arc::new(InMemoryRecordStore::new());
        let service = service_with(store.clone(), vec![5]);
        let user = create_member_user();
        let id = complete_draft(&service).await;

        let submitted = service.submit(&id, &user).await.unwrap();
        assert_eq!(submitted.next, "/dashboard");
        assert_eq!(submitted.report.status.as_deref(), Some("Submitted"));
        assert_eq!(submitted.report.violation_type.as_deref(), Some("Garbage Pile"));
        assert_eq!(submitted.report.waste_classification.as_deref(), Some("Mixed"));
        assert_eq!(submitted.report.severity_score, Some(6));
        assert_eq!(
            submitted.report.violation_image.as_deref(),
            Some(PipelineConfig::default().placeholder_image_url.as_str())
        );
        assert_eq!(store.len(REPORTS_COLLECTION).await, 1);

        let err = service.get(&id, &user).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_submit_rejects_incomplete_draft() {
        let store = Arc::new(InMemoryRecordStore::new());
        let service = service_with(store.clone(), vec![0]);
        let user = create_member_user();
        let id = service.open(&user, None).await.unwrap().id.to_string();

        let err = service.submit(&id, &user).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(store.len(REPORTS_COLLECTION).await, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_submit_keeps_draft() {
        let service = service_with(FailingRecordStore::shared(), vec![0]);
        let user = create_member_user();
        let id = complete_draft(&service).await;

        let err = service.submit(&id, &user).await.unwrap_err();
        assert!(matches!(err, AppError::Backend(_)));

        let draft = service.get(&id, &user).await.unwrap();
        assert!(!draft.is_submitting);
        assert!(draft.can_submit);
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_submits_store_one_report() {
        let store = Arc::new(InMemoryRecordStore::new());
        let slow = Arc::new(SlowRecordStore::new(
            Arc::clone(&store),
            Duration::from_millis(200),
        ));
        let service = service_with(slow, vec![5]);
        let user = create_member_user();
        let id = complete_draft(&service).await;

        let (first, second) = tokio::join!(service.submit(&id, &user), service.submit(&id, &user));

        assert_eq!(
            [first.is_ok(), second.is_ok()].iter().filter(|ok| **ok).count(),
            1
        );
        let rejected = first.err().or(second.err()).unwrap();
        assert!(matches!(rejected, AppError::BadRequest(_)));
        assert_eq!(store.len(REPORTS_COLLECTION).await, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_draft_reports_submission_in_flight() {
        let store = Arc::new(InMemoryRecordStore::new());
        let slow = Arc::new(SlowRecordStore::new(
            Arc::clone(&store),
            Duration::from_millis(200),
        ));
        let service = Arc::new(service_with(slow, vec![5]));
        let user = create_member_user();
        let id = complete_draft(&service).await;

        let submit = {
            let service = Arc::clone(&service);
            let (id, user) = (id.clone(), user.clone());
            tokio::spawn(async move { service.submit(&id, &user).await })
        };
        tokio::time::sleep(Duration::from_millis(50)).await;

        let draft = service.get(&id, &user).await.unwrap();
        assert!(draft.is_submitting);
        assert!(!draft.can_submit);

        submit.await.unwrap().unwrap();
        assert_eq!(store.len(REPORTS_COLLECTION).await, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_waits_for_image_analysis() {
        let store = Arc::new(InMemoryRecordStore::new());
        let service = Arc::new(service_with(store.clone(), vec![2, 5]));
        let user = create_member_user();
        let id = service.open(&user, None).await.unwrap().id.to_string();
        service
            .update(
                &id,
                &user,
                UpdateDraftDto {
                    violation_type: Some(Some(ViolationType::Littering)),
                    waste_classification: Some(Some(WasteClassification::Hazardous)),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let analysis = {
            let service = Arc::clone(&service);
            let (id, user) = (id.clone(), user.clone());
            tokio::spawn(async move { service.attach_image(&id, &user, image("a.png")).await })
        };
        tokio::time::sleep(Duration::from_millis(500)).await;

        match service.submit(&id, &user).await.unwrap_err() {
            AppError::Validation(msg) => assert!(msg.contains("imageAnalysis")),
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(store.len(REPORTS_COLLECTION).await, 0);

        let analysed = analysis.await.unwrap().unwrap();
        assert_eq!(analysed.waste_classification, Some(WasteClassification::Paper));

        let submitted = service.submit(&id, &user).await.unwrap();
        assert_eq!(submitted.report.waste_classification.as_deref(), Some("Paper"));
    }

    #[tokio::test]
    async fn test_expired_drafts_are_evicted() {
        let config = PipelineConfig {
            draft_ttl: Duration::from_secs(60),
            ..Default::default()
        };
        let service = service_with_config(Arc::new(InMemoryRecordStore::new()), vec![0], config);
        let user = create_member_user();
        let id = service.open(&user, None).await.unwrap().id.to_string();

        assert_eq!(service.evict_expired(Utc::now()).await, 0);
        assert_eq!(
            service
                .evict_expired(Utc::now() + chrono::Duration::seconds(61))
                .await,
            1
        );
        assert_eq!(service.open_drafts().await, 0);
        assert!(matches!(
            service.get(&id, &user).await.unwrap_err(),
            AppError::NotFound(_)
        ));
    }

    #[tokio::test]
    async fn test_open_drops_expired_drafts() {
        let config = PipelineConfig {
            draft_ttl: Duration::ZERO,
            ..Default::default()
        };
        let service = service_with_config(Arc::new(InMemoryRecordStore::new()), vec![0], config);
        let stale = service
            .open(&member_user("someone-else"), None)
            .await
            .unwrap()
            .id
            .to_string();

        let user = create_member_user();
        let fresh = service.open(&user, None).await.unwrap().id.to_string();

        assert_eq!(service.open_drafts().await, 1);
        assert!(service.get(&fresh, &user).await.is_ok());
        assert!(matches!(
            service
                .get(&stale, &member_user("someone-else"))
                .await
                .unwrap_err(),
            AppError::NotFound(_)
        ));
    }

    #[tokio::test]
    async fn test_open_drafts_are_capped_per_member() {
        let config = PipelineConfig {
            max_open_drafts_per_member: 3,
            ..Default::default()
        };
        let service = service_with_config(Arc::new(InMemoryRecordStore::new()), vec![0], config);
        let other = member_user("someone-else");
        let others = service.open(&other, None).await.unwrap().id.to_string();

        let user = create_member_user();
        let mut last = String::new();
        for _ in 0..1000 {
            last = service.open(&user, None).await.unwrap().id.to_string();
        }

        assert_eq!(service.open_drafts().await, 4);
        assert!(service.get(&last, &user).await.is_ok());
        assert!(service.get(&others, &other).await.is_ok());
    }

    #[tokio::test]
    async fn test_drafts_are_private_to_their_owner() {
        let service = service_with(Arc::new(InMemoryRecordStore::new()), vec![0]);
        let id = service
            .open(&create_member_user(), None)
            .await
            .unwrap()
            .id
            .to_string();

        let other = member_user("someone-else");
        assert!(matches!(
            service.get(&id, &other).await.unwrap_err(),
            AppError::Forbidden(_)
        ));
        assert!(matches!(
            service.cancel(&id, &other).await.unwrap_err(),
            AppError::Forbidden(_)
        ));
        assert!(matches!(
            service.get("not-a-uuid", &other).await.unwrap_err(),
            AppError::NotFound(_)
        ));
    }

    #[tokio::test]
    async fn test_cancel_discards_draft() {
        let service = service_with(Arc::new(InMemoryRecordStore::new()), vec![0]);
        let user = create_member_user();
        let id = service.open(&user, None).await.unwrap().id.to_string();

        service.cancel(&id, &user).await.unwrap();
        assert!(matches!(
            service.get(&id, &user).await.unwrap_err(),
            AppError::NotFound(_)
        ));
    }
}
