//! In-progress report submission owned by one member.
//!
//! Each image selection bumps `image_revision`; a classification result is
//! only applied when it was computed for the current revision, so the last
//! selected image always wins.
//!
//! `submitting` is set while the report is being stored; a draft in that
//! state cannot be submitted again.

use axum::body::Bytes;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::classification::Classification;
use super::location::{Coordinates, LocationFix, LocationStatus};
use super::report::{
    NewReport, ReportStatus, SeverityScore, ViolationType, WasteClassification,
};

/// Locally held photo, used for preview only
#[derive(Debug, Clone)]
pub struct DraftImage {
    pub file_name: String,
    pub content_type: String,
    pub data: Bytes,
}

#[derive(Debug, Clone)]
pub struct SubmissionDraft {
    id: Uuid,
    owner: String,
    image: Option<DraftImage>,
    image_revision: u64,
    analyzing: bool,
    ai_classification: Option<WasteClassification>,
    ai_message: Option<&'static str>,
    violation_type: Option<ViolationType>,
    waste_classification: Option<WasteClassification>,
    description: String,
    location: Coordinates,
    location_status: LocationStatus,
    submitting: bool,
    created_at: DateTime<Utc>,
}

impl SubmissionDraft {
    pub fn new(owner: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner: owner.to_string(),
            image: None,
            image_revision: 0,
            analyzing: false,
            ai_classification: None,
            ai_message: None,
            violation_type: None,
            waste_classification: None,
            description: String::new(),
            location: Coordinates::unset(),
            location_status: LocationStatus::Idle,
            submitting: false,
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn is_owned_by(&self, member_id: &str) -> bool {
        self.owner == member_id
    }

    pub fn image(&self) -> Option<&DraftImage> {
        self.image.as_ref()
    }

    pub fn is_analyzing(&self) -> bool {
        self.analyzing
    }

    pub fn ai_classification(&self) -> Option<WasteClassification> {
        self.ai_classification
    }

    pub fn ai_message(&self) -> Option<&'static str> {
        self.ai_message
    }

    pub fn violation_type(&self) -> Option<ViolationType> {
        self.violation_type
    }

    pub fn waste_classification(&self) -> Option<WasteClassification> {
        self.waste_classification
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn location(&self) -> Coordinates {
        self.location
    }

    pub fn location_status(&self) -> LocationStatus {
        self.location_status
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Whether the draft is older than `ttl` at `now`
    pub fn is_expired(&self, now: DateTime<Utc>, ttl: std::time::Duration) -> bool {
        now.signed_duration_since(self.created_at)
            .to_std()
            .map(|age| age >= ttl)
            .unwrap_or(false)
    }

    /// Replace the photo and start analysing it. Returns the revision the
    /// classification result must be applied with.
    pub fn attach_image(&mut self, image: DraftImage) -> u64 {
        self.image = Some(image);
        self.image_revision += 1;
        self.analyzing = true;
        self.ai_classification = None;
        self.ai_message = None;
        self.image_revision
    }

    /// Apply a classification computed for `revision`. Results for a photo
    /// that has since been replaced or removed are dropped.
    pub fn apply_classification(&mut self, revision: u64, result: Classification) -> bool {
        if revision != self.image_revision || self.image.is_none() {
            return false;
        }
        self.analyzing = false;
        self.ai_classification = Some(result.waste_type);
        self.ai_message = Some(result.message);
        // Overwrites any manual choice
        self.waste_classification = Some(result.waste_type);
        true
    }

    /// Drop the photo and its analysis. The chosen classification stays.
    pub fn remove_image(&mut self) {
        self.image = None;
        self.image_revision += 1;
        self.analyzing = false;
        self.ai_classification = None;
        self.ai_message = None;
    }

    pub fn set_violation_type(&mut self, violation_type: Option<ViolationType>) {
        self.violation_type = violation_type;
    }

    pub fn set_waste_classification(&mut self, classification: Option<WasteClassification>) {
        self.waste_classification = classification;
    }

    pub fn set_description(&mut self, description: String) {
        self.description = description;
    }

    pub fn begin_locating(&mut self) {
        self.location_status = LocationStatus::Loading;
    }

    pub fn set_location(&mut self, fix: LocationFix) {
        self.location = fix.coordinates;
        self.location_status = fix.status;
    }

    pub fn can_retry_location(&self) -> bool {
        self.location_status == LocationStatus::Error
    }

    /// Fields still needed before the draft can be submitted
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.image.is_none() {
            missing.push("image");
        }
        if self.violation_type.is_none() {
            missing.push("violationType");
        }
        if self.waste_classification.is_none() {
            missing.push("wasteClassification");
        }
        // the pending result will overwrite the classification
        if self.analyzing {
            missing.push("imageAnalysis");
        }
        missing
    }

    pub fn can_submit(&self) -> bool {
        !self.submitting && self.missing_fields().is_empty()
    }

    /// Claim the draft for a submission. Returns `false` when another
    /// submission already holds it.
    pub fn begin_submit(&mut self) -> bool {
        if self.submitting {
            return false;
        }
        self.submitting = true;
        true
    }

    /// Release the claim after a failed store so the member can retry
    pub fn abort_submit(&mut self) {
        self.submitting = false;
    }

    /// Assemble the record to store, `None` while the draft is incomplete
    pub fn build_report(
        &self,
        severity_score: SeverityScore,
        image_url: &str,
        now: DateTime<Utc>,
    ) -> Option<NewReport> {
        if self.image.is_none() || self.analyzing {
            return None;
        }

        Some(NewReport {
            id: Uuid::new_v4().to_string(),
            violation_image: image_url.to_string(),
            violation_type: self.violation_type?,
            waste_classification: self.waste_classification?,
            description: self.description.clone(),
            latitude: self.location.latitude,
            longitude: self.location.longitude,
            report_date_time: now,
            status: ReportStatus::Submitted,
            severity_score,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::reports::models::CLASSIFICATIONS;
    use crate::shared::random::ScriptedRandom;

    fn image(name: &str) -> DraftImage {
        DraftImage {
            file_name: name.to_string(),
            content_type: "image/jpeg".to_string(),
            data: Bytes::from_static(b"jpeg"),
        }
    }

    fn severity() -> SeverityScore {
        SeverityScore::draw(&ScriptedRandom::new([6]))
    }

    #[test]
    fn test_new_draft_is_idle_and_empty() {
        let draft = SubmissionDraft::new("m-1");
        assert_eq!(draft.location_status(), LocationStatus::Idle);
        assert_eq!(draft.location(), Coordinates::new(0.0, 0.0));
        assert!(!draft.can_retry_location());
        assert_eq!(
            draft.missing_fields(),
            vec!["image", "violationType", "wasteClassification"]
        );
    }

    #[test]
    fn test_can_submit_requires_all_three_fields() {
        let mut draft = SubmissionDraft::new("m-1");

        draft.set_violation_type(Some(ViolationType::Littering));
        draft.set_waste_classification(Some(WasteClassification::Paper));
        assert!(!draft.can_submit());
        assert!(draft.build_report(severity(), "u", Utc::now()).is_none());

        let revision = draft.attach_image(image("a.jpg"));
        draft.apply_classification(revision, CLASSIFICATIONS[2]);
        assert!(draft.can_submit());

        draft.set_violation_type(None);
        assert!(!draft.can_submit());
        assert!(draft.build_report(severity(), "u", Utc::now()).is_none());

        draft.set_violation_type(Some(ViolationType::Littering));
        draft.set_waste_classification(None);
        assert!(!draft.can_submit());
    }

    #[test]
    fn test_classification_overwrites_manual_choice() {
        let mut draft = SubmissionDraft::new("m-1");
        draft.set_waste_classification(Some(WasteClassification::Hazardous));

        let revision = draft.attach_image(image("a.jpg"));
        assert!(draft.is_analyzing());

        assert!(draft.apply_classification(revision, CLASSIFICATIONS[3]));
        assert!(!draft.is_analyzing());
        assert_eq!(draft.ai_classification(), Some(WasteClassification::Metal));
        assert_eq!(draft.waste_classification(), Some(WasteClassification::Metal));
        assert_eq!(draft.ai_message(), Some(CLASSIFICATIONS[3].message));
    }

    #[test]
    fn test_stale_classification_is_dropped() {
        let mut draft = SubmissionDraft::new("m-1");

        let first = draft.attach_image(image("a.jpg"));
        let second = draft.attach_image(image("b.jpg"));

        assert!(!draft.apply_classification(first, CLASSIFICATIONS[0]));
        assert!(draft.is_analyzing());
        assert!(draft.apply_classification(second, CLASSIFICATIONS[1]));
        assert_eq!(draft.ai_classification(), Some(WasteClassification::Organic));
    }

    #[test]
    fn test_remove_image_clears_analysis_only() {
        let mut draft = SubmissionDraft::new("m-1");
        let revision = draft.attach_image(image("a.jpg"));
        draft.apply_classification(revision, CLASSIFICATIONS[4]);

        draft.remove_image();
        assert!(draft.image().is_none());
        assert!(draft.ai_classification().is_none());
        assert!(draft.ai_message().is_none());
        assert_eq!(draft.waste_classification(), Some(WasteClassification::Glass));

        // a result still in flight for the removed photo is ignored
        assert!(!draft.apply_classification(revision, CLASSIFICATIONS[0]));
    }

    #[test]
    fn test_build_report_uses_draft_fields() {
        let mut draft = SubmissionDraft::new("m-1");
        let revision = draft.attach_image(image("a.jpg"));
        draft.apply_classification(revision, CLASSIFICATIONS[1]);
        draft.set_violation_type(Some(ViolationType::BlockedDrain));
        draft.set_waste_classification(Some(WasteClassification::Mixed));
        draft.set_description("Near the bus stand".to_string());
        draft.set_location(LocationFix {
            coordinates: Coordinates::new(9.93, 78.12),
            status: LocationStatus::Success,
        });

        let now = Utc::now();
        let report = draft
            .build_report(severity(), "https://placeholder", now)
            .unwrap();

        assert!(Uuid::parse_str(&report.id).is_ok());
        assert_eq!(report.violation_image, "https://placeholder");
        assert_eq!(report.violation_type, ViolationType::BlockedDrain);
        assert_eq!(report.waste_classification, WasteClassification::Mixed);
        assert_eq!(report.description, "Near the bus stand");
        assert_eq!(report.latitude, 9.93);
        assert_eq!(report.status, ReportStatus::Submitted);
        assert_eq!(report.report_date_time, now);
        assert_eq!(report.severity_score.value(), 7);
    }

    #[test]
    fn test_cannot_submit_while_analyzing() {
        let mut draft = SubmissionDraft::new("m-1");
        draft.set_violation_type(Some(ViolationType::Littering));
        draft.set_waste_classification(Some(WasteClassification::Paper));

        let revision = draft.attach_image(image("a.jpg"));
        assert!(!draft.can_submit());
        assert_eq!(draft.missing_fields(), vec!["imageAnalysis"]);
        assert!(draft.build_report(severity(), "u", Utc::now()).is_none());

        draft.apply_classification(revision, CLASSIFICATIONS[0]);
        assert!(draft.can_submit());
        let report = draft.build_report(severity(), "u", Utc::now()).unwrap();
        assert_eq!(report.waste_classification, WasteClassification::Plastic);
    }

    #[test]
    fn test_submit_claim_is_exclusive() {
        let mut draft = SubmissionDraft::new("m-1");
        let revision = draft.attach_image(image("a.jpg"));
        draft.apply_classification(revision, CLASSIFICATIONS[0]);
        draft.set_violation_type(Some(ViolationType::Other));
        assert!(draft.can_submit());

        assert!(draft.begin_submit());
        assert!(draft.is_submitting());
        assert!(!draft.can_submit());
        assert!(!draft.begin_submit());

        draft.abort_submit();
        assert!(draft.can_submit());
        assert!(draft.begin_submit());
    }

    #[test]
    fn test_expiry_is_measured_from_creation() {
        let draft = SubmissionDraft::new("m-1");
        let ttl = std::time::Duration::from_secs(60);

        assert!(!draft.is_expired(draft.created_at(), ttl));
        assert!(!draft.is_expired(draft.created_at() + chrono::Duration::seconds(59), ttl));
        assert!(draft.is_expired(draft.created_at() + chrono::Duration::seconds(60), ttl));
        // a clock that went backwards never expires a draft
        assert!(!draft.is_expired(draft.created_at() - chrono::Duration::seconds(5), ttl));
    }

    #[test]
    fn test_each_build_gets_a_fresh_id() {
        let mut draft = SubmissionDraft::new("m-1");
        let revision = draft.attach_image(image("a.jpg"));
        draft.apply_classification(revision, CLASSIFICATIONS[1]);
        draft.set_violation_type(Some(ViolationType::Other));
        draft.set_waste_classification(Some(WasteClassification::Glass));

        let a = draft.build_report(severity(), "u", Utc::now()).unwrap();
        let b = draft.build_report(severity(), "u", Utc::now()).unwrap();
        assert_ne!(a.id, b.id);
    }
}
