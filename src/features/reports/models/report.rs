use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::shared::constants::{MAX_SEVERITY_SCORE, MIN_SEVERITY_SCORE};
use crate::shared::random::RandomSource;

/// Kind of cleanliness problem being reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum ViolationType {
    #[serde(rename = "Garbage Pile")]
    GarbagePile,
    #[serde(rename = "Illegal Dumping")]
    IllegalDumping,
    #[serde(rename = "Overflowing Bin")]
    OverflowingBin,
    #[serde(rename = "Blocked Drain")]
    BlockedDrain,
    Littering,
    Other,
}

impl ViolationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViolationType::GarbagePile => "Garbage Pile",
            ViolationType::IllegalDumping => "Illegal Dumping",
            ViolationType::OverflowingBin => "Overflowing Bin",
            ViolationType::BlockedDrain => "Blocked Drain",
            ViolationType::Littering => "Littering",
            ViolationType::Other => "Other",
        }
    }
}

/// Waste material category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum WasteClassification {
    Organic,
    Plastic,
    Metal,
    Glass,
    Paper,
    Mixed,
    Hazardous,
}

impl WasteClassification {
    pub fn as_str(&self) -> &'static str {
        match self {
            WasteClassification::Organic => "Organic",
            WasteClassification::Plastic => "Plastic",
            WasteClassification::Metal => "Metal",
            WasteClassification::Glass => "Glass",
            WasteClassification::Paper => "Paper",
            WasteClassification::Mixed => "Mixed",
            WasteClassification::Hazardous => "Hazardous",
        }
    }
}

/// Processing state of a report. This service only ever writes `Submitted`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum ReportStatus {
    Submitted,
    #[serde(rename = "Under Review")]
    UnderReview,
    Resolved,
}

impl ReportStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportStatus::Submitted => "Submitted",
            ReportStatus::UnderReview => "Under Review",
            ReportStatus::Resolved => "Resolved",
        }
    }
}

impl std::fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Randomly assigned severity, always within 1..=10
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SeverityScore(u8);

impl SeverityScore {
    pub fn draw(random: &dyn RandomSource) -> Self {
        let value = random.between(MIN_SEVERITY_SCORE as u32, MAX_SEVERITY_SCORE as u32);
        // Clamp so a misbehaving source cannot escape the range
        let value = value.clamp(MIN_SEVERITY_SCORE as u32, MAX_SEVERITY_SCORE as u32);
        Self(value as u8)
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

/// Report as written to the `cleanlinessreports` collection
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReport {
    #[serde(rename = "_id")]
    pub id: String,
    pub violation_image: String,
    pub violation_type: ViolationType,
    pub waste_classification: WasteClassification,
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
    pub report_date_time: DateTime<Utc>,
    pub status: ReportStatus,
    pub severity_score: SeverityScore,
}

/// Report as read back from the backend.
///
/// Every field but the id may be missing, and enum-like fields are kept as
/// the raw strings the backend holds.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_createdDate", default, skip_serializing_if = "Option::is_none")]
    pub created_date: Option<DateTime<Utc>>,
    #[serde(rename = "_updatedDate", default, skip_serializing_if = "Option::is_none")]
    pub updated_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub violation_image: Option<String>,
    #[serde(default)]
    pub violation_type: Option<String>,
    #[serde(default)]
    pub waste_classification: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub report_date_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub severity_score: Option<i64>,
}

impl Report {
    pub fn has_status(&self, status: ReportStatus) -> bool {
        self.status.as_deref() == Some(status.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::random::ScriptedRandom;
    use serde_json::json;

    #[test]
    fn test_enum_wire_names() {
        assert_eq!(
            serde_json::to_value(ViolationType::OverflowingBin).unwrap(),
            json!("Overflowing Bin")
        );
        assert_eq!(
            serde_json::to_value(ReportStatus::UnderReview).unwrap(),
            json!("Under Review")
        );
        let parsed: ViolationType = serde_json::from_value(json!("Blocked Drain")).unwrap();
        assert_eq!(parsed, ViolationType::BlockedDrain);
        assert_eq!(parsed.as_str(), "Blocked Drain");
    }

    #[test]
    fn test_severity_score_stays_in_range() {
        let random = ScriptedRandom::new(0..40);
        for _ in 0..40 {
            let score = SeverityScore::draw(&random).value();
            assert!((1..=10).contains(&score));
        }
    }

    #[test]
    fn test_read_model_tolerates_sparse_and_unknown_values() {
        let report: Report = serde_json::from_value(json!({
            "_id": "r-1",
            "status": "Escalated",
            "violationType": "Graffiti"
        }))
        .unwrap();

        assert_eq!(report.status.as_deref(), Some("Escalated"));
        assert_eq!(report.violation_type.as_deref(), Some("Graffiti"));
        assert!(report.latitude.is_none());
        assert!(!report.has_status(ReportStatus::Resolved));
    }

    #[test]
    fn test_new_report_wire_shape() {
        let report = NewReport {
            id: "abc".to_string(),
            violation_image: "https://img".to_string(),
            violation_type: ViolationType::GarbagePile,
            waste_classification: WasteClassification::Plastic,
            description: String::new(),
            latitude: 9.9252,
            longitude: 78.1198,
            report_date_time: Utc::now(),
            status: ReportStatus::Submitted,
            severity_score: SeverityScore(4),
        };

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["_id"], "abc");
        assert_eq!(value["violationType"], "Garbage Pile");
        assert_eq!(value["wasteClassification"], "Plastic");
        assert_eq!(value["status"], "Submitted");
        assert_eq!(value["severityScore"], 4);
        assert!(value["reportDateTime"].is_string());
    }
}
