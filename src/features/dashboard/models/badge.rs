use serde::Serialize;
use utoipa::ToSchema;

const POINTS_PER_REPORT: u32 = 10;
const POINTS_PER_RESOLVED: u32 = 5;

/// Achievements shown on the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub enum BadgeKind {
    #[serde(rename = "First Report")]
    FirstReport,
    #[serde(rename = "Active Citizen")]
    ActiveCitizen,
    #[serde(rename = "Top Contributor")]
    TopContributor,
    #[serde(rename = "Clean Champion")]
    CleanChampion,
}

impl BadgeKind {
    pub const ALL: [BadgeKind; 4] = [
        BadgeKind::FirstReport,
        BadgeKind::ActiveCitizen,
        BadgeKind::TopContributor,
        BadgeKind::CleanChampion,
    ];

    pub fn description(&self) -> &'static str {
        match self {
            BadgeKind::FirstReport => "Submitted your first report",
            BadgeKind::ActiveCitizen => "Submitted 5 reports",
            BadgeKind::TopContributor => "Submitted 10 reports",
            BadgeKind::CleanChampion => "5 reports resolved",
        }
    }

    pub fn is_earned(&self, stats: &DashboardStats) -> bool {
        match self {
            BadgeKind::FirstReport => stats.total_reports >= 1,
            BadgeKind::ActiveCitizen => stats.total_reports >= 5,
            BadgeKind::TopContributor => stats.total_reports >= 10,
            BadgeKind::CleanChampion => stats.resolved_reports >= 5,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Badge {
    pub name: BadgeKind,
    pub description: String,
    pub earned: bool,
}

/// Counters derived from the fetched reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_reports: u32,
    pub resolved_reports: u32,
    pub points: u32,
    pub rank: u32,
}

impl DashboardStats {
    pub fn new(total_reports: u32, resolved_reports: u32, rank: u32) -> Self {
        Self {
            total_reports,
            resolved_reports,
            points: total_reports * POINTS_PER_REPORT + resolved_reports * POINTS_PER_RESOLVED,
            rank,
        }
    }

    /// Every badge, earned or not, in display order
    pub fn badges(&self) -> Vec<Badge> {
        BadgeKind::ALL
            .iter()
            .map(|kind| Badge {
                name: *kind,
                description: kind.description().to_string(),
                earned: kind.is_earned(self),
            })
            .collect()
    }
}
