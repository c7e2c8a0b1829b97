// =============================================================================
// BACKEND COLLECTIONS
// =============================================================================

/// Citizen waste-violation reports
pub const REPORTS_COLLECTION: &str = "cleanlinessreports";

/// Educational articles shown on the resources page
pub const RESOURCES_COLLECTION: &str = "educationalresources";

/// Contact form submissions
pub const INQUIRIES_COLLECTION: &str = "inquiries";

// =============================================================================
// LISTING
// =============================================================================

/// Records fetched per "load more" step on the listing pages
pub const FEED_PAGE_SIZE: u32 = 12;

/// Upper bound on pages a single listing request may load
pub const MAX_FEED_PAGES: u32 = 20;

/// Records fetched for dashboard aggregation
pub const DASHBOARD_FETCH_LIMIT: u32 = 50;

/// Reports shown in the dashboard "recent" panel
pub const DASHBOARD_RECENT_COUNT: usize = 6;

// =============================================================================
// SUBMISSION PIPELINE
// =============================================================================

/// Madurai city centre, used when the device cannot report a position
pub const FALLBACK_LATITUDE: f64 = 9.9252;
pub const FALLBACK_LONGITUDE: f64 = 78.1198;

/// Stand-in for the uploaded photo until a media upload integration exists
pub const PLACEHOLDER_IMAGE_URL: &str = "https://static.wixstatic.com/media/c5258a_22860b9b324e4911a57bb1cd1a7ccd07~mv2.png?originWidth=640&originHeight=384";

/// Maximum accepted image size (10MB)
pub const MAX_IMAGE_SIZE: usize = 10 * 1024 * 1024;

pub const MIN_SEVERITY_SCORE: u8 = 1;
pub const MAX_SEVERITY_SCORE: u8 = 10;

pub const MIN_COMMUNITY_RANK: u32 = 1;
pub const MAX_COMMUNITY_RANK: u32 = 100;

/// How often expired report drafts are swept
pub const DRAFT_SWEEP_INTERVAL_SECS: u64 = 60;

// =============================================================================
// NAVIGATION
// =============================================================================

/// Where the client lands after a successful submission
pub const POST_SUBMIT_PATH: &str = "/dashboard";

/// Where the client goes after discarding a draft
pub const CANCEL_DRAFT_PATH: &str = "/";

/// Fallback greeting when the member has no nickname
pub const DEFAULT_GREETING_NAME: &str = "Citizen";
