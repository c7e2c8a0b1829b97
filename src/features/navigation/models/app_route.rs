/// Sign-in prompt for member-only pages that do not set their own
pub const DEFAULT_SIGN_IN_MESSAGE: &str = "Sign in to continue";

/// Pages of the citizen web app
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppRoute {
    Home,
    Report,
    Reports,
    ReportDetail(String),
    Dashboard,
    Resources,
    About,
    Contact,
    Profile,
    Unknown,
}

/// Who may open a page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteAccess {
    Public,
    MemberOnly { message: &'static str },
}

impl AppRoute {
    /// Map a frontend path to its page. Query strings and a trailing slash
    /// are ignored.
    pub fn resolve(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let path = path.trim_end_matches('/');

        match path {
            "" => AppRoute::Home,
            "/report" => AppRoute::Report,
            "/reports" => AppRoute::Reports,
            "/dashboard" => AppRoute::Dashboard,
            "/resources" => AppRoute::Resources,
            "/about" => AppRoute::About,
            "/contact" => AppRoute::Contact,
            "/profile" => AppRoute::Profile,
            other => match other.strip_prefix("/reports/") {
                Some(id) if !id.is_empty() && !id.contains('/') => {
                    AppRoute::ReportDetail(id.to_string())
                }
                _ => AppRoute::Unknown,
            },
        }
    }

    pub fn access(&self) -> RouteAccess {
        match self {
            AppRoute::Report => RouteAccess::MemberOnly {
                message: "Sign in to report cleanliness issues",
            },
            AppRoute::Dashboard => RouteAccess::MemberOnly {
                message: "Sign in to access your dashboard",
            },
            AppRoute::Profile => RouteAccess::MemberOnly {
                message: DEFAULT_SIGN_IN_MESSAGE,
            },
            _ => RouteAccess::Public,
        }
    }

    /// Canonical path of the page
    pub fn path(&self) -> String {
        match self {
            AppRoute::Home | AppRoute::Unknown => "/".to_string(),
            AppRoute::Report => "/report".to_string(),
            AppRoute::Reports => "/reports".to_string(),
            AppRoute::ReportDetail(id) => format!("/reports/{}", id),
            AppRoute::Dashboard => "/dashboard".to_string(),
            AppRoute::Resources => "/resources".to_string(),
            AppRoute::About => "/about".to_string(),
            AppRoute::Contact => "/contact".to_string(),
            AppRoute::Profile => "/profile".to_string(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            AppRoute::Home => "home",
            AppRoute::Report => "report",
            AppRoute::Reports => "reports",
            AppRoute::ReportDetail(_) => "reportDetail",
            AppRoute::Dashboard => "dashboard",
            AppRoute::Resources => "resources",
            AppRoute::About => "about",
            AppRoute::Contact => "contact",
            AppRoute::Profile => "profile",
            AppRoute::Unknown => "unknown",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_known_pages() {
        assert_eq!(AppRoute::resolve("/"), AppRoute::Home);
        assert_eq!(AppRoute::resolve(""), AppRoute::Home);
        assert_eq!(AppRoute::resolve("/report"), AppRoute::Report);
        assert_eq!(AppRoute::resolve("/reports/"), AppRoute::Reports);
        assert_eq!(AppRoute::resolve("/dashboard?tab=badges"), AppRoute::Dashboard);
        assert_eq!(AppRoute::resolve("/profile"), AppRoute::Profile);
        assert_eq!(
            AppRoute::resolve("/reports/abc-123"),
            AppRoute::ReportDetail("abc-123".to_string())
        );
    }

    #[test]
    fn test_resolve_unknown_pages() {
        assert_eq!(AppRoute::resolve("/admin"), AppRoute::Unknown);
        assert_eq!(AppRoute::resolve("/reports/a/b"), AppRoute::Unknown);
        assert_eq!(AppRoute::resolve("/Report"), AppRoute::Unknown);
    }

    #[test]
    fn test_member_only_pages_and_messages() {
        assert_eq!(
            AppRoute::Report.access(),
            RouteAccess::MemberOnly {
                message: "Sign in to report cleanliness issues"
            }
        );
        assert_eq!(
            AppRoute::Dashboard.access(),
            RouteAccess::MemberOnly {
                message: "Sign in to access your dashboard"
            }
        );
        assert_eq!(
            AppRoute::Profile.access(),
            RouteAccess::MemberOnly {
                message: DEFAULT_SIGN_IN_MESSAGE
            }
        );
        for route in [
            AppRoute::Home,
            AppRoute::Reports,
            AppRoute::ReportDetail("x".to_string()),
            AppRoute::Resources,
            AppRoute::About,
            AppRoute::Contact,
        ] {
            assert_eq!(route.access(), RouteAccess::Public);
        }
    }
}
