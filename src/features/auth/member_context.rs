//! Per-request member context: who is signed in, and how to sign in or out.
//!
//! Built from the identity the session middleware attached to the request and
//! handed to handlers explicitly; there is no process-wide member state.

use std::sync::Arc;

use crate::core::config::{AppConfig, AuthConfig};
use crate::features::auth::clients::MemberDirectory;
use crate::features::auth::model::{AuthenticatedUser, Member};

/// Sign-in and sign-out entry points of the member provider
#[derive(Debug, Clone)]
pub struct AuthLinks {
    login_url: String,
    logout_url: String,
    frontend_url: String,
}

impl AuthLinks {
    pub fn new(auth: &AuthConfig, app: &AppConfig) -> Self {
        Self::from_parts(&auth.login_url, &auth.logout_url, &app.frontend_url)
    }

    pub fn from_parts(login_url: &str, logout_url: &str, frontend_url: &str) -> Self {
        Self {
            login_url: login_url.to_string(),
            logout_url: logout_url.to_string(),
            frontend_url: frontend_url.trim_end_matches('/').to_string(),
        }
    }

    /// Provider sign-in URL that returns the member to `return_to`
    pub fn login(&self, return_to: &str) -> String {
        let target = format!("{}{}", self.frontend_url, safe_return_path(return_to));
        format!(
            "{}?returnTo={}",
            self.login_url,
            urlencoding::encode(&target)
        )
    }

    /// Provider sign-out URL that returns to the home page
    pub fn logout(&self) -> String {
        let target = format!("{}/", self.frontend_url);
        format!(
            "{}?returnTo={}",
            self.logout_url,
            urlencoding::encode(&target)
        )
    }
}

/// Only same-site absolute paths are accepted as return targets
fn safe_return_path(path: &str) -> &str {
    if path.starts_with('/') && !path.starts_with("//") && !path.contains('\\') {
        path
    } else {
        "/"
    }
}

pub struct MemberContext {
    user: Option<AuthenticatedUser>,
    current_member: Option<Member>,
    is_loading: bool,
    links: Arc<AuthLinks>,
}

impl MemberContext {
    pub fn new(user: Option<AuthenticatedUser>, links: Arc<AuthLinks>) -> Self {
        // A signed-in member's record is fetched lazily by `resolve`
        let is_loading = user.is_some();
        Self {
            user,
            current_member: None,
            is_loading,
            links,
        }
    }

    /// Fetch the member record for the signed-in user.
    ///
    /// A provider failure leaves the member unset; the identity from the
    /// token still counts as signed in.
    pub async fn resolve(mut self, directory: &dyn MemberDirectory) -> Self {
        if let Some(user) = &self.user {
            match directory.get_member(&user.member_id).await {
                Ok(member) => self.current_member = member,
                Err(e) => tracing::warn!(
                    "Could not load member {} from provider: {}",
                    user.member_id,
                    e
                ),
            }
        }
        self.is_loading = false;
        self
    }

    pub fn user(&self) -> Option<&AuthenticatedUser> {
        self.user.as_ref()
    }

    pub fn current_member(&self) -> Option<&Member> {
        self.current_member.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn login(&self, return_to: &str) -> String {
        self.links.login(return_to)
    }

    pub fn logout(&self) -> String {
        self.links.logout()
    }

    pub fn into_member(self) -> Option<Member> {
        self.current_member
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::auth::clients::InMemoryMemberDirectory;

    fn links() -> Arc<AuthLinks> {
        Arc::new(AuthLinks::from_parts(
            "https://auth.example.com/login",
            "https://auth.example.com/logout",
            "https://clean.example.com/",
        ))
    }

    fn user(id: &str) -> AuthenticatedUser {
        AuthenticatedUser {
            member_id: id.to_string(),
            session_id: None,
        }
    }

    #[test]
    fn test_login_url_encodes_return_target() {
        assert_eq!(
            links().login("/dashboard"),
            "https://auth.example.com/login?returnTo=https%3A%2F%2Fclean.example.com%2Fdashboard"
        );
    }

    #[test]
    fn test_login_rejects_offsite_return_targets() {
        let expected = links().login("/");
        assert_eq!(links().login("//evil.example.com"), expected);
        assert_eq!(links().login("https://evil.example.com"), expected);
    }

    #[test]
    fn test_logout_returns_home() {
        assert_eq!(
            links().logout(),
            "https://auth.example.com/logout?returnTo=https%3A%2F%2Fclean.example.com%2F"
        );
    }

    #[tokio::test]
    async fn test_anonymous_context() {
        let directory = InMemoryMemberDirectory::new();
        let ctx = MemberContext::new(None, links());
        assert!(!ctx.is_loading());

        let ctx = ctx.resolve(&directory).await;
        assert!(!ctx.is_authenticated());
        assert!(ctx.current_member().is_none());
    }

    #[tokio::test]
    async fn test_signed_in_context_loads_member() {
        let directory = InMemoryMemberDirectory::new();
        directory
            .insert(Member {
                id: "m-1".to_string(),
                ..Default::default()
            })
            .await;

        let ctx = MemberContext::new(Some(user("m-1")), links());
        assert!(ctx.is_loading());

        let ctx = ctx.resolve(&directory).await;
        assert!(!ctx.is_loading());
        assert!(ctx.is_authenticated());
        assert_eq!(ctx.current_member().map(|m| m.id.as_str()), Some("m-1"));
    }

    #[tokio::test]
    async fn test_unknown_member_still_authenticated() {
        let directory = InMemoryMemberDirectory::new();

        let ctx = MemberContext::new(Some(user("ghost")), links())
            .resolve(&directory)
            .await;

        assert!(ctx.is_authenticated());
        assert!(ctx.current_member().is_none());
    }
}
