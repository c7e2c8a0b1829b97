use std::sync::Arc;

use crate::features::auth::clients::MemberDirectory;
use crate::features::auth::member_context::{AuthLinks, MemberContext};
use crate::features::auth::model::AuthenticatedUser;

/// Builds the per-request [`MemberContext`]
pub struct SessionService {
    members: Arc<dyn MemberDirectory>,
    links: Arc<AuthLinks>,
}

impl SessionService {
    pub fn new(members: Arc<dyn MemberDirectory>, links: Arc<AuthLinks>) -> Self {
        Self { members, links }
    }

    /// Context for routing decisions, without a member lookup
    pub fn context(&self, user: Option<AuthenticatedUser>) -> MemberContext {
        MemberContext::new(user, Arc::clone(&self.links))
    }

    /// Context with the member record loaded from the provider
    pub async fn resolve(&self, user: Option<AuthenticatedUser>) -> MemberContext {
        self.context(user).resolve(self.members.as_ref()).await
    }

    pub fn links(&self) -> &AuthLinks {
        &self.links
    }
}
