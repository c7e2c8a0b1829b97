use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::features::auth::member_context::MemberContext;
use crate::features::auth::model::Member;

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ReturnToQuery {
    /// Frontend path to come back to after signing in
    pub return_to: Option<String>,
}

impl ReturnToQuery {
    pub fn path(&self) -> &str {
        self.return_to.as_deref().unwrap_or("/")
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponseDto {
    pub is_authenticated: bool,
    pub is_loading: bool,
    pub current_member: Option<Member>,
    pub login_url: String,
    pub logout_url: String,
}

impl SessionResponseDto {
    pub fn from_context(ctx: MemberContext, return_to: &str) -> Self {
        let login_url = ctx.login(return_to);
        let logout_url = ctx.logout();
        let is_authenticated = ctx.is_authenticated();
        let is_loading = ctx.is_loading();

        Self {
            is_authenticated,
            is_loading,
            current_member: ctx.into_member(),
            login_url,
            logout_url,
        }
    }
}
