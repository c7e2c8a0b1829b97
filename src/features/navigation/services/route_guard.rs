use serde::Serialize;
use utoipa::ToSchema;

use crate::features::auth::MemberContext;
use crate::features::navigation::models::{AppRoute, RouteAccess};

/// What the client should do when opening a page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum GuardOutcome {
    Render,
    RedirectToSignIn {
        message: String,
        #[serde(rename = "loginUrl")]
        login_url: String,
    },
    Redirect {
        to: String,
    },
}

/// Decide whether `route` may be shown to the member in `ctx`
pub fn guard(route: &AppRoute, ctx: &MemberContext) -> GuardOutcome {
    if *route == AppRoute::Unknown {
        return GuardOutcome::Redirect {
            to: AppRoute::Home.path(),
        };
    }

    match route.access() {
        RouteAccess::Public => GuardOutcome::Render,
        RouteAccess::MemberOnly { .. } if ctx.is_authenticated() => GuardOutcome::Render,
        RouteAccess::MemberOnly { message } => GuardOutcome::RedirectToSignIn {
            message: message.to_string(),
            login_url: ctx.login(&route.path()),
        },
    }
}
