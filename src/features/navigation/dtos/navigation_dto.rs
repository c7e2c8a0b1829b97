use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::features::navigation::services::GuardOutcome;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NavigationQuery {
    /// Frontend path the client is about to open
    pub path: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NavigationResponseDto {
    /// Page name, `unknown` for paths outside the route table
    pub route: String,
    pub member_only: bool,
    pub outcome: GuardOutcome,
}
