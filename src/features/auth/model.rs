use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Identity carried by a validated access token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AuthenticatedUser {
    /// Member id at the auth provider (`sub` claim)
    pub member_id: String,
    /// Provider session id, absent for machine tokens
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

/// Member record from the member/auth provider
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub login_email: Option<String>,
    #[serde(default)]
    pub login_email_verified: bool,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub last_login_date: Option<DateTime<Utc>>,
    #[serde(rename = "_createdDate", default)]
    pub created_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub profile: MemberProfile,
    #[serde(default)]
    pub contact: MemberContact,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MemberProfile {
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub photo: Option<MemberPhoto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MemberPhoto {
    pub url: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MemberContact {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub phones: Vec<String>,
}

impl Member {
    /// Non-empty nickname, if the member set one
    pub fn nickname(&self) -> Option<&str> {
        self.profile
            .nickname
            .as_deref()
            .filter(|n| !n.trim().is_empty())
    }

    /// Name shown on the profile page: nickname, then first name
    pub fn display_name(&self) -> Option<&str> {
        self.nickname().or_else(|| {
            self.contact
                .first_name
                .as_deref()
                .filter(|n| !n.trim().is_empty())
        })
    }
}
