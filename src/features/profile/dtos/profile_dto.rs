use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::auth::model::Member;

const DEFAULT_DISPLAY_NAME: &str = "User";
const DEFAULT_MEMBER_STATUS: &str = "Active";

/// Member profile as shown on the profile page
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponseDto {
    pub id: String,
    /// Nickname, then first name, then "User"
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub login_email: Option<String>,
    pub login_email_verified: bool,
    pub phones: Vec<String>,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_login_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member_since: Option<DateTime<Utc>>,
}

impl From<Member> for ProfileResponseDto {
    fn from(member: Member) -> Self {
        let display_name = member
            .display_name()
            .unwrap_or(DEFAULT_DISPLAY_NAME)
            .to_string();
        let nickname = member.nickname().map(str::to_string);
        let status = member
            .status
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_MEMBER_STATUS.to_string());

        Self {
            id: member.id,
            display_name,
            nickname,
            title: member.profile.title,
            photo_url: member.profile.photo.map(|p| p.url),
            login_email: member.login_email,
            login_email_verified: member.login_email_verified,
            phones: member.contact.phones,
            status,
            last_login_date: member.last_login_date,
            member_since: member.created_date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sparse_member_uses_defaults() {
        let member: Member = serde_json::from_value(json!({"_id": "m-1"})).unwrap();
        let dto = ProfileResponseDto::from(member);

        assert_eq!(dto.display_name, "User");
        assert_eq!(dto.status, "Active");
        assert!(dto.photo_url.is_none());

        let value = serde_json::to_value(&dto).unwrap();
        assert!(value.get("loginEmail").is_none());
        assert_eq!(value["phones"], json!([]));
    }

    #[test]
    fn test_full_member() {
        let member: Member = serde_json::from_value(json!({
            "_id": "m-2",
            "loginEmail": "ravi@example.com",
            "loginEmailVerified": true,
            "status": "Blocked",
            "_createdDate": "2024-01-05T10:00:00Z",
            "profile": {"nickname": "ravi", "title": "Ward volunteer", "photo": {"url": "https://img/r.png"}},
            "contact": {"firstName": "Ravi", "phones": ["+91 98765 43210"]}
        }))
        .unwrap();

        let dto = ProfileResponseDto::from(member);
        assert_eq!(dto.display_name, "ravi");
        assert_eq!(dto.status, "Blocked");
        assert_eq!(dto.photo_url.as_deref(), Some("https://img/r.png"));
        assert_eq!(dto.phones.len(), 1);
        assert!(dto.member_since.is_some());
    }
}
