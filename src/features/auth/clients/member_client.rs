use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::core::config::BackendConfig;
use crate::core::error::{AppError, Result};
use crate::features::auth::model::Member;

/// Read access to member records held by the member/auth provider
#[async_trait]
pub trait MemberDirectory: Send + Sync {
    /// Fetch a member by id, `None` when the provider does not know it
    async fn get_member(&self, member_id: &str) -> Result<Option<Member>>;
}

/// Client for the provider's member API
pub struct HttpMemberDirectory {
    base_url: String,
    api_key: String,
    http_client: reqwest::Client,
}

impl HttpMemberDirectory {
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            http_client,
        })
    }
}

#[async_trait]
impl MemberDirectory for HttpMemberDirectory {
    async fn get_member(&self, member_id: &str) -> Result<Option<Member>> {
        let url = format!(
            "{}/members/{}",
            self.base_url,
            urlencoding::encode(member_id)
        );

        tracing::debug!("Fetching member from provider: {}", url);

        let response = self
            .http_client
            .get(&url)
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch member: {}", e);
                AppError::ExternalServiceError(format!("Failed to fetch member: {}", e))
            })?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Member API error: HTTP {} - {}", status, body);
            return Err(AppError::ExternalServiceError(format!(
                "Member API error: HTTP {}",
                status
            )));
        }

        let member = response.json::<Member>().await.map_err(|e| {
            tracing::error!("Failed to parse member response: {}", e);
            AppError::ExternalServiceError(format!("Failed to parse member response: {}", e))
        })?;

        Ok(Some(member))
    }
}

/// Member directory held in memory, for local runs without a provider
#[derive(Default)]
pub struct InMemoryMemberDirectory {
    members: RwLock<HashMap<String, Member>>,
}

impl InMemoryMemberDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub async fn insert(&self, member: Member) {
        self.members.write().await.insert(member.id.clone(), member);
    }
}

#[async_trait]
impl MemberDirectory for InMemoryMemberDirectory {
    async fn get_member(&self, member_id: &str) -> Result<Option<Member>> {
        Ok(self.members.read().await.get(member_id).cloned())
    }
}
