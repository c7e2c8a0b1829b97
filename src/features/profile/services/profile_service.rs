use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::auth::clients::MemberDirectory;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::profile::dtos::ProfileResponseDto;

/// Service for reading member profiles from the member provider
pub struct ProfileService {
    members: Arc<dyn MemberDirectory>,
}

impl ProfileService {
    pub fn new(members: Arc<dyn MemberDirectory>) -> Self {
        Self { members }
    }

    /// Profile of the signed-in member
    pub async fn get_profile(&self, user: &AuthenticatedUser) -> Result<ProfileResponseDto> {
        let member = self
            .members
            .get_member(&user.member_id)
            .await?
            .ok_or_else(|| {
                tracing::warn!("Member {} has no provider record", user.member_id);
                AppError::NotFound("Profile not found".to_string())
            })?;

        Ok(member.into())
    }
}
