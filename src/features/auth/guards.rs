//! Extractors that require a signed-in member.
//!
//! The member session middleware inserts an [`AuthenticatedUser`] into the
//! request extensions when a valid bearer token is present. These guards
//! reject the request when it is missing.

use crate::core::error::AppError;
use crate::features::auth::model::AuthenticatedUser;
use axum::{extract::FromRequestParts, http::request::Parts};

/// Guard for member-only handlers.
///
/// # Example
/// ```ignore
/// pub async fn handler(RequireMember(user): RequireMember) { ... }
/// ```
pub struct RequireMember(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for RequireMember
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .ok_or_else(|| AppError::Unauthorized("Sign in to continue".to_string()))?;

        Ok(RequireMember(user.clone()))
    }
}

/// Optional member identity, never rejects
pub struct MaybeMember(pub Option<AuthenticatedUser>);

impl<S> FromRequestParts<S> for MaybeMember
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(MaybeMember(parts.extensions.get::<AuthenticatedUser>().cloned()))
    }
}
