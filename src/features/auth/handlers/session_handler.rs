use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::features::auth::dtos::{ReturnToQuery, SessionResponseDto};
use crate::features::auth::guards::MaybeMember;
use crate::features::auth::services::SessionService;
use crate::shared::types::ApiResponse;

/// Current member session
///
/// Works for anonymous callers too; `isAuthenticated` tells them apart.
#[utoipa::path(
    get,
    path = "/api/auth/session",
    params(ReturnToQuery),
    responses(
        (status = 200, description = "Session retrieved", body = ApiResponse<SessionResponseDto>)
    ),
    tag = "auth",
    security(
        (),
        ("bearer_auth" = [])
    )
)]
pub async fn get_session(
    State(service): State<Arc<SessionService>>,
    MaybeMember(user): MaybeMember,
    Query(query): Query<ReturnToQuery>,
) -> Json<ApiResponse<SessionResponseDto>> {
    let ctx = service.resolve(user).await;
    let session = SessionResponseDto::from_context(ctx, query.path());
    Json(ApiResponse::success(Some(session), None, None))
}

/// Redirect to the provider's sign-in page
#[utoipa::path(
    get,
    path = "/api/auth/login",
    params(ReturnToQuery),
    responses(
        (status = 302, description = "Redirect to the sign-in page")
    ),
    tag = "auth"
)]
pub async fn login(
    State(service): State<Arc<SessionService>>,
    Query(query): Query<ReturnToQuery>,
) -> Response {
    found(service.links().login(query.path()))
}

/// Redirect to the provider's sign-out endpoint
#[utoipa::path(
    get,
    path = "/api/auth/logout",
    responses(
        (status = 302, description = "Redirect to the sign-out endpoint")
    ),
    tag = "auth"
)]
pub async fn logout(State(service): State<Arc<SessionService>>) -> Response {
    found(service.links().logout())
}

fn found(location: String) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location)]).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::auth::clients::InMemoryMemberDirectory;
    use crate::features::auth::member_context::AuthLinks;
    use crate::features::auth::model::Member;
    use crate::features::auth::routes;
    use crate::shared::test_helpers::{test_member_id, with_member_auth};
    use axum_test::TestServer;
    use serde_json::Value;

    async fn service() -> Arc<SessionService> {
        let directory = InMemoryMemberDirectory::new();
        let mut member = Member {
            id: test_member_id(),
            ..Default::default()
        };
        member.profile.nickname = Some("ravi".to_string());
        directory.insert(member).await;

        Arc::new(SessionService::new(
            Arc::new(directory),
            Arc::new(AuthLinks::from_parts(
                "https://auth.example.com/login",
                "https://auth.example.com/logout",
                "https://clean.example.com",
            )),
        ))
    }

    #[tokio::test]
    async fn test_anonymous_session() {
        let server = TestServer::new(routes::routes(service().await)).unwrap();

        let response = server.get("/api/auth/session").await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["data"]["isAuthenticated"], false);
        assert_eq!(body["data"]["isLoading"], false);
        assert!(body["data"]["currentMember"].is_null());
    }

    #[tokio::test]
    async fn test_member_session_includes_profile() {
        let app = with_member_auth(routes::routes(service().await));
        let server = TestServer::new(app).unwrap();

        let body: Value = server.get("/api/auth/session").await.json();
        assert_eq!(body["data"]["isAuthenticated"], true);
        assert_eq!(body["data"]["currentMember"]["profile"]["nickname"], "ravi");
    }

    #[tokio::test]
    async fn test_login_redirects_to_provider() {
        let server = TestServer::new(routes::routes(service().await)).unwrap();

        let response = server
            .get("/api/auth/login")
            .add_query_param("returnTo", "/report")
            .await;

        response.assert_status(StatusCode::FOUND);
        assert_eq!(
            response.header("location"),
            "https://auth.example.com/login?returnTo=https%3A%2F%2Fclean.example.com%2Freport"
        );
    }

    #[tokio::test]
    async fn test_logout_redirects_to_provider() {
        let server = TestServer::new(routes::routes(service().await)).unwrap();

        let response = server.get("/api/auth/logout").await;
        response.assert_status(StatusCode::FOUND);
        assert!(response
            .header("location")
            .to_str()
            .unwrap()
            .starts_with("https://auth.example.com/logout"));
    }
}
