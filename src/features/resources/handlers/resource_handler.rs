use std::sync::Arc;

use axum::{extract::State, Json};

use crate::core::error::Result;
use crate::core::extractor::AppQuery;
use crate::features::resources::dtos::{
    ResourceFeedDto, ResourceFilterOptionsDto, ResourceListQuery,
};
use crate::features::resources::services::ResourceService;
use crate::shared::types::ApiResponse;

/// List educational resources
///
/// Loads `pages` pages of 12 resources, then keeps the loaded ones matching
/// `category` and `wasteType`.
#[utoipa::path(
    get,
    path = "/api/resources",
    params(ResourceListQuery),
    responses(
        (status = 200, description = "Loaded resources after filtering", body = ApiResponse<ResourceFeedDto>),
        (status = 502, description = "Backend unavailable")
    ),
    tag = "resources"
)]
pub async fn list_resources(
    State(service): State<Arc<ResourceService>>,
    AppQuery(query): AppQuery<ResourceListQuery>,
) -> Result<Json<ApiResponse<ResourceFeedDto>>> {
    let feed = service.list(&query).await?;
    Ok(Json(ApiResponse::success(Some(feed), None, None)))
}

/// Filter values offered on the resources page
#[utoipa::path(
    get,
    path = "/api/resources/filters",
    responses(
        (status = 200, description = "Filter options", body = ApiResponse<ResourceFilterOptionsDto>)
    ),
    tag = "resources"
)]
pub async fn list_resource_filters() -> Json<ApiResponse<ResourceFilterOptionsDto>> {
    Json(ApiResponse::success(
        Some(ResourceFilterOptionsDto::default()),
        None,
        None,
    ))
}

#[cfg(test)]
mod tests {
    use crate::features::resources::{routes, ResourceService};
    use crate::modules::backend::InMemoryRecordStore;
    use axum_test::TestServer;
    use serde_json::{json, Value};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_filter_options() {
        let service = Arc::new(ResourceService::new(Arc::new(InMemoryRecordStore::new())));
        let server = TestServer::new(routes::routes(service)).unwrap();

        let body: Value = server.get("/api/resources/filters").await.json();
        assert_eq!(body["data"]["categories"], json!(["Guide", "Tips", "Facts"]));
        assert_eq!(
            body["data"]["wasteTypes"],
            json!(["Organic", "Plastic", "Paper", "Metal", "Glass", "E-Waste"])
        );
    }
}
