use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::features::resources::models::{
    EducationalResource, ResourceCategory, ResourceWasteType,
};

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ResourceListQuery {
    /// Number of pages of 12 to load (default 1)
    pub pages: Option<u32>,
    /// Exact category to keep, `all` for any
    pub category: Option<String>,
    /// Exact waste type to keep, `all` for any
    pub waste_type: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResourceFeedDto {
    pub items: Vec<EducationalResource>,
    pub has_next: bool,
    pub next_skip: u32,
    pub loaded_count: usize,
    pub loaded_pages: u32,
}

/// Values the resources page offers in its filters
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResourceFilterOptionsDto {
    pub categories: Vec<ResourceCategory>,
    pub waste_types: Vec<ResourceWasteType>,
}

impl Default for ResourceFilterOptionsDto {
    fn default() -> Self {
        Self {
            categories: ResourceCategory::ALL.to_vec(),
            waste_types: ResourceWasteType::ALL.to_vec(),
        }
    }
}
