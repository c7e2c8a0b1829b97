use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Educational article from the `educationalresources` collection
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EducationalResource {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_createdDate", default, skip_serializing_if = "Option::is_none")]
    pub created_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub waste_type: Option<String>,
    #[serde(default)]
    pub main_image: Option<String>,
    #[serde(default)]
    pub external_link: Option<String>,
}

/// Categories offered by the resources page filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub enum ResourceCategory {
    Guide,
    Tips,
    Facts,
}

impl ResourceCategory {
    pub const ALL: [ResourceCategory; 3] = [
        ResourceCategory::Guide,
        ResourceCategory::Tips,
        ResourceCategory::Facts,
    ];
}

/// Waste types offered by the resources page filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub enum ResourceWasteType {
    Organic,
    Plastic,
    Paper,
    Metal,
    Glass,
    #[serde(rename = "E-Waste")]
    EWaste,
}

impl ResourceWasteType {
    pub const ALL: [ResourceWasteType; 6] = [
        ResourceWasteType::Organic,
        ResourceWasteType::Plastic,
        ResourceWasteType::Paper,
        ResourceWasteType::Metal,
        ResourceWasteType::Glass,
        ResourceWasteType::EWaste,
    ];
}
