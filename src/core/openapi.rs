use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::auth;
use crate::features::dashboard::{
    dtos as dashboard_dtos, handlers as dashboard_handlers, models as dashboard_models,
};
use crate::features::inquiries::{dtos as inquiries_dtos, handlers as inquiries_handlers};
use crate::features::navigation::{
    dtos as navigation_dtos, handlers as navigation_handlers, services as navigation_services,
};
use crate::features::profile::{dtos as profile_dtos, handlers as profile_handlers};
use crate::features::reports::{
    dtos as reports_dtos, handlers as reports_handlers, models as reports_models,
};
use crate::features::resources::{
    dtos as resources_dtos, handlers as resources_handlers, models as resources_models,
};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth
        auth::handlers::get_session,
        auth::handlers::login,
        auth::handlers::logout,
        // Navigation
        navigation_handlers::resolve_navigation,
        // Reports (public)
        reports_handlers::list_reports,
        reports_handlers::get_report,
        // Report drafts (member)
        reports_handlers::create_draft,
        reports_handlers::get_draft,
        reports_handlers::update_draft,
        reports_handlers::locate_draft,
        reports_handlers::upload_image,
        reports_handlers::get_image,
        reports_handlers::remove_image,
        reports_handlers::submit_draft,
        reports_handlers::cancel_draft,
        // Resources (public)
        resources_handlers::list_resources,
        resources_handlers::list_resource_filters,
        // Dashboard (member)
        dashboard_handlers::get_dashboard,
        // Inquiries (public)
        inquiries_handlers::create_inquiry,
        // Profile (member)
        profile_handlers::get_profile,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Auth
            auth::model::AuthenticatedUser,
            auth::model::Member,
            auth::model::MemberProfile,
            auth::model::MemberPhoto,
            auth::model::MemberContact,
            auth::dtos::SessionResponseDto,
            ApiResponse<auth::dtos::SessionResponseDto>,
            // Navigation
            navigation_services::GuardOutcome,
            navigation_dtos::NavigationResponseDto,
            ApiResponse<navigation_dtos::NavigationResponseDto>,
            // Reports
            reports_models::ViolationType,
            reports_models::WasteClassification,
            reports_models::ReportStatus,
            reports_models::Coordinates,
            reports_models::LocationStatus,
            reports_models::Report,
            reports_dtos::ReportFeedDto,
            reports_dtos::ReportNotFoundDto,
            ApiResponse<reports_dtos::ReportFeedDto>,
            ApiResponse<reports_models::Report>,
            ApiResponse<reports_dtos::ReportNotFoundDto>,
            // Report drafts
            reports_dtos::LocationReportDto,
            reports_dtos::CreateDraftDto,
            reports_dtos::UpdateDraftDto,
            reports_dtos::UploadImageDto,
            reports_dtos::DraftResponseDto,
            reports_dtos::NextStepDto,
            reports_dtos::SubmitReportResponseDto,
            ApiResponse<reports_dtos::DraftResponseDto>,
            ApiResponse<reports_dtos::SubmitReportResponseDto>,
            ApiResponse<reports_dtos::NextStepDto>,
            // Resources
            resources_models::EducationalResource,
            resources_models::ResourceCategory,
            resources_models::ResourceWasteType,
            resources_dtos::ResourceFeedDto,
            resources_dtos::ResourceFilterOptionsDto,
            ApiResponse<resources_dtos::ResourceFeedDto>,
            ApiResponse<resources_dtos::ResourceFilterOptionsDto>,
            // Dashboard
            dashboard_models::BadgeKind,
            dashboard_models::Badge,
            dashboard_models::DashboardStats,
            dashboard_dtos::DashboardDto,
            ApiResponse<dashboard_dtos::DashboardDto>,
            // Inquiries
            inquiries_dtos::CreateInquiryDto,
            inquiries_dtos::InquiryResponseDto,
            ApiResponse<inquiries_dtos::InquiryResponseDto>,
            // Profile
            profile_dtos::ProfileResponseDto,
            ApiResponse<profile_dtos::ProfileResponseDto>,
        )
    ),
    tags(
        (name = "auth", description = "Member session and sign-in redirects"),
        (name = "navigation", description = "Page access rules of the web app"),
        (name = "reports", description = "Community cleanliness reports"),
        (name = "report-drafts", description = "Report submission drafts (member)"),
        (name = "resources", description = "Educational resources (public)"),
        (name = "dashboard", description = "Member dashboard"),
        (name = "inquiries", description = "Contact form (public)"),
        (name = "profile", description = "Member profile"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Clean Madurai API",
        version = "0.1.0",
        description = "API documentation for Clean Madurai",
    )
)]
pub struct ApiDoc;

/// Adds Bearer JWT security scheme to OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
