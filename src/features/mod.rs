pub mod auth;
pub mod dashboard;
pub mod inquiries;
pub mod navigation;
pub mod profile;
pub mod reports;
pub mod resources;
