//! Page routing rules of the citizen web app.
//!
//! Resolves frontend paths, decides between rendering a page, asking the
//! visitor to sign in, or sending them home, and applies the same decision
//! to member-only API endpoints.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/navigation?path=` | Optional | Guard decision for a page |

pub mod dtos;
pub mod gate;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use gate::{member_route_gate, RouteGate};
pub use models::AppRoute;
