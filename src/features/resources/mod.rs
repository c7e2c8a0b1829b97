//! Educational resources about waste handling.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/resources` | No | Loaded pages of resources, filtered |
//! | GET | `/api/resources/filters` | No | Category and waste type filter values |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::ResourceService;
