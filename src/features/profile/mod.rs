//! Member profile, read from the member provider.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/profile` | Member | Profile of the signed-in member |

pub mod dtos;
pub mod handlers;
pub mod routes;
pub mod services;

pub use services::ProfileService;
