//! Member sessions: bearer token validation, the per-request member context
//! and the sign-in/sign-out redirects of the member provider.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/auth/session` | Optional | Current member context |
//! | GET | `/api/auth/login` | No | Redirect to the provider sign-in page |
//! | GET | `/api/auth/logout` | No | Redirect to the provider sign-out endpoint |

mod jwks;
mod validator;

pub mod clients;
pub mod dtos;
pub mod guards;
pub mod handlers;
pub mod member_context;
pub mod model;
pub mod routes;
pub mod services;

pub use jwks::JwksClient;
pub use member_context::{AuthLinks, MemberContext};
pub use services::SessionService;
pub use validator::JwtValidator;
