//! Citizen waste-violation reports.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/reports` | No | Loaded pages of community reports, filtered |
//! | GET | `/api/reports/{id}` | No | Report detail |
//! | POST | `/api/report-drafts` | Member | Open a submission draft |
//! | GET/PATCH/DELETE | `/api/report-drafts/{id}` | Member | Read, edit or cancel a draft |
//! | POST | `/api/report-drafts/{id}/location` | Member | Retry geolocation |
//! | POST/GET/DELETE | `/api/report-drafts/{id}/image` | Member | Attach, preview or remove the photo |
//! | POST | `/api/report-drafts/{id}/submit` | Member | Submit the draft as a report |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::{DraftService, ReportService, SimulatedClassifier};
