//! Modules layer - Infrastructure components for external integrations
//!
//! Contains clients and adapters for the managed backend that owns all
//! persistence for this service.

pub mod backend;
