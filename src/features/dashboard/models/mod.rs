mod badge;

pub use badge::{Badge, BadgeKind, DashboardStats};
