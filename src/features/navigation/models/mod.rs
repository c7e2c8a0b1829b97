mod app_route;

pub use app_route::{AppRoute, RouteAccess, DEFAULT_SIGN_IN_MESSAGE};
