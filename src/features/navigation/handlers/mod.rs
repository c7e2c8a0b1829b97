pub mod navigation_handler;

pub use navigation_handler::{__path_resolve_navigation, resolve_navigation};
