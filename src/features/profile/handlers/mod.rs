pub mod profile_handler;

pub use profile_handler::{__path_get_profile, get_profile};
