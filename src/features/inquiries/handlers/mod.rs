pub mod inquiry_handler;

pub use inquiry_handler::{__path_create_inquiry, create_inquiry};
