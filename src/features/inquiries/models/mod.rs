mod inquiry;

pub use inquiry::Inquiry;
