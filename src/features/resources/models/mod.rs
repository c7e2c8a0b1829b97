mod resource;

pub use resource::{EducationalResource, ResourceCategory, ResourceWasteType};
