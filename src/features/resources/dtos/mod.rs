mod resource_dto;

pub use resource_dto::{ResourceFeedDto, ResourceFilterOptionsDto, ResourceListQuery};
