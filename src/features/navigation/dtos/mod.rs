mod navigation_dto;

pub use navigation_dto::{NavigationQuery, NavigationResponseDto};
