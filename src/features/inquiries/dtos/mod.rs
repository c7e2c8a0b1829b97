mod inquiry_dto;

pub use inquiry_dto::{CreateInquiryDto, InquiryResponseDto};
