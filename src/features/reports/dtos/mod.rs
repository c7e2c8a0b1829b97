mod draft_dto;
mod report_dto;

pub use draft_dto::{
    CreateDraftDto, DraftResponseDto, LocationReportDto, NextStepDto, SubmitReportResponseDto,
    UpdateDraftDto, UploadImageDto,
};
pub use report_dto::{ReportFeedDto, ReportListQuery, ReportNotFoundDto};
