mod classification;
mod draft;
mod location;
mod report;

pub use classification::{Classification, CLASSIFICATIONS};
pub use draft::{DraftImage, SubmissionDraft};
pub use location::{Coordinates, LocationFix, LocationStatus};
pub use report::{
    NewReport, Report, ReportStatus, SeverityScore, ViolationType, WasteClassification,
};
