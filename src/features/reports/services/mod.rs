mod classifier;
mod draft_service;
mod geolocation;
mod report_service;

pub use classifier::{SimulatedClassifier, WasteClassifier};
pub use draft_service::DraftService;
pub use geolocation::{acquire_location, GeolocationError, Geolocator, ReportedPosition};
pub use report_service::{ReportFilter, ReportService};
