pub mod draft_handler;
pub mod report_handler;

pub use draft_handler::{
    __path_cancel_draft, __path_create_draft, __path_get_draft, __path_get_image,
    __path_locate_draft, __path_remove_image, __path_submit_draft, __path_update_draft,
    __path_upload_image, cancel_draft, create_draft, get_draft, get_image, locate_draft,
    remove_image, submit_draft, update_draft, upload_image,
};
pub use report_handler::{__path_get_report, __path_list_reports, get_report, list_reports};
