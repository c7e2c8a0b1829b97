pub mod resource_handler;

pub use resource_handler::{
    __path_list_resource_filters, __path_list_resources, list_resource_filters, list_resources,
};
