pub mod session_handler;

pub use session_handler::{
    __path_get_session, __path_login, __path_logout, get_session, login, logout,
};
