//! HTML page handlers.

mod auth;
mod home;
mod redirect;
mod urls;

pub use auth::{
    login_form_handler, login_handler, logout_handler, logout_page_handler,
    register_form_handler, register_handler,
};
pub use home::home_handler;
pub use redirect::redirect_handler;
pub use urls::{
    create_url_handler, delete_url_handler, show_url_handler, update_url_handler,
    urls_index_handler, urls_new_handler,
};
