//! The log-in, registration and log-out routes, and the session cookie.

mod cookie;
mod log_in;
mod log_out;
mod password;
mod register;

pub(crate) use cookie::DEFAULT_COOKIE_DURATION;
pub use log_in::{get_log_in_page, post_log_in};
pub use log_out::get_log_out;
pub use password::{PasswordPair, password_confirmation_endpoint, password_fields};
pub use register::{get_register_page, register_user};
