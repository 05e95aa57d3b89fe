//! Authentication utilities

mod password;
mod secret;

pub use password::PasswordService;
pub use secret::SharedSecret;
