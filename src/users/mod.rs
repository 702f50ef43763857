//! User registry
//!
//! Known usernames and username validation.

pub mod registry;
pub mod validator;

pub use registry::UserRegistry;
pub use validator::normalize_username;
