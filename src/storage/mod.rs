//! Record storage
//!
//! Persistence backends, record file helpers and name validation.

pub mod backend;
pub mod filesystem;
pub mod validation;

pub use backend::{Backend, JsonDirBackend, VolatileBackend};
pub use validation::validate_file_name;
