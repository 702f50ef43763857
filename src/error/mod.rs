//! Error handling
//!
//! Defines error types and handling for the FAT store.

pub mod handlers;
pub mod types;

pub use types::*;
