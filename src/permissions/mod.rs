//! File permissions
//!
//! Handles permission sets and authorization decisions.

pub mod evaluator;
pub mod kinds;

pub use evaluator::PermissionEvaluator;
pub use kinds::{PermissionAction, PermissionKind, Permissions};
