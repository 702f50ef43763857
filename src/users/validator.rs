//! Username validation
//!
//! Normalizes usernames and rejects malformed input before it reaches the registry.

use crate::error::UserError;

pub const MAX_USERNAME_LENGTH: usize = 64;

/// Performs basic input sanitation to check for malformed usernames.
fn is_valid_input(input: &str, max_length: usize) -> bool {
    !input.is_empty()
        && input.chars().count() <= max_length
        && !input.contains(|c: char| c.is_whitespace() || c.is_control() || c == '/' || c == '\\')
}

/// Trims and lower-cases a username, validating the result.
pub fn normalize_username(username: &str) -> Result<String, UserError> {
    let normalized = username.trim().to_lowercase();
    if !is_valid_input(&normalized, MAX_USERNAME_LENGTH) {
        return Err(UserError::MalformedInput(format!(
            "Invalid username: {:?}",
            username
        )));
    }
    Ok(normalized)
}
