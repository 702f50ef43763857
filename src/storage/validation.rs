//! Name validation
//!
//! File names double as record file stems, so they are checked before use.

use crate::storage::filesystem::TEMP_EXTENSION;

/// Longest file name component most file systems accept, in bytes
const MAX_COMPONENT_BYTES: usize = 255;

/// Longest accepted name in bytes, leaving room for `.json.tmp`
pub const MAX_NAME_BYTES: usize = MAX_COMPONENT_BYTES - 1 - TEMP_EXTENSION.len();

/// Validate that a file name is usable as a record key
pub fn validate_file_name(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("empty file name".into());
    }
    if name == "." || name == ".." {
        return Err(format!("reserved file name: {}", name));
    }
    if name.len() > MAX_NAME_BYTES {
        return Err(format!("file name longer than {} bytes", MAX_NAME_BYTES));
    }
    if name.contains(['/', '\\', '\0', '\r', '\n']) {
        return Err(format!("file name contains a forbidden character: {:?}", name));
    }
    Ok(())
}
