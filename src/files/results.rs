//! File table result types
//!
//! Defines result structures returned by file table operations.

use chrono::{DateTime, Utc};
use std::fmt;

use crate::clock::format_timestamp;
use crate::files::entry::FileEntry;
use crate::permissions::PermissionKind;

/// Metadata returned when opening a file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    pub name: String,
    pub owner: String,
    pub size_chars: usize,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
    pub read: Vec<String>,
    pub write: Vec<String>,
}

impl From<&FileEntry> for Metadata {
    fn from(entry: &FileEntry) -> Self {
        Self {
            name: entry.name.clone(),
            owner: entry.owner.clone(),
            size_chars: entry.size_chars,
            created_at: entry.created_at,
            modified_at: entry.modified_at,
            read: entry.permissions.sorted(PermissionKind::Read),
            write: entry.permissions.sorted(PermissionKind::Write),
        }
    }
}

impl fmt::Display for Metadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Name: {}", self.name)?;
        writeln!(f, "Owner: {}", self.owner)?;
        writeln!(f, "Size (chars): {}", self.size_chars)?;
        writeln!(f, "Created: {}", format_timestamp(&self.created_at))?;
        writeln!(f, "Modified: {}", format_timestamp(&self.modified_at))?;
        writeln!(f, "Read: {}", self.read.join(", "))?;
        write!(f, "Write: {}", self.write.join(", "))
    }
}

/// Result of opening a file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenResult {
    pub metadata: Metadata,
    pub content: String,
    /// False when the block chain ended before its last block
    pub complete: bool,
}

/// One row of a file listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSummary {
    pub name: String,
    pub owner: String,
    pub size_chars: usize,
    pub trashed: bool,
    pub modified_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl From<&FileEntry> for FileSummary {
    fn from(entry: &FileEntry) -> Self {
        Self {
            name: entry.name.clone(),
            owner: entry.owner.clone(),
            size_chars: entry.size_chars,
            trashed: entry.trashed,
            modified_at: entry.modified_at,
            deleted_at: entry.deleted_at,
        }
    }
}

impl fmt::Display for FileSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}) - {} chars", self.name, self.owner, self.size_chars)?;
        if self.trashed {
            write!(f, " [TRASH]")?;
        }
        Ok(())
    }
}
