//! File table entries
//!
//! Metadata for one file: owner, permissions, timestamps, trash state and the
//! head of its block chain.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::blocks::BlockRef;
use crate::permissions::Permissions;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    pub name: String,
    pub head_block_ref: BlockRef,
    pub trashed: bool,
    pub size_chars: usize,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub owner: String,
    pub permissions: Permissions,
}

impl FileEntry {
    /// A new active entry readable and writable by its owner only.
    pub fn new(
        name: &str,
        head_block_ref: BlockRef,
        size_chars: usize,
        owner: &str,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            name: name.to_string(),
            head_block_ref,
            trashed: false,
            size_chars,
            created_at: now,
            modified_at: now,
            deleted_at: None,
            owner: owner.to_string(),
            permissions: Permissions::owner_only(owner),
        }
    }

    pub fn is_active(&self) -> bool {
        !self.trashed
    }
}
