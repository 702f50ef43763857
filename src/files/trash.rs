//! Trash lifecycle
//!
//! Moves entries between the active and trashed states. Only the literal owner
//! may do either; the administrator gets no override here. Blocks are kept.

use log::info;

use crate::error::TrashError;
use crate::files::table::FileTable;

/// Trash state of an entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrashState {
    Active,
    Trashed,
}

impl FileTable {
    pub fn trash_state(&self, name: &str) -> Option<TrashState> {
        self.entries.get(name).map(|entry| {
            if entry.trashed {
                TrashState::Trashed
            } else {
                TrashState::Active
            }
        })
    }

    fn transition(
        &mut self,
        name: &str,
        requesting_user: &str,
        from: TrashState,
    ) -> Result<(), TrashError> {
        if self.trash_state(name) != Some(from) {
            return Err(TrashError::NotFound(name.to_string()));
        }
        let Some(entry) = self.entries.get(name) else {
            return Err(TrashError::NotFound(name.to_string()));
        };
        if entry.owner != requesting_user {
            return Err(TrashError::Forbidden(name.to_string()));
        }

        let now = self.clock.now();
        let mut updated = entry.clone();
        match from {
            TrashState::Active => {
                updated.trashed = true;
                updated.deleted_at = Some(now);
            }
            TrashState::Trashed => {
                updated.trashed = false;
                updated.deleted_at = None;
                updated.modified_at = now;
            }
        }

        self.backend.save_entry(&updated)?;
        self.entries.insert(name.to_string(), updated);
        Ok(())
    }

    /// Moves an active entry to the trash.
    pub fn trash(&mut self, name: &str, requesting_user: &str) -> Result<(), TrashError> {
        self.transition(name, requesting_user, TrashState::Active)?;
        info!("{} moved {} to the trash", requesting_user, name);
        Ok(())
    }

    /// Restores a trashed entry.
    pub fn restore(&mut self, name: &str, requesting_user: &str) -> Result<(), TrashError> {
        self.transition(name, requesting_user, TrashState::Trashed)?;
        info!("{} restored {} from the trash", requesting_user, name);
        Ok(())
    }
}
