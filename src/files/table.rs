//! File table
//!
//! Owns the file entries and orchestrates the block store and permission
//! evaluator for create, list, read, update and permission changes.

use log::{info, warn};
use std::collections::HashMap;
use std::sync::Arc;

use crate::blocks::BlockStore;
use crate::clock::Clock;
use crate::error::{CreateError, PermError, ReadError, StoreError, UpdateError};
use crate::files::entry::FileEntry;
use crate::files::results::{FileSummary, Metadata, OpenResult};
use crate::permissions::{PermissionAction, PermissionEvaluator, PermissionKind};
use crate::storage::{Backend, validate_file_name};

pub struct FileTable {
    pub(crate) entries: HashMap<String, FileEntry>,
    pub(crate) blocks: BlockStore,
    pub(crate) evaluator: PermissionEvaluator,
    pub(crate) backend: Arc<dyn Backend>,
    pub(crate) clock: Arc<dyn Clock>,
}

impl FileTable {
    /// Opens the table, loading persisted entries and blocks.
    pub fn open(
        backend: Arc<dyn Backend>,
        clock: Arc<dyn Clock>,
        block_size: usize,
        admin: &str,
    ) -> Result<Self, StoreError> {
        let blocks = BlockStore::open(Arc::clone(&backend), Arc::clone(&clock), block_size)?;
        let entries: HashMap<String, FileEntry> = backend
            .load_entries()?
            .into_iter()
            .map(|entry| (entry.name.clone(), entry))
            .collect();

        info!("Loaded {} file entries", entries.len());

        Ok(Self {
            entries,
            blocks,
            evaluator: PermissionEvaluator::new(admin),
            backend,
            clock,
        })
    }

    pub fn evaluator(&self) -> &PermissionEvaluator {
        &self.evaluator
    }

    pub fn blocks(&self) -> &BlockStore {
        &self.blocks
    }

    /// Entry by name, active or trashed
    pub fn get(&self, name: &str) -> Option<&FileEntry> {
        self.entries.get(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Creates a file owned by `owner` with `content` split into a new chain.
    pub fn create(&mut self, name: &str, content: &str, owner: &str) -> Result<(), CreateError> {
        validate_file_name(name).map_err(|_| CreateError::InvalidName(name.to_string()))?;

        if self.entries.contains_key(name) {
            return Err(CreateError::AlreadyExists(name.to_string()));
        }

        let refs = self.blocks.allocate(content)?;
        let Some(head) = refs.first().copied() else {
            return Err(CreateError::InvalidContent);
        };

        let entry = FileEntry::new(name, head, content.chars().count(), owner, self.clock.now());

        if let Err(e) = self.backend.save_entry(&entry) {
            if let Err(free_err) = self.blocks.free(&refs) {
                warn!("Chain of unsaved {} not fully freed: {}", name, free_err);
            }
            return Err(e.into());
        }

        info!(
            "Created {} for {} ({} chars, {} blocks)",
            name,
            owner,
            entry.size_chars,
            refs.len()
        );
        self.entries.insert(name.to_string(), entry);
        Ok(())
    }

    /// Lists entries sorted by name, optionally including trashed ones.
    pub fn list(&self, include_trashed: bool) -> Vec<FileSummary> {
        let mut files: Vec<FileSummary> = self
            .entries
            .values()
            .filter(|entry| include_trashed || entry.is_active())
            .map(FileSummary::from)
            .collect();
        files.sort_by(|a, b| a.name.cmp(&b.name));
        files
    }

    /// Reads an active file's metadata and content.
    pub fn read(&self, name: &str, requesting_user: &str) -> Result<OpenResult, ReadError> {
        let entry = self
            .entries
            .get(name)
            .filter(|entry| entry.is_active())
            .ok_or_else(|| ReadError::NotFound(name.to_string()))?;

        if !self.evaluator.can(requesting_user, entry, PermissionKind::Read) {
            return Err(ReadError::PermissionDenied(name.to_string()));
        }

        let chain = self.blocks.read_chain(entry.head_block_ref);
        if !chain.complete {
            warn!(
                "Short read on {}: {} of {} chars recovered",
                name,
                chain.content.chars().count(),
                entry.size_chars
            );
        }

        Ok(OpenResult {
            metadata: Metadata::from(entry),
            content: chain.content,
            complete: chain.complete,
        })
    }

    /// Replaces an active file's content.
    ///
    /// The new chain is allocated and the entry persisted before the old chain
    /// is freed, so a failure at any step leaves the entry on a whole chain.
    pub fn update(
        &mut self,
        name: &str,
        new_content: &str,
        requesting_user: &str,
    ) -> Result<(), UpdateError> {
        let entry = self
            .entries
            .get(name)
            .filter(|entry| entry.is_active())
            .ok_or_else(|| UpdateError::NotFound(name.to_string()))?;

        if !self.evaluator.can(requesting_user, entry, PermissionKind::Write) {
            return Err(UpdateError::PermissionDenied(name.to_string()));
        }

        if new_content.is_empty() {
            return Err(UpdateError::InvalidContent);
        }

        let old_refs = self.blocks.read_chain(entry.head_block_ref).visited;
        let new_refs = self.blocks.allocate(new_content)?;
        let Some(new_head) = new_refs.first().copied() else {
            return Err(UpdateError::InvalidContent);
        };

        let mut updated = entry.clone();
        updated.head_block_ref = new_head;
        updated.size_chars = new_content.chars().count();
        updated.modified_at = self.clock.now();

        if let Err(e) = self.backend.save_entry(&updated) {
            if let Err(free_err) = self.blocks.free(&new_refs) {
                warn!("New chain of {} not fully freed: {}", name, free_err);
            }
            return Err(e.into());
        }
        self.entries.insert(name.to_string(), updated);

        if let Err(e) = self.blocks.free(&old_refs) {
            warn!("Old chain of {} not fully freed: {}", name, e);
        }

        info!(
            "Updated {} by {} ({} chars, {} blocks)",
            name,
            requesting_user,
            new_content.chars().count(),
            new_refs.len()
        );
        Ok(())
    }

    /// Grants or revokes `kind` for `target_user` on an entry (active or trashed).
    pub fn set_permission(
        &mut self,
        name: &str,
        target_user: &str,
        kind: PermissionKind,
        action: PermissionAction,
        requesting_user: &str,
    ) -> Result<(), PermError> {
        let entry = self
            .entries
            .get(name)
            .ok_or_else(|| PermError::NotFound(name.to_string()))?;

        let mut updated = entry.clone();
        match action {
            PermissionAction::Grant => {
                self.evaluator
                    .grant(&mut updated, target_user, kind, requesting_user)?
            }
            PermissionAction::Revoke => {
                self.evaluator
                    .revoke(&mut updated, target_user, kind, requesting_user)?
            }
        }

        self.backend.save_entry(&updated)?;
        self.entries.insert(name.to_string(), updated);

        info!(
            "{} {:?} '{}' for {} on {}",
            requesting_user, action, kind, target_user, name
        );
        Ok(())
    }
}
