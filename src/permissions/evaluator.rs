//! Permission evaluator
//!
//! Read/write authorization for file entries and owner-gated permission edits.

use crate::error::PermError;
use crate::files::FileEntry;
use crate::permissions::kinds::PermissionKind;

/// Decides what a user may do with a file entry.
#[derive(Debug, Clone)]
pub struct PermissionEvaluator {
    admin: String,
}

impl PermissionEvaluator {
    pub fn new(admin: &str) -> Self {
        Self {
            admin: admin.to_lowercase(),
        }
    }

    pub fn admin(&self) -> &str {
        &self.admin
    }

    pub fn is_admin(&self, user: &str) -> bool {
        user == self.admin
    }

    /// Administrator first, then owner, then explicit membership.
    pub fn can(&self, user: &str, entry: &FileEntry, kind: PermissionKind) -> bool {
        if self.is_admin(user) {
            return true;
        }
        if user == entry.owner {
            return true;
        }
        entry.permissions.set(kind).contains(user)
    }

    /// Requester must be owner or administrator; target must not be the owner.
    pub fn authorize_change(
        &self,
        entry: &FileEntry,
        target_user: &str,
        requesting_user: &str,
    ) -> Result<(), PermError> {
        if requesting_user != entry.owner && !self.is_admin(requesting_user) {
            return Err(PermError::Forbidden(entry.name.clone()));
        }
        if target_user == entry.owner {
            return Err(PermError::InvalidTarget(target_user.to_string()));
        }
        Ok(())
    }

    /// Adds `target_user` to the entry's `kind` set. The caller persists the entry.
    pub fn grant(
        &self,
        entry: &mut FileEntry,
        target_user: &str,
        kind: PermissionKind,
        requesting_user: &str,
    ) -> Result<(), PermError> {
        self.authorize_change(entry, target_user, requesting_user)?;

        if !entry.permissions.set_mut(kind).insert(target_user.to_string()) {
            return Err(PermError::AlreadyGranted {
                user: target_user.to_string(),
                kind: kind.to_string(),
            });
        }
        Ok(())
    }

    /// Removes `target_user` from the entry's `kind` set. The caller persists the entry.
    pub fn revoke(
        &self,
        entry: &mut FileEntry,
        target_user: &str,
        kind: PermissionKind,
        requesting_user: &str,
    ) -> Result<(), PermError> {
        self.authorize_change(entry, target_user, requesting_user)?;

        if !entry.permissions.set_mut(kind).remove(target_user) {
            return Err(PermError::NotGranted {
                user: target_user.to_string(),
                kind: kind.to_string(),
            });
        }
        Ok(())
    }
}
