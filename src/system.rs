//! FAT store façade
//!
//! The operations offered to callers: create, list, open, modify, trash,
//! restore, permission changes and user registration. Every file operation
//! takes the requesting user explicitly.

use log::info;
use std::sync::Arc;

use crate::clock::{Clock, SystemClock};
use crate::config::StoreConfig;
use crate::error::{
    CreateError, FatError, PermError, ReadError, StoreError, TrashError, UpdateError, UserError,
};
use crate::files::{FileSummary, FileTable, OpenResult};
use crate::permissions::{PermissionAction, PermissionKind};
use crate::storage::{Backend, JsonDirBackend, VolatileBackend};
use crate::users::{UserRegistry, normalize_username};

pub struct FatSystem {
    table: FileTable,
    users: UserRegistry,
}

/// Usernames are compared lower-cased and trimmed everywhere.
fn user_key(user: &str) -> String {
    user.trim().to_lowercase()
}

impl FatSystem {
    /// Opens the store described by `config` using the wall clock.
    pub fn open(config: &StoreConfig) -> Result<Self, FatError> {
        config.validate()?;

        let backend: Arc<dyn Backend> = if config.persist {
            Arc::new(JsonDirBackend::open(&config.data_root_path())?)
        } else {
            Arc::new(VolatileBackend)
        };

        Ok(Self::with_backend(config, backend, Arc::new(SystemClock))?)
    }

    /// Opens the store on an explicit backend and clock.
    pub fn with_backend(
        config: &StoreConfig,
        backend: Arc<dyn Backend>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, StoreError> {
        let table = FileTable::open(
            Arc::clone(&backend),
            clock,
            config.block_size,
            &config.admin_user,
        )?;
        let users = UserRegistry::open(backend, &config.admin_user)?;

        info!(
            "FAT store ready: {} files, {} blocks, {} users",
            table.len(),
            table.blocks().len(),
            users.len()
        );
        Ok(Self { table, users })
    }

    pub fn table(&self) -> &FileTable {
        &self.table
    }

    pub fn users(&self) -> &UserRegistry {
        &self.users
    }

    /// Creates a file. The owner must be a well-formed username.
    pub fn create_file(
        &mut self,
        name: &str,
        content: &str,
        owner: &str,
    ) -> Result<(), CreateError> {
        let owner =
            normalize_username(owner).map_err(|_| CreateError::InvalidOwner(owner.to_string()))?;
        self.table.create(name, content, &owner)
    }

    pub fn list_files(&self, include_trashed: bool) -> Vec<FileSummary> {
        self.table.list(include_trashed)
    }

    pub fn open_file(&self, name: &str, user: &str) -> Result<OpenResult, ReadError> {
        self.table.read(name, &user_key(user))
    }

    pub fn modify_file(
        &mut self,
        name: &str,
        new_content: &str,
        user: &str,
    ) -> Result<(), UpdateError> {
        self.table.update(name, new_content, &user_key(user))
    }

    pub fn trash_file(&mut self, name: &str, user: &str) -> Result<(), TrashError> {
        self.table.trash(name, &user_key(user))
    }

    pub fn restore_file(&mut self, name: &str, user: &str) -> Result<(), TrashError> {
        self.table.restore(name, &user_key(user))
    }

    /// Grants or revokes a permission. The target must be a registered user.
    pub fn set_permission(
        &mut self,
        name: &str,
        target_user: &str,
        kind: PermissionKind,
        action: PermissionAction,
        user: &str,
    ) -> Result<(), PermError> {
        let target = user_key(target_user);
        let user = user_key(user);

        let entry = self
            .table
            .get(name)
            .ok_or_else(|| PermError::NotFound(name.to_string()))?;
        self.table
            .evaluator()
            .authorize_change(entry, &target, &user)?;

        if !self.users.contains(&target) {
            return Err(PermError::UnknownUser(target));
        }

        self.table.set_permission(name, &target, kind, action, &user)
    }

    pub fn register_user(&mut self, username: &str) -> Result<bool, UserError> {
        self.users.register(username)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn system() -> FatSystem {
        FatSystem::open(&StoreConfig::volatile(5)).unwrap()
    }

    #[test]
    fn test_users_are_case_insensitive() {
        let mut fat = system();
        fat.register_user("Alice").unwrap();
        fat.create_file("a.txt", "hello", "ALICE").unwrap();
        assert_eq!(fat.table().get("a.txt").unwrap().owner, "alice");
        assert_eq!(fat.open_file("a.txt", "Alice").unwrap().content, "hello");
    }

    #[test]
    fn test_create_rejects_malformed_owner() {
        let mut fat = system();
        for owner in ["", "   ", "two words", "a/b"] {
            assert!(matches!(
                fat.create_file("a.txt", "hello", owner),
                Err(CreateError::InvalidOwner(_))
            ));
        }
        assert!(fat.list_files(true).is_empty());
        assert!(fat.table().blocks().is_empty());

        fat.create_file("a.txt", "hello", "  Alice ").unwrap();
        assert_eq!(fat.table().get("a.txt").unwrap().owner, "alice");
    }

    #[test]
    fn test_set_permission_check_order() {
        let mut fat = system();
        fat.register_user("alice").unwrap();
        fat.create_file("a.txt", "hello", "alice").unwrap();
        let read = PermissionKind::Read;
        let grant = PermissionAction::Grant;

        assert!(matches!(
            fat.set_permission("b.txt", "bob", read, grant, "alice"),
            Err(PermError::NotFound(_))
        ));
        assert!(matches!(
            fat.set_permission("a.txt", "ghost", read, grant, "mallory"),
            Err(PermError::Forbidden(_))
        ));
        assert!(matches!(
            fat.set_permission("a.txt", "alice", read, grant, "alice"),
            Err(PermError::InvalidTarget(_))
        ));
        assert!(matches!(
            fat.set_permission("a.txt", "ghost", read, grant, "alice"),
            Err(PermError::UnknownUser(_))
        ));

        fat.register_user("bob").unwrap();
        fat.set_permission("a.txt", "BOB", read, grant, "alice").unwrap();
        assert_eq!(fat.open_file("a.txt", "bob").unwrap().content, "hello");
    }
}
