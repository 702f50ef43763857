//! User registry
//!
//! Tracks known usernames. The administrator is always a member.

use log::info;
use std::collections::BTreeSet;
use std::sync::Arc;

use crate::error::{StoreError, UserError};
use crate::storage::Backend;
use crate::users::validator::normalize_username;

pub struct UserRegistry {
    users: BTreeSet<String>,
    admin: String,
    backend: Arc<dyn Backend>,
}

impl UserRegistry {
    /// Loads the persisted user set and makes sure the administrator is in it.
    pub fn open(backend: Arc<dyn Backend>, admin: &str) -> Result<Self, StoreError> {
        let admin = admin.to_lowercase();
        let mut users: BTreeSet<String> = backend
            .load_users()?
            .unwrap_or_default()
            .into_iter()
            .map(|u| u.to_lowercase())
            .collect();
        users.insert(admin.clone());

        info!("Loaded {} registered users", users.len());
        Ok(Self {
            users,
            admin,
            backend,
        })
    }

    /// Registers a username. `Ok(false)` if it was already known.
    pub fn register(&mut self, username: &str) -> Result<bool, UserError> {
        let username = normalize_username(username)?;
        if self.users.contains(&username) {
            return Ok(false);
        }

        self.users.insert(username.clone());
        if let Err(e) = self.backend.save_users(&self.users()) {
            self.users.remove(&username);
            return Err(e.into());
        }

        info!("Registered user {}", username);
        Ok(true)
    }

    pub fn contains(&self, username: &str) -> bool {
        self.users.contains(&username.to_lowercase())
    }

    /// Registered usernames, sorted
    pub fn users(&self) -> Vec<String> {
        self.users.iter().cloned().collect()
    }

    pub fn admin(&self) -> &str {
        &self.admin
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}
