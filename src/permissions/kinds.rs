//! Permission kinds, actions and per-entry permission sets.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PermissionKind {
    Read,
    Write,
}

impl fmt::Display for PermissionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PermissionKind::Read => write!(f, "read"),
            PermissionKind::Write => write!(f, "write"),
        }
    }
}

impl FromStr for PermissionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "read" | "r" => Ok(PermissionKind::Read),
            "write" | "w" => Ok(PermissionKind::Write),
            other => Err(format!("Unknown permission kind: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionAction {
    Grant,
    Revoke,
}

impl FromStr for PermissionAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "grant" | "add" => Ok(PermissionAction::Grant),
            "revoke" | "remove" => Ok(PermissionAction::Revoke),
            other => Err(format!("Unknown permission action: {}", other)),
        }
    }
}

/// Read and write user sets of one file entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permissions {
    pub read: BTreeSet<String>,
    pub write: BTreeSet<String>,
}

impl Permissions {
    /// Sets holding only the owner
    pub fn owner_only(owner: &str) -> Self {
        Self {
            read: BTreeSet::from([owner.to_string()]),
            write: BTreeSet::from([owner.to_string()]),
        }
    }

    pub fn set(&self, kind: PermissionKind) -> &BTreeSet<String> {
        match kind {
            PermissionKind::Read => &self.read,
            PermissionKind::Write => &self.write,
        }
    }

    pub fn set_mut(&mut self, kind: PermissionKind) -> &mut BTreeSet<String> {
        match kind {
            PermissionKind::Read => &mut self.read,
            PermissionKind::Write => &mut self.write,
        }
    }

    /// Sorted user list for display
    pub fn sorted(&self, kind: PermissionKind) -> Vec<String> {
        self.set(kind).iter().cloned().collect()
    }
}
