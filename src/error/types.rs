//! Error types
//!
//! Defines domain-specific error types for each module of the FAT store.

use std::fmt;
use std::io;

/// Persistence backend errors
#[derive(Debug)]
pub enum StoreError {
    IoError(io::Error),
    Serialization(serde_json::Error),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::IoError(e) => write!(f, "IO error: {}", e),
            StoreError::Serialization(e) => write!(f, "Serialization error: {}", e),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<io::Error> for StoreError {
    fn from(error: io::Error) -> Self {
        StoreError::IoError(error)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(error: serde_json::Error) -> Self {
        StoreError::Serialization(error)
    }
}

/// File creation errors
#[derive(Debug)]
pub enum CreateError {
    AlreadyExists(String),
    InvalidName(String),
    InvalidOwner(String),
    InvalidContent,
    Storage(StoreError),
}

impl fmt::Display for CreateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CreateError::AlreadyExists(n) => write!(f, "File already exists: {}", n),
            CreateError::InvalidName(n) => write!(f, "Invalid file name: {:?}", n),
            CreateError::InvalidOwner(u) => write!(f, "Invalid owner name: {:?}", u),
            CreateError::InvalidContent => write!(f, "File content is invalid (empty)"),
            CreateError::Storage(e) => write!(f, "Storage error: {}", e),
        }
    }
}

impl std::error::Error for CreateError {}

impl From<StoreError> for CreateError {
    fn from(error: StoreError) -> Self {
        CreateError::Storage(error)
    }
}

/// File read errors
#[derive(Debug)]
pub enum ReadError {
    NotFound(String),
    PermissionDenied(String),
}

impl fmt::Display for ReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadError::NotFound(n) => write!(f, "File not found or in trash: {}", n),
            ReadError::PermissionDenied(n) => write!(f, "Read permission denied: {}", n),
        }
    }
}

impl std::error::Error for ReadError {}

/// File update errors
#[derive(Debug)]
pub enum UpdateError {
    NotFound(String),
    PermissionDenied(String),
    InvalidContent,
    Storage(StoreError),
}

impl fmt::Display for UpdateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpdateError::NotFound(n) => write!(f, "File not found or in trash: {}", n),
            UpdateError::PermissionDenied(n) => write!(f, "Write permission denied: {}", n),
            UpdateError::InvalidContent => write!(f, "New file content is invalid (empty)"),
            UpdateError::Storage(e) => write!(f, "Storage error: {}", e),
        }
    }
}

impl std::error::Error for UpdateError {}

impl From<StoreError> for UpdateError {
    fn from(error: StoreError) -> Self {
        UpdateError::Storage(error)
    }
}

/// Trash and restore errors
#[derive(Debug)]
pub enum TrashError {
    NotFound(String),
    Forbidden(String),
    Storage(StoreError),
}

impl fmt::Display for TrashError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrashError::NotFound(n) => write!(f, "File not found in the expected state: {}", n),
            TrashError::Forbidden(n) => write!(f, "Only the owner can trash or restore: {}", n),
            TrashError::Storage(e) => write!(f, "Storage error: {}", e),
        }
    }
}

impl std::error::Error for TrashError {}

impl From<StoreError> for TrashError {
    fn from(error: StoreError) -> Self {
        TrashError::Storage(error)
    }
}

/// Permission grant/revoke errors
#[derive(Debug)]
pub enum PermError {
    NotFound(String),
    Forbidden(String),
    InvalidTarget(String),
    UnknownUser(String),
    AlreadyGranted { user: String, kind: String },
    NotGranted { user: String, kind: String },
    Storage(StoreError),
}

impl fmt::Display for PermError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PermError::NotFound(n) => write!(f, "File not found: {}", n),
            PermError::Forbidden(n) => {
                write!(f, "Only the owner or the administrator can change permissions: {}", n)
            }
            PermError::InvalidTarget(u) => {
                write!(f, "Cannot change the owner's own permissions: {}", u)
            }
            PermError::UnknownUser(u) => write!(f, "Unknown user: {}", u),
            PermError::AlreadyGranted { user, kind } => {
                write!(f, "User {} already has '{}' permission", user, kind)
            }
            PermError::NotGranted { user, kind } => {
                write!(f, "User {} did not have '{}' permission", user, kind)
            }
            PermError::Storage(e) => write!(f, "Storage error: {}", e),
        }
    }
}

impl std::error::Error for PermError {}

impl From<StoreError> for PermError {
    fn from(error: StoreError) -> Self {
        PermError::Storage(error)
    }
}

/// User registry errors
#[derive(Debug)]
pub enum UserError {
    MalformedInput(String),
    Storage(StoreError),
}

impl fmt::Display for UserError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserError::MalformedInput(s) => write!(f, "Malformed input: {}", s),
            UserError::Storage(e) => write!(f, "Storage error: {}", e),
        }
    }
}

impl std::error::Error for UserError {}

impl From<StoreError> for UserError {
    fn from(error: StoreError) -> Self {
        UserError::Storage(error)
    }
}

/// General error that encompasses all error types
#[derive(Debug)]
pub enum FatError {
    Create(CreateError),
    Read(ReadError),
    Update(UpdateError),
    Trash(TrashError),
    Permission(PermError),
    User(UserError),
    Store(StoreError),
    Config(::config::ConfigError),
}

impl fmt::Display for FatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FatError::Create(e) => write!(f, "Create error: {}", e),
            FatError::Read(e) => write!(f, "Read error: {}", e),
            FatError::Update(e) => write!(f, "Update error: {}", e),
            FatError::Trash(e) => write!(f, "Trash error: {}", e),
            FatError::Permission(e) => write!(f, "Permission error: {}", e),
            FatError::User(e) => write!(f, "User error: {}", e),
            FatError::Store(e) => write!(f, "Store error: {}", e),
            FatError::Config(e) => write!(f, "Configuration error: {}", e),
        }
    }
}

impl std::error::Error for FatError {}

impl From<CreateError> for FatError {
    fn from(error: CreateError) -> Self {
        FatError::Create(error)
    }
}

impl From<ReadError> for FatError {
    fn from(error: ReadError) -> Self {
        FatError::Read(error)
    }
}

impl From<UpdateError> for FatError {
    fn from(error: UpdateError) -> Self {
        FatError::Update(error)
    }
}

impl From<TrashError> for FatError {
    fn from(error: TrashError) -> Self {
        FatError::Trash(error)
    }
}

impl From<PermError> for FatError {
    fn from(error: PermError) -> Self {
        FatError::Permission(error)
    }
}

impl From<UserError> for FatError {
    fn from(error: UserError) -> Self {
        FatError::User(error)
    }
}

impl From<StoreError> for FatError {
    fn from(error: StoreError) -> Self {
        FatError::Store(error)
    }
}

impl From<::config::ConfigError> for FatError {
    fn from(error: ::config::ConfigError) -> Self {
        FatError::Config(error)
    }
}
