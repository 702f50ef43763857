//! Error handlers
//!
//! Provides error logging and the mapping from errors to shell reply codes.

use crate::error::types::{
    CreateError, FatError, PermError, ReadError, TrashError, UpdateError, UserError,
};
use log::error;

/// Handle a store error
pub fn handle_error(err: &FatError) {
    error!("FAT store error: {}", err);
}

/// Convert error to a shell reply code
pub fn error_to_reply_code(err: &FatError) -> u16 {
    match err {
        FatError::Create(CreateError::AlreadyExists(_)) => 553,
        FatError::Create(CreateError::InvalidName(_)) => 553,
        FatError::Create(CreateError::InvalidOwner(_)) => 501,
        FatError::Create(CreateError::InvalidContent) => 501,
        FatError::Read(ReadError::NotFound(_)) => 550,
        FatError::Read(ReadError::PermissionDenied(_)) => 530,
        FatError::Update(UpdateError::NotFound(_)) => 550,
        FatError::Update(UpdateError::PermissionDenied(_)) => 530,
        FatError::Update(UpdateError::InvalidContent) => 501,
        FatError::Trash(TrashError::NotFound(_)) => 550,
        FatError::Trash(TrashError::Forbidden(_)) => 530,
        FatError::Permission(PermError::NotFound(_)) => 550,
        FatError::Permission(PermError::UnknownUser(_)) => 550,
        FatError::Permission(PermError::Forbidden(_)) => 530,
        FatError::Permission(PermError::InvalidTarget(_)) => 504,
        FatError::Permission(PermError::AlreadyGranted { .. }) => 504,
        FatError::Permission(PermError::NotGranted { .. }) => 504,
        FatError::User(UserError::MalformedInput(_)) => 501,
        FatError::Create(CreateError::Storage(_))
        | FatError::Update(UpdateError::Storage(_))
        | FatError::Trash(TrashError::Storage(_))
        | FatError::Permission(PermError::Storage(_))
        | FatError::User(UserError::Storage(_))
        | FatError::Store(_) => 451,
        FatError::Config(_) => 421,
    }
}
