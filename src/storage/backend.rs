//! Persistence backends
//!
//! Layout under the data root:
//! `fat/<name>.json` per file entry, `blocks/<blk_batch_seq>.json` per block,
//! and `users.json` holding the registered usernames.

use log::info;
use std::path::{Path, PathBuf};

use crate::blocks::{BlockRecord, BlockRef, DataBlock};
use crate::error::StoreError;
use crate::files::FileEntry;
use crate::storage::filesystem::{
    create_directory, read_record, read_records, record_path, remove_if_exists, write_record,
};

const FAT_DIR: &str = "fat";
const BLOCKS_DIR: &str = "blocks";
const USERS_FILE: &str = "users.json";

/// Trait for record storage backends.
pub trait Backend: Send + Sync {
    /// Load every file entry record.
    fn load_entries(&self) -> Result<Vec<FileEntry>, StoreError>;

    /// Write (or overwrite) the record for `entry.name`.
    fn save_entry(&self, entry: &FileEntry) -> Result<(), StoreError>;

    /// Load every block record.
    fn load_blocks(&self) -> Result<Vec<BlockRecord>, StoreError>;

    fn save_block(&self, block_ref: BlockRef, block: &DataBlock) -> Result<(), StoreError>;

    /// Delete a block record. Deleting a missing record succeeds.
    fn delete_block(&self, block_ref: BlockRef) -> Result<(), StoreError>;

    /// Load the registered usernames, `None` if never saved.
    fn load_users(&self) -> Result<Option<Vec<String>>, StoreError>;

    fn save_users(&self, users: &[String]) -> Result<(), StoreError>;
}

/// Backend that keeps nothing. The in-memory tables are the only copy.
#[derive(Debug, Default, Clone, Copy)]
pub struct VolatileBackend;

impl Backend for VolatileBackend {
    fn load_entries(&self) -> Result<Vec<FileEntry>, StoreError> {
        Ok(Vec::new())
    }

    fn save_entry(&self, _entry: &FileEntry) -> Result<(), StoreError> {
        Ok(())
    }

    fn load_blocks(&self) -> Result<Vec<BlockRecord>, StoreError> {
        Ok(Vec::new())
    }

    fn save_block(&self, _block_ref: BlockRef, _block: &DataBlock) -> Result<(), StoreError> {
        Ok(())
    }

    fn delete_block(&self, _block_ref: BlockRef) -> Result<(), StoreError> {
        Ok(())
    }

    fn load_users(&self) -> Result<Option<Vec<String>>, StoreError> {
        Ok(None)
    }

    fn save_users(&self, _users: &[String]) -> Result<(), StoreError> {
        Ok(())
    }
}

/// JSON-file-per-record backend rooted at a directory.
#[derive(Debug, Clone)]
pub struct JsonDirBackend {
    root: PathBuf,
}

impl JsonDirBackend {
    /// Open the backend, creating the directory layout if needed.
    pub fn open(root: &Path) -> Result<Self, StoreError> {
        create_directory(&root.join(FAT_DIR))?;
        create_directory(&root.join(BLOCKS_DIR))?;
        info!("Data root: {}", root.display());
        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn fat_dir(&self) -> PathBuf {
        self.root.join(FAT_DIR)
    }

    fn blocks_dir(&self) -> PathBuf {
        self.root.join(BLOCKS_DIR)
    }

    fn block_path(&self, block_ref: BlockRef) -> PathBuf {
        record_path(&self.blocks_dir(), &block_ref.to_string())
    }
}

impl Backend for JsonDirBackend {
    fn load_entries(&self) -> Result<Vec<FileEntry>, StoreError> {
        read_records(&self.fat_dir())
    }

    fn save_entry(&self, entry: &FileEntry) -> Result<(), StoreError> {
        write_record(&record_path(&self.fat_dir(), &entry.name), entry)
    }

    fn load_blocks(&self) -> Result<Vec<BlockRecord>, StoreError> {
        read_records(&self.blocks_dir())
    }

    fn save_block(&self, block_ref: BlockRef, block: &DataBlock) -> Result<(), StoreError> {
        let record = BlockRecord {
            block_ref,
            block: block.clone(),
        };
        write_record(&self.block_path(block_ref), &record)
    }

    fn delete_block(&self, block_ref: BlockRef) -> Result<(), StoreError> {
        remove_if_exists(&self.block_path(block_ref))?;
        Ok(())
    }

    fn load_users(&self) -> Result<Option<Vec<String>>, StoreError> {
        read_record(&self.root.join(USERS_FILE))
    }

    fn save_users(&self, users: &[String]) -> Result<(), StoreError> {
        write_record(&self.root.join(USERS_FILE), &users)
    }
}
