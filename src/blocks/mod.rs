//! Block storage
//!
//! Chunking of file content into linked fixed-size blocks and chain traversal.

pub mod block;
pub mod store;

pub use block::{BlockRecord, BlockRef, ChainRead, DataBlock, chunk, split_payloads};
pub use store::BlockStore;
