//! Block store
//!
//! Arena of data blocks keyed by `BlockRef`, written through to the backend.

use log::{debug, info, warn};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::blocks::block::{BlockRef, ChainRead, DataBlock, chunk};
use crate::clock::Clock;
use crate::error::StoreError;
use crate::storage::Backend;

pub struct BlockStore {
    blocks: HashMap<BlockRef, DataBlock>,
    block_size: usize,
    last_batch: u64,
    backend: Arc<dyn Backend>,
    clock: Arc<dyn Clock>,
}

impl BlockStore {
    /// Opens the store, loading every persisted block.
    pub fn open(
        backend: Arc<dyn Backend>,
        clock: Arc<dyn Clock>,
        block_size: usize,
    ) -> Result<Self, StoreError> {
        let mut blocks = HashMap::new();
        let mut last_batch = 0;
        for record in backend.load_blocks()? {
            last_batch = last_batch.max(record.block_ref.batch);
            blocks.insert(record.block_ref, record.block);
        }

        info!("Loaded {} data blocks (block size {})", blocks.len(), block_size);

        Ok(Self {
            blocks,
            block_size,
            last_batch,
            backend,
            clock,
        })
    }

    pub fn block_size(&self) -> usize {
        self.block_size
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn get(&self, block_ref: &BlockRef) -> Option<&DataBlock> {
        self.blocks.get(block_ref)
    }

    /// Next allocation stamp: wall-clock millis, bumped past the previous stamp.
    fn next_batch(&mut self) -> u64 {
        let now_ms = self.clock.now().timestamp_millis().max(0) as u64;
        let batch = if now_ms <= self.last_batch {
            self.last_batch.saturating_add(1)
        } else {
            now_ms
        };
        self.last_batch = batch;
        batch
    }

    /// Chunks `content` into a fresh chain and persists every block.
    ///
    /// Returns the chain's references in order. Empty content allocates nothing
    /// and returns an empty list.
    pub fn allocate(&mut self, content: &str) -> Result<Vec<BlockRef>, StoreError> {
        if content.is_empty() {
            return Ok(Vec::new());
        }

        let batch = self.next_batch();
        let chain = chunk(content, self.block_size, batch);
        let mut refs = Vec::with_capacity(chain.len());

        for (block_ref, block) in chain {
            if let Err(e) = self.backend.save_block(block_ref, &block) {
                warn!("Failed to persist block {}: {}", block_ref, e);
                self.blocks.insert(block_ref, block);
                refs.push(block_ref);
                if let Err(free_err) = self.free(&refs) {
                    warn!("Partial batch {} not fully freed: {}", batch, free_err);
                }
                return Err(e);
            }
            self.blocks.insert(block_ref, block);
            refs.push(block_ref);
        }

        debug!("Allocated {} blocks in batch {}", refs.len(), batch);
        Ok(refs)
    }

    /// Walks the chain starting at `head`.
    ///
    /// A missing block or a revisited reference ends the walk early; whatever was
    /// gathered so far is returned with `complete == false`.
    pub fn read_chain(&self, head: BlockRef) -> ChainRead {
        let mut read = ChainRead::default();
        let mut seen = HashSet::new();
        let mut current = Some(head);

        while let Some(block_ref) = current {
            if !seen.insert(block_ref) {
                warn!("Cycle detected in block chain at {}", block_ref);
                return read;
            }

            let Some(block) = self.blocks.get(&block_ref) else {
                warn!("Block chain broken: {} is missing", block_ref);
                return read;
            };

            read.content.push_str(&block.payload);
            read.visited.push(block_ref);

            if block.is_last {
                read.complete = true;
                current = None;
            } else {
                current = block.next_ref;
            }
        }

        read
    }

    /// Deletes each referenced block. Missing references are ignored.
    ///
    /// Every reference is attempted; the first backend failure is returned.
    pub fn free(&mut self, refs: &[BlockRef]) -> Result<(), StoreError> {
        let mut first_error = None;

        for block_ref in refs {
            self.blocks.remove(block_ref);
            if let Err(e) = self.backend.delete_block(*block_ref) {
                warn!("Failed to delete block {}: {}", block_ref, e);
                first_error.get_or_insert(e);
            }
        }

        debug!("Freed {} blocks", refs.len());
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}
