//! Block chain primitives
//!
//! A file's content is stored as a singly linked chain of fixed-size blocks.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque reference to an allocated block.
///
/// `batch` is the allocation stamp shared by every block produced by one
/// chunking call; `seq` is the block's position inside that batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BlockRef {
    pub batch: u64,
    pub seq: u32,
}

impl BlockRef {
    pub fn new(batch: u64, seq: u32) -> Self {
        Self { batch, seq }
    }
}

impl fmt::Display for BlockRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "blk_{}_{}", self.batch, self.seq)
    }
}

/// One allocated chunk of file content.
///
/// Invariant: `is_last == next_ref.is_none()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataBlock {
    pub payload: String,
    pub next_ref: Option<BlockRef>,
    pub is_last: bool,
}

impl DataBlock {
    /// Payload length in characters
    pub fn len_chars(&self) -> usize {
        self.payload.chars().count()
    }
}

/// Persisted form of a block: the block plus its own reference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockRecord {
    #[serde(rename = "ref")]
    pub block_ref: BlockRef,
    #[serde(flatten)]
    pub block: DataBlock,
}

/// Result of walking a chain
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChainRead {
    pub content: String,
    pub visited: Vec<BlockRef>,
    /// True when the walk ended on an `is_last` block
    pub complete: bool,
}

/// Splits `content` into pieces of at most `block_size` characters.
///
/// Concatenating the pieces yields `content` exactly. Empty content gives no pieces.
pub fn split_payloads(content: &str, block_size: usize) -> Vec<String> {
    let mut pieces = Vec::new();
    if block_size == 0 {
        return pieces;
    }

    let mut current = String::new();
    let mut count = 0;
    for ch in content.chars() {
        current.push(ch);
        count += 1;
        if count == block_size {
            pieces.push(std::mem::take(&mut current));
            count = 0;
        }
    }
    if !current.is_empty() {
        pieces.push(current);
    }
    pieces
}

/// Links payloads into blocks, assigning `batch`/`0..n` references.
pub fn chunk(content: &str, block_size: usize, batch: u64) -> Vec<(BlockRef, DataBlock)> {
    let pieces = split_payloads(content, block_size);
    let last = pieces.len().saturating_sub(1);

    pieces
        .into_iter()
        .enumerate()
        .map(|(i, payload)| {
            let is_last = i == last;
            let next_ref = if is_last {
                None
            } else {
                Some(BlockRef::new(batch, i as u32 + 1))
            };
            (
                BlockRef::new(batch, i as u32),
                DataBlock {
                    payload,
                    next_ref,
                    is_last,
                },
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_hello_world() {
        let pieces = split_payloads("Hello World", 5);
        assert_eq!(pieces, vec!["Hello", " Worl", "d"]);
    }

    #[test]
    fn test_split_empty() {
        assert!(split_payloads("", 5).is_empty());
        assert!(chunk("", 5, 1).is_empty());
    }

    #[test]
    fn test_split_exact_multiple() {
        let pieces = split_payloads("abcdef", 3);
        assert_eq!(pieces, vec!["abc", "def"]);
    }

    #[test]
    fn test_split_keeps_multibyte_chars_whole() {
        let pieces = split_payloads("añoñoñ", 2);
        assert_eq!(pieces, vec!["añ", "oñ", "oñ"]);
        assert_eq!(pieces.concat(), "añoñoñ");
    }

    #[test]
    fn test_chunk_count_and_links() {
        for len in 1..40usize {
            let content: String = "x".repeat(len);
            let blocks = chunk(&content, 7, 42);
            assert_eq!(blocks.len(), len.div_ceil(7));

            let lasts = blocks.iter().filter(|(_, b)| b.is_last).count();
            assert_eq!(lasts, 1);
            assert!(blocks.last().unwrap().1.is_last);

            for pair in blocks.windows(2) {
                assert_eq!(pair[0].1.next_ref, Some(pair[1].0));
            }
            for (_, block) in &blocks {
                assert_eq!(block.is_last, block.next_ref.is_none());
            }
        }
    }

    #[test]
    fn test_block_ref_display() {
        assert_eq!(BlockRef::new(1700000000000, 2).to_string(), "blk_1700000000000_2");
    }
}
