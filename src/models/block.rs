//! Memory block (fixed partition) model.
//!
//! Memory is a list of fixed-size partitions. A partition holds at most
//! one process; sizes never change during a run, only occupancy does.
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 9.2

use serde::{Deserialize, Serialize};

/// Memory size unit (KB in the textbook examples).
pub type Size = u64;

/// Block identifier.
pub type BlockId = u32;

/// A fixed-size memory partition.
///
/// Invariant: `is_free == occupant_process_id.is_none()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryBlock {
    /// Unique block identifier.
    pub id: BlockId,
    /// Partition size.
    pub size: Size,
    /// Whether the partition is available.
    #[serde(default = "default_free")]
    pub is_free: bool,
    /// Process currently holding the partition.
    #[serde(default)]
    pub occupant_process_id: Option<String>,
}

fn default_free() -> bool {
    true
}

impl MemoryBlock {
    /// Creates a free block.
    pub fn new(id: BlockId, size: Size) -> Self {
        Self {
            id,
            size,
            is_free: true,
            occupant_process_id: None,
        }
    }

    /// Creates blocks numbered from 1 for each size.
    pub fn from_sizes(sizes: &[Size]) -> Vec<Self> {
        sizes
            .iter()
            .zip(1..)
            .map(|(&size, id)| Self::new(id, size))
            .collect()
    }

    /// Whether the block is free and large enough for `size`.
    #[inline]
    pub fn fits(&self, size: Size) -> bool {
        self.is_free && self.size >= size
    }

    /// Marks the block as held by `process_id`.
    pub fn occupy(&mut self, process_id: impl Into<String>) {
        self.is_free = false;
        self.occupant_process_id = Some(process_id.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_new_is_free() {
        let b = MemoryBlock::new(1, 100);
        assert!(b.is_free);
        assert!(b.occupant_process_id.is_none());
        assert!(b.fits(100));
        assert!(!b.fits(101));
    }

    #[test]
    fn test_occupy() {
        let mut b = MemoryBlock::new(2, 500);
        b.occupy("P1");
        assert!(!b.is_free);
        assert_eq!(b.occupant_process_id.as_deref(), Some("P1"));
        assert!(!b.fits(10));
    }

    #[test]
    fn test_from_sizes_numbers_from_one() {
        let blocks = MemoryBlock::from_sizes(&[100, 500, 200]);
        let ids: Vec<BlockId> = blocks.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(blocks[1].size, 500);
    }

    #[test]
    fn test_deserialize_defaults_to_free() {
        let b: MemoryBlock = serde_json::from_str(r#"{"id":7,"size":300}"#).unwrap();
        assert!(b.is_free);
        assert!(b.occupant_process_id.is_none());
    }
}
