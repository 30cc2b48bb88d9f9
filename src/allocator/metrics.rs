//! Fragmentation metrics.
//!
//! Derived from the final partition and the allocation records; nothing
//! here is stored per block.
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Internal fragmentation | Σ(block size - requested) over allocated records |
//! | External fragmentation | Σ free blocks smaller than the smallest rejected request |
//! | Fragmentation ratio | 1 - largest free / total free |
//! | Utilization | allocated bytes / capacity |

use serde::{Deserialize, Serialize};

use crate::models::{AllocationRecord, MemoryBlock, Size};

/// Memory usage and fragmentation summary of one allocation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FragmentationMetrics {
    /// Sum of all block sizes.
    pub total_capacity: Size,
    /// Sum of requested sizes that were satisfied.
    pub total_allocated: Size,
    /// Unused space inside allocated blocks.
    pub total_internal_fragmentation: Size,
    /// Free space in blocks too small for any outstanding request.
    pub total_external_fragmentation: Size,
    /// Number of rejected requests.
    pub rejected_count: usize,
    /// Sum of rejected request sizes.
    pub rejected_size: Size,
    /// Sum of free block sizes.
    pub total_free: Size,
    /// Largest free block (0 if none).
    pub largest_free_block: Size,
    /// `total_allocated / total_capacity` (0.0..1.0).
    pub memory_utilization: f64,
    /// `1 - largest_free_block / total_free` (0.0 when nothing is free).
    pub fragmentation_ratio: f64,
}

impl FragmentationMetrics {
    /// Computes metrics from the final blocks and the run's records.
    pub fn calculate(blocks: &[MemoryBlock], records: &[AllocationRecord]) -> Self {
        let total_capacity: Size = blocks.iter().map(|b| b.size).sum();

        let mut total_allocated: Size = 0;
        let mut total_internal_fragmentation: Size = 0;
        let mut rejected_count = 0;
        let mut rejected_size: Size = 0;
        let mut smallest_rejected: Option<Size> = None;

        for r in records {
            if r.is_allocated() {
                total_allocated += r.requested_size;
                total_internal_fragmentation += r.internal_fragmentation;
            } else {
                rejected_count += 1;
                rejected_size += r.requested_size;
                smallest_rejected = Some(
                    smallest_rejected.map_or(r.requested_size, |s| s.min(r.requested_size)),
                );
            }
        }

        let free = || blocks.iter().filter(|b| b.is_free).map(|b| b.size);
        let total_free: Size = free().sum();
        let largest_free_block = free().max().unwrap_or(0);

        // Nothing outstanding means no free block is "too small".
        let total_external_fragmentation: Size = smallest_rejected
            .map(|need| free().filter(|&size| size < need).sum::<Size>())
            .unwrap_or(0);

        let memory_utilization = if total_capacity == 0 {
            0.0
        } else {
            total_allocated as f64 / total_capacity as f64
        };

        Self {
            total_capacity,
            total_allocated,
            total_internal_fragmentation,
            total_external_fragmentation,
            rejected_count,
            rejected_size,
            total_free,
            largest_free_block,
            memory_utilization,
            fragmentation_ratio: fragmentation_ratio(total_free, largest_free_block),
        }
    }
}

/// `1 - largest / total`, clamped to `[0, 1]`.
pub fn fragmentation_ratio(total_free: Size, largest_free_block: Size) -> f64 {
    if total_free == 0 {
        return 0.0;
    }
    let largest = largest_free_block.min(total_free) as f64;
    (1.0 - largest / total_free as f64).clamp(0.0, 1.0)
}
