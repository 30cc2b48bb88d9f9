//! Allocation engine: one entry point for every fit strategy.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::fit::select_block;
use super::metrics::FragmentationMetrics;
use crate::error::SimResult;
use crate::models::{AllocationRecord, AllocationRequest, MemoryBlock, Size};
use crate::validation::validate_memory_input;

/// Contiguous allocation strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AllocationPolicy {
    /// First large-enough block from the start.
    FirstFit,
    /// Large-enough block with the least leftover.
    BestFit,
    /// Largest free block.
    WorstFit,
    /// First-Fit resuming after the previous allocation.
    NextFit,
}

impl AllocationPolicy {
    /// Every policy, in comparison order.
    pub const ALL: [AllocationPolicy; 4] = [
        AllocationPolicy::FirstFit,
        AllocationPolicy::BestFit,
        AllocationPolicy::WorstFit,
        AllocationPolicy::NextFit,
    ];

    /// Display name (e.g., "First-Fit").
    pub fn name(&self) -> &'static str {
        match self {
            AllocationPolicy::FirstFit => "First-Fit",
            AllocationPolicy::BestFit => "Best-Fit",
            AllocationPolicy::WorstFit => "Worst-Fit",
            AllocationPolicy::NextFit => "Next-Fit",
        }
    }
}

impl fmt::Display for AllocationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Mutable state of one allocation run.
///
/// Owns a private copy of the partition and the Next-Fit cursor (index
/// after the most recently allocated block). Useful for stepping through
/// requests one at a time.
#[derive(Debug, Clone)]
pub struct AllocationRun {
    blocks: Vec<MemoryBlock>,
    cursor: usize,
}

impl AllocationRun {
    /// Starts a run over a copy of `blocks`.
    pub fn new(blocks: &[MemoryBlock]) -> Self {
        Self {
            blocks: blocks.to_vec(),
            cursor: 0,
        }
    }

    /// Current partition state.
    pub fn blocks(&self) -> &[MemoryBlock] {
        &self.blocks
    }

    /// Next-Fit scan origin.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Serves one request. A rejection leaves blocks and cursor untouched.
    pub fn allocate(&mut self, policy: AllocationPolicy, request: &AllocationRequest) -> AllocationRecord {
        match select_block(policy, &self.blocks, request.size, self.cursor) {
            Some(idx) => {
                self.cursor = (idx + 1) % self.blocks.len();
                let block = &mut self.blocks[idx];
                block.occupy(request.process_id.clone());
                debug!(
                    policy = %policy,
                    process = %request.process_id,
                    size = request.size,
                    block = block.id,
                    "Allocated"
                );
                AllocationRecord::allocated(request, block)
            }
            None => {
                debug!(
                    policy = %policy,
                    process = %request.process_id,
                    size = request.size,
                    "Rejected"
                );
                AllocationRecord::rejected(request)
            }
        }
    }

    /// Consumes the run, returning the final partition and the cursor.
    pub fn into_parts(self) -> (Vec<MemoryBlock>, usize) {
        (self.blocks, self.cursor)
    }
}

/// Result of one allocation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationOutcome {
    /// Policy that produced this outcome.
    pub policy: AllocationPolicy,
    /// One record per request, in request order.
    pub records: Vec<AllocationRecord>,
    /// Final partition state.
    pub blocks: Vec<MemoryBlock>,
    /// Next-Fit cursor after the last request.
    pub cursor: usize,
}

impl AllocationOutcome {
    /// Sum of internal fragmentation over allocated requests.
    pub fn total_internal_fragmentation(&self) -> Size {
        self.records.iter().map(|r| r.internal_fragmentation).sum()
    }

    /// Number of rejected requests.
    pub fn rejected_count(&self) -> usize {
        self.records.iter().filter(|r| !r.is_allocated()).count()
    }

    /// Record for a given process.
    pub fn record_for(&self, process_id: &str) -> Option<&AllocationRecord> {
        self.records.iter().find(|r| r.process_id == process_id)
    }

    /// Full fragmentation metrics for this run.
    pub fn metrics(&self) -> FragmentationMetrics {
        FragmentationMetrics::calculate(&self.blocks, &self.records)
    }
}

/// Contiguous memory allocation simulator over fixed partitions.
///
/// # Example
///
/// ```
/// use u_ossim::allocator::{AllocationEngine, AllocationPolicy};
/// use u_ossim::models::{AllocationRequest, MemoryBlock};
///
/// let blocks = MemoryBlock::from_sizes(&[100, 500, 200]);
/// let requests = vec![AllocationRequest::new("P1", 150)];
///
/// let outcome = AllocationEngine::new()
///     .run(&blocks, &requests, AllocationPolicy::BestFit)
///     .unwrap();
/// assert_eq!(outcome.records[0].allocated_block_id, Some(3));
/// assert_eq!(outcome.total_internal_fragmentation(), 50);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct AllocationEngine;

impl AllocationEngine {
    /// Creates an engine.
    pub fn new() -> Self {
        Self
    }

    /// Serves `requests` in order against a copy of `blocks`.
    ///
    /// # Errors
    /// `SimError::InvalidInput` for an empty partition, duplicate block
    /// IDs, a zero block/request size, or a block whose `is_free` flag
    /// disagrees with its occupant.
    pub fn run(
        &self,
        blocks: &[MemoryBlock],
        requests: &[AllocationRequest],
        policy: AllocationPolicy,
    ) -> SimResult<AllocationOutcome> {
        validate_memory_input(blocks, requests)?;

        let mut run = AllocationRun::new(blocks);
        let records: Vec<AllocationRecord> =
            requests.iter().map(|r| run.allocate(policy, r)).collect();
        let (blocks, cursor) = run.into_parts();

        let outcome = AllocationOutcome {
            policy,
            records,
            blocks,
            cursor,
        };

        info!(
            policy = %policy,
            requests = outcome.records.len(),
            rejected = outcome.rejected_count(),
            internal_fragmentation = outcome.total_internal_fragmentation(),
            "Allocation run complete"
        );

        Ok(outcome)
    }
}
