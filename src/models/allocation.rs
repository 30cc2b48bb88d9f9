//! Allocation request and record models.

use serde::{Deserialize, Serialize};

use super::{BlockId, MemoryBlock, Size};

/// A process asking for a contiguous region of memory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationRequest {
    /// Requesting process ID.
    pub process_id: String,
    /// Requested size.
    pub size: Size,
}

impl AllocationRequest {
    /// Creates a new request.
    pub fn new(process_id: impl Into<String>, size: Size) -> Self {
        Self {
            process_id: process_id.into(),
            size,
        }
    }

    /// Creates requests `P1..Pn` for each size.
    pub fn from_sizes(sizes: &[Size]) -> Vec<Self> {
        sizes
            .iter()
            .enumerate()
            .map(|(i, &size)| Self::new(format!("P{}", i + 1), size))
            .collect()
    }
}

/// Outcome of a single request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AllocationStatus {
    /// A block was assigned.
    Allocated,
    /// No free block was large enough.
    Rejected,
}

/// Immutable record of how one request was handled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationRecord {
    /// Requesting process ID.
    pub process_id: String,
    /// Requested size.
    pub requested_size: Size,
    /// Assigned block, if any.
    pub allocated_block_id: Option<BlockId>,
    /// Allocated or rejected.
    pub status: AllocationStatus,
    /// `block.size - requested_size` when allocated, otherwise 0.
    pub internal_fragmentation: Size,
}

impl AllocationRecord {
    /// Records a successful allocation into `block`.
    pub fn allocated(request: &AllocationRequest, block: &MemoryBlock) -> Self {
        Self {
            process_id: request.process_id.clone(),
            requested_size: request.size,
            allocated_block_id: Some(block.id),
            status: AllocationStatus::Allocated,
            internal_fragmentation: block.size - request.size,
        }
    }

    /// Records a rejection.
    pub fn rejected(request: &AllocationRequest) -> Self {
        Self {
            process_id: request.process_id.clone(),
            requested_size: request.size,
            allocated_block_id: None,
            status: AllocationStatus::Rejected,
            internal_fragmentation: 0,
        }
    }

    /// Whether the request was satisfied.
    #[inline]
    pub fn is_allocated(&self) -> bool {
        self.status == AllocationStatus::Allocated
    }
}
