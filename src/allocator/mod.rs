//! Contiguous memory allocation over fixed partitions.
//!
//! Each request is placed into a single free block; a block holds at most
//! one occupant and is never split. Unused space inside an occupied block
//! is internal fragmentation.
//!
//! # Policies
//!
//! | Policy | Selection among free blocks with `size >= requested` |
//! |--------|------------------------------------------------------|
//! | First-Fit | lowest index |
//! | Best-Fit | minimum `size - requested`, then lowest ID |
//! | Worst-Fit | maximum `size`, then lowest ID |
//! | Next-Fit | First-Fit from the cursor, wrapping |
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 9.2

mod engine;
pub mod fit;
mod metrics;

pub use engine::{AllocationEngine, AllocationOutcome, AllocationPolicy, AllocationRun};
pub use metrics::{fragmentation_ratio, FragmentationMetrics};
