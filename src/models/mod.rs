//! Simulation domain models.
//!
//! Provides the data types shared by the scheduling and allocation
//! engines. The two families never reference each other: a scheduling
//! run owns processes and timelines, an allocation run owns blocks and
//! records.
//!
//! # Domain Mappings
//!
//! | u-ossim | CPU scheduling | Memory allocation |
//! |---------|----------------|-------------------|
//! | Input | `Process` | `MemoryBlock`, `AllocationRequest` |
//! | Per-item outcome | `ScheduleResult` | `AllocationRecord` |
//! | Run-wide view | `Timeline` | final `MemoryBlock` list |

mod allocation;
mod block;
mod process;
mod schedule;

pub use allocation::{AllocationRecord, AllocationRequest, AllocationStatus};
pub use block::{BlockId, MemoryBlock, Size};
pub use process::{Process, Ticks};
pub use schedule::{ScheduleResult, Timeline, TimelineSegment};
