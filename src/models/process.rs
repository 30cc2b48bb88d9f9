//! Process model.
//!
//! A process is a single CPU burst request: it arrives at some tick,
//! needs a fixed amount of CPU time, and carries a static priority.
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5

use serde::{Deserialize, Serialize};

/// Simulation time in abstract ticks.
pub type Ticks = u64;

/// A process competing for the (single) simulated CPU.
///
/// # Priority Convention
/// **Lower value = higher priority.** A process with priority `0` runs
/// before one with priority `3`.
///
/// `remaining_time` is run-state: the scheduling engine works on its own
/// copy and resets it to `burst_time` at the start of every run, so it is
/// never read from serialized input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Process {
    /// Unique process identifier (e.g., "P1").
    pub id: String,
    /// Tick at which the process enters the ready queue.
    pub arrival_time: Ticks,
    /// Total CPU ticks required.
    pub burst_time: Ticks,
    /// Static priority (lower = more important).
    #[serde(default)]
    pub priority: i32,
    /// CPU ticks still owed to this process.
    #[serde(skip)]
    pub remaining_time: Ticks,
}

impl Process {
    /// Creates a new process with priority `0`.
    pub fn new(id: impl Into<String>, arrival_time: Ticks, burst_time: Ticks) -> Self {
        Self {
            id: id.into(),
            arrival_time,
            burst_time,
            priority: 0,
            remaining_time: burst_time,
        }
    }

    /// Sets the priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Whether the process has received its full burst.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.remaining_time == 0
    }

    /// Whether the process is in the system at `time`.
    #[inline]
    pub fn has_arrived(&self, time: Ticks) -> bool {
        self.arrival_time <= time
    }

    /// Restores `remaining_time` to the full burst.
    pub(crate) fn reset(&mut self) {
        self.remaining_time = self.burst_time;
    }
}
