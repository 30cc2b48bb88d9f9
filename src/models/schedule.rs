//! Schedule (solution) model.
//!
//! A scheduling run produces two views of the same solution:
//! per-process timing results and a Gantt-style timeline of CPU occupancy.
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.3

use serde::{Deserialize, Serialize};

use super::{Process, Ticks};

/// Timing outcome of a single process under one policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleResult {
    /// Process ID.
    pub process_id: String,
    /// Arrival tick (denormalized for metric computation).
    pub arrival_time: Ticks,
    /// Burst length (denormalized for metric computation).
    pub burst_time: Ticks,
    /// First tick at which the process held the CPU.
    pub start_time: Ticks,
    /// Tick at which `remaining_time` reached zero.
    pub completion_time: Ticks,
    /// `turnaround_time - burst_time`.
    pub waiting_time: Ticks,
    /// `completion_time - arrival_time`.
    pub turnaround_time: Ticks,
}

impl ScheduleResult {
    /// Derives waiting and turnaround times from a finished process.
    pub fn from_completion(process: &Process, start_time: Ticks, completion_time: Ticks) -> Self {
        let turnaround_time = completion_time - process.arrival_time;
        Self {
            process_id: process.id.clone(),
            arrival_time: process.arrival_time,
            burst_time: process.burst_time,
            start_time,
            completion_time,
            waiting_time: turnaround_time - process.burst_time,
            turnaround_time,
        }
    }

    /// Ticks between arrival and first dispatch.
    #[inline]
    pub fn response_time(&self) -> Ticks {
        self.start_time - self.arrival_time
    }
}

/// A contiguous interval of CPU occupancy.
///
/// `process_id = None` marks an idle interval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineSegment {
    /// Running process, or `None` when the CPU is idle.
    pub process_id: Option<String>,
    /// Start tick (inclusive).
    pub start_time: Ticks,
    /// End tick (exclusive).
    pub end_time: Ticks,
}

impl TimelineSegment {
    /// Creates a busy segment.
    pub fn busy(process_id: impl Into<String>, start_time: Ticks, end_time: Ticks) -> Self {
        Self {
            process_id: Some(process_id.into()),
            start_time,
            end_time,
        }
    }

    /// Creates an idle segment.
    pub fn idle(start_time: Ticks, end_time: Ticks) -> Self {
        Self {
            process_id: None,
            start_time,
            end_time,
        }
    }

    /// Whether the CPU is idle during this segment.
    #[inline]
    pub fn is_idle(&self) -> bool {
        self.process_id.is_none()
    }

    /// Segment length in ticks.
    #[inline]
    pub fn duration(&self) -> Ticks {
        self.end_time - self.start_time
    }
}

/// Ordered, gap-free sequence of segments covering `[0, makespan)`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeline {
    /// Segments in time order.
    pub segments: Vec<TimelineSegment>,
}

impl Timeline {
    /// Creates an empty timeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a segment as-is.
    pub fn push(&mut self, segment: TimelineSegment) {
        debug_assert!(segment.start_time == self.makespan());
        self.segments.push(segment);
    }

    /// Appends `[start, end)` for `process_id`, coalescing with the last
    /// segment when it belongs to the same occupant and ends at `start`.
    pub fn extend(&mut self, process_id: Option<&str>, start_time: Ticks, end_time: Ticks) {
        if let Some(last) = self.segments.last_mut() {
            if last.end_time == start_time && last.process_id.as_deref() == process_id {
                last.end_time = end_time;
                return;
            }
        }
        self.push(TimelineSegment {
            process_id: process_id.map(str::to_owned),
            start_time,
            end_time,
        });
    }

    /// End tick of the last segment.
    pub fn makespan(&self) -> Ticks {
        self.segments.last().map(|s| s.end_time).unwrap_or(0)
    }

    /// Total ticks the CPU spent running processes.
    pub fn busy_time(&self) -> Ticks {
        self.segments
            .iter()
            .filter(|s| !s.is_idle())
            .map(TimelineSegment::duration)
            .sum()
    }

    /// Total ticks the CPU sat idle.
    pub fn idle_time(&self) -> Ticks {
        self.makespan() - self.busy_time()
    }

    /// All segments belonging to a process.
    pub fn segments_for(&self, process_id: &str) -> Vec<&TimelineSegment> {
        self.segments
            .iter()
            .filter(|s| s.process_id.as_deref() == Some(process_id))
            .collect()
    }

    /// Occupant of the CPU at `time` (`None` when idle or past the end).
    pub fn running_at(&self, time: Ticks) -> Option<&str> {
        self.segments
            .iter()
            .find(|s| s.start_time <= time && time < s.end_time)
            .and_then(|s| s.process_id.as_deref())
    }

    /// Number of times the CPU switched from one process to a different one.
    ///
    /// Idle gaps are skipped: `P1, idle, P1` is not a switch.
    pub fn context_switches(&self) -> usize {
        let mut previous: Option<&str> = None;
        let mut switches = 0;
        for id in self.segments.iter().filter_map(|s| s.process_id.as_deref()) {
            if previous.is_some_and(|p| p != id) {
                switches += 1;
            }
            previous = Some(id);
        }
        switches
    }

    /// Whether segments are ordered, non-overlapping and gap-free from 0.
    pub fn is_contiguous(&self) -> bool {
        let mut cursor = 0;
        for s in &self.segments {
            if s.start_time != cursor || s.end_time <= s.start_time {
                return false;
            }
            cursor = s.end_time;
        }
        true
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Whether the timeline has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}
