//! Side-by-side comparison of every policy on the same input.
//!
//! Each policy run receives its own copy of the input, so summaries are
//! independent of run order.

use serde::{Deserialize, Serialize};

use crate::allocator::{AllocationEngine, AllocationPolicy, FragmentationMetrics};
use crate::error::SimResult;
use crate::models::{AllocationRecord, AllocationRequest, MemoryBlock, Process, Size, Ticks, Timeline};
use crate::scheduler::{ScheduleKpi, SchedulingEngine, SchedulingPolicy};

/// Per-policy scheduling summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedulingSummary {
    /// Policy that was run.
    pub policy: SchedulingPolicy,
    /// Mean waiting time.
    pub average_waiting_time: f64,
    /// Mean turnaround time.
    pub average_turnaround_time: f64,
    /// Gantt-style CPU occupancy.
    pub timeline: Timeline,
    /// Full KPI set.
    pub kpi: ScheduleKpi,
}

/// Per-policy allocation summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationSummary {
    /// Policy that was run.
    pub policy: AllocationPolicy,
    /// Unused space inside allocated blocks.
    pub total_internal_fragmentation: Size,
    /// Free space in blocks too small for the smallest rejected request.
    pub total_external_fragmentation: Size,
    /// Number of rejected requests.
    pub rejected_count: usize,
    /// One record per request, in request order.
    pub records: Vec<AllocationRecord>,
    /// Full fragmentation metrics.
    pub metrics: FragmentationMetrics,
}

/// Runs every scheduling policy, in [`SchedulingPolicy::ALL`] order.
///
/// # Errors
/// Propagates the first engine error (all policies share the input, so an
/// invalid input fails on the first run).
pub fn compare_scheduling(processes: &[Process], quantum: Ticks) -> SimResult<Vec<SchedulingSummary>> {
    let engine = SchedulingEngine::new().with_quantum(quantum);
    SchedulingPolicy::ALL
        .iter()
        .map(|&policy| {
            let outcome = engine.run(processes, policy)?;
            Ok(SchedulingSummary {
                policy,
                average_waiting_time: outcome.average_waiting_time(),
                average_turnaround_time: outcome.average_turnaround_time(),
                kpi: outcome.kpi(),
                timeline: outcome.timeline,
            })
        })
        .collect()
}

/// Runs every allocation policy, in [`AllocationPolicy::ALL`] order.
pub fn compare_allocation(
    blocks: &[MemoryBlock],
    requests: &[AllocationRequest],
) -> SimResult<Vec<AllocationSummary>> {
    let engine = AllocationEngine::new();
    AllocationPolicy::ALL
        .iter()
        .map(|&policy| {
            let outcome = engine.run(blocks, requests, policy)?;
            let metrics = outcome.metrics();
            Ok(AllocationSummary {
                policy,
                total_internal_fragmentation: metrics.total_internal_fragmentation,
                total_external_fragmentation: metrics.total_external_fragmentation,
                rejected_count: metrics.rejected_count,
                records: outcome.records,
                metrics,
            })
        })
        .collect()
}

/// Policy with the lowest average waiting time.
pub fn best_by_waiting_time(summaries: &[SchedulingSummary]) -> Option<&SchedulingSummary> {
    first_min_by(summaries, |s| s.average_waiting_time)
}

/// Policy with the lowest average turnaround time.
pub fn best_by_turnaround_time(summaries: &[SchedulingSummary]) -> Option<&SchedulingSummary> {
    first_min_by(summaries, |s| s.average_turnaround_time)
}

/// Policy that rejected the fewest requests.
pub fn fewest_rejections(summaries: &[AllocationSummary]) -> Option<&AllocationSummary> {
    first_min_by(summaries, |s| s.rejected_count as f64)
}

/// Policy with the least total internal fragmentation.
pub fn least_internal_fragmentation(summaries: &[AllocationSummary]) -> Option<&AllocationSummary> {
    first_min_by(summaries, |s| s.total_internal_fragmentation as f64)
}

// Earliest entry with the smallest key.
fn first_min_by<T>(items: &[T], key: impl Fn(&T) -> f64) -> Option<&T> {
    let mut best: Option<(&T, f64)> = None;
    for item in items {
        let k = key(item);
        match best {
            Some((_, b)) if k >= b => {}
            _ => best = Some((item, k)),
        }
    }
    best.map(|(item, _)| item)
}
