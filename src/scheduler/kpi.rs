//! Schedule quality metrics (KPIs).
//!
//! Computes standard CPU scheduling performance indicators from a
//! completed run.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Makespan | End of the last timeline segment |
//! | Avg Waiting Time | mean(turnaround - burst) |
//! | Avg Turnaround Time | mean(completion - arrival) |
//! | Avg Response Time | mean(first start - arrival) |
//! | CPU Utilization | busy time / makespan |
//! | Throughput | completed processes / makespan |
//! | Context Switches | changes of running process, idle gaps ignored |
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.2: Scheduling Criteria

use serde::{Deserialize, Serialize};

use crate::models::{ScheduleResult, Ticks, Timeline};

/// Schedule performance indicators.
///
/// All time values are in ticks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleKpi {
    /// Makespan: end of the timeline.
    pub makespan: Ticks,
    /// Mean waiting time.
    pub avg_waiting_time: f64,
    /// Mean turnaround time.
    pub avg_turnaround_time: f64,
    /// Mean response time.
    pub avg_response_time: f64,
    /// Ticks spent running processes.
    pub busy_time: Ticks,
    /// Ticks spent idle.
    pub idle_time: Ticks,
    /// Fraction of the makespan the CPU was busy (0.0..1.0).
    pub cpu_utilization: f64,
    /// Completed processes per tick.
    pub throughput: f64,
    /// Number of process-to-process switches.
    pub context_switches: usize,
}

impl ScheduleKpi {
    /// Computes KPIs from per-process results and the run's timeline.
    pub fn calculate(results: &[ScheduleResult], timeline: &Timeline) -> Self {
        let makespan = timeline.makespan();
        let busy_time = timeline.busy_time();

        let (cpu_utilization, throughput) = if makespan == 0 {
            (0.0, 0.0)
        } else {
            (
                busy_time as f64 / makespan as f64,
                results.len() as f64 / makespan as f64,
            )
        };

        Self {
            makespan,
            avg_waiting_time: mean(results, |r| r.waiting_time),
            avg_turnaround_time: mean(results, |r| r.turnaround_time),
            avg_response_time: mean(results, ScheduleResult::response_time),
            busy_time,
            idle_time: makespan - busy_time,
            cpu_utilization,
            throughput,
            context_switches: timeline.context_switches(),
        }
    }

    /// Whether the run meets the given quality thresholds.
    pub fn meets_thresholds(&self, max_avg_waiting: f64, min_utilization: f64) -> bool {
        self.avg_waiting_time <= max_avg_waiting && self.cpu_utilization >= min_utilization
    }
}

/// Arithmetic mean of `field` over `results` (0.0 when empty).
pub(crate) fn mean(results: &[ScheduleResult], field: impl Fn(&ScheduleResult) -> Ticks) -> f64 {
    if results.is_empty() {
        return 0.0;
    }
    let total: f64 = results.iter().map(|r| field(r) as f64).sum();
    total / results.len() as f64
}
