//! Scheduling engine: one entry point for every policy.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::info;

use super::kpi::{mean, ScheduleKpi};
use super::state::RunState;
use super::{fcfs, priority, round_robin, sjf};
use crate::error::SimResult;
use crate::models::{Process, ScheduleResult, Ticks, Timeline};
use crate::validation::{validate_processes, validate_quantum};

/// CPU scheduling policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SchedulingPolicy {
    /// First-Come, First-Served.
    Fcfs,
    /// Shortest Job First (non-preemptive).
    Sjf,
    /// Round Robin with a fixed quantum.
    RoundRobin,
    /// Preemptive priority, re-evaluated every tick.
    Priority,
}

impl SchedulingPolicy {
    /// Every policy, in comparison order.
    pub const ALL: [SchedulingPolicy; 4] = [
        SchedulingPolicy::Fcfs,
        SchedulingPolicy::Sjf,
        SchedulingPolicy::RoundRobin,
        SchedulingPolicy::Priority,
    ];

    /// Short name (e.g., "FCFS", "RR").
    pub fn name(&self) -> &'static str {
        match self {
            SchedulingPolicy::Fcfs => "FCFS",
            SchedulingPolicy::Sjf => "SJF",
            SchedulingPolicy::RoundRobin => "RR",
            SchedulingPolicy::Priority => "Priority",
        }
    }

    /// Policy description.
    pub fn description(&self) -> &'static str {
        match self {
            SchedulingPolicy::Fcfs => "First-Come, First-Served",
            SchedulingPolicy::Sjf => "Shortest Job First (non-preemptive)",
            SchedulingPolicy::RoundRobin => "Round Robin",
            SchedulingPolicy::Priority => "Preemptive Priority",
        }
    }

    /// Whether a running process can lose the CPU before finishing.
    pub fn is_preemptive(&self) -> bool {
        matches!(self, SchedulingPolicy::RoundRobin | SchedulingPolicy::Priority)
    }

    /// Whether the policy needs a time quantum.
    pub fn requires_quantum(&self) -> bool {
        matches!(self, SchedulingPolicy::RoundRobin)
    }

    // Priority runs tick by tick; merging keeps its Gantt readable.
    // Round Robin keeps one segment per slice.
    fn coalesces_timeline(&self) -> bool {
        matches!(self, SchedulingPolicy::Priority)
    }
}

impl fmt::Display for SchedulingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Result of one scheduling run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleOutcome {
    /// Policy that produced this outcome.
    pub policy: SchedulingPolicy,
    /// One result per input process, in input order.
    pub results: Vec<ScheduleResult>,
    /// Gantt-style CPU occupancy.
    pub timeline: Timeline,
}

impl ScheduleOutcome {
    /// Mean waiting time.
    pub fn average_waiting_time(&self) -> f64 {
        mean(&self.results, |r| r.waiting_time)
    }

    /// Mean turnaround time.
    pub fn average_turnaround_time(&self) -> f64 {
        mean(&self.results, |r| r.turnaround_time)
    }

    /// Result for a given process.
    pub fn result_for(&self, process_id: &str) -> Option<&ScheduleResult> {
        self.results.iter().find(|r| r.process_id == process_id)
    }

    /// Full KPI set for this run.
    pub fn kpi(&self) -> ScheduleKpi {
        ScheduleKpi::calculate(&self.results, &self.timeline)
    }
}

/// CPU scheduling simulator.
///
/// Each call to [`run`](Self::run) works on a private copy of the input,
/// so the same process list can be replayed under every policy.
///
/// # Example
///
/// ```
/// use u_ossim::models::Process;
/// use u_ossim::scheduler::{SchedulingEngine, SchedulingPolicy};
///
/// let processes = vec![
///     Process::new("P1", 0, 7),
///     Process::new("P2", 2, 4),
///     Process::new("P3", 4, 1),
///     Process::new("P4", 5, 4),
/// ];
/// let engine = SchedulingEngine::new().with_quantum(2);
/// let outcome = engine.run(&processes, SchedulingPolicy::Sjf).unwrap();
/// assert_eq!(outcome.results.len(), 4);
/// assert!((outcome.average_waiting_time() - 4.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SchedulingEngine {
    quantum: Option<Ticks>,
}

impl SchedulingEngine {
    /// Creates an engine without a quantum.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the Round Robin quantum.
    pub fn with_quantum(mut self, quantum: Ticks) -> Self {
        self.quantum = Some(quantum);
        self
    }

    /// Configured quantum, if any.
    pub fn quantum(&self) -> Option<Ticks> {
        self.quantum
    }

    /// Simulates `processes` under `policy`.
    ///
    /// # Errors
    /// `SimError::InvalidInput` for an empty list, duplicate IDs, a zero
    /// burst, times that would overflow the clock, or Round Robin without
    /// a quantum of at least 1.
    pub fn run(&self, processes: &[Process], policy: SchedulingPolicy) -> SimResult<ScheduleOutcome> {
        validate_processes(processes)?;

        let mut state = RunState::new(processes, policy.coalesces_timeline());
        match policy {
            SchedulingPolicy::Fcfs => fcfs::run(&mut state),
            SchedulingPolicy::Sjf => sjf::run(&mut state),
            SchedulingPolicy::RoundRobin => {
                round_robin::run(&mut state, validate_quantum(self.quantum)?)
            }
            SchedulingPolicy::Priority => priority::run(&mut state),
        }

        let (results, timeline) = state.finish();
        let outcome = ScheduleOutcome {
            policy,
            results,
            timeline,
        };

        info!(
            policy = %policy,
            processes = outcome.results.len(),
            makespan = outcome.timeline.makespan(),
            avg_waiting = outcome.average_waiting_time(),
            avg_turnaround = outcome.average_turnaround_time(),
            "Scheduling run complete"
        );

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SimError;
    use crate::models::TimelineSegment;
    use crate::validation::ValidationErrorKind;

    /// The classic four-process textbook workload.
    fn textbook() -> Vec<Process> {
        vec![
            Process::new("P1", 0, 7),
            Process::new("P2", 2, 4),
            Process::new("P3", 4, 1),
            Process::new("P4", 5, 4),
        ]
    }

    fn with_priorities() -> Vec<Process> {
        vec![
            Process::new("P1", 0, 7).with_priority(3),
            Process::new("P2", 2, 4).with_priority(1),
            Process::new("P3", 4, 1).with_priority(2),
            Process::new("P4", 5, 4).with_priority(1),
        ]
    }

    fn engine() -> SchedulingEngine {
        SchedulingEngine::new().with_quantum(2)
    }

    fn completions(outcome: &ScheduleOutcome) -> Vec<Ticks> {
        outcome.results.iter().map(|r| r.completion_time).collect()
    }

    #[test]
    fn test_fcfs_textbook() {
        let out = engine().run(&textbook(), SchedulingPolicy::Fcfs).unwrap();
        assert_eq!(completions(&out), vec![7, 11, 12, 16]);
        assert!((out.average_waiting_time() - 4.75).abs() < 1e-10);
        assert!((out.average_turnaround_time() - 8.75).abs() < 1e-10);
    }

    #[test]
    fn test_sjf_textbook() {
        let out = engine().run(&textbook(), SchedulingPolicy::Sjf).unwrap();
        // P1 0-7, P3 7-8, P2 8-12 (earlier arrival than P4), P4 12-16
        assert_eq!(completions(&out), vec![7, 12, 8, 16]);
        assert!((out.average_waiting_time() - 4.0).abs() < 1e-10);
        assert!((out.average_turnaround_time() - 8.0).abs() < 1e-10);
    }

    #[test]
    fn test_round_robin_textbook() {
        let out = engine().run(&textbook(), SchedulingPolicy::RoundRobin).unwrap();
        assert_eq!(completions(&out), vec![16, 9, 7, 15]);
        assert!((out.average_waiting_time() - 5.0).abs() < 1e-10);
        assert!((out.average_turnaround_time() - 9.0).abs() < 1e-10);

        let order: Vec<&str> = out
            .timeline
            .segments
            .iter()
            .filter_map(|s| s.process_id.as_deref())
            .collect();
        assert_eq!(order, vec!["P1", "P2", "P1", "P3", "P2", "P4", "P1", "P4", "P1"]);
    }

    #[test]
    fn test_priority_textbook() {
        let out = engine().run(&with_priorities(), SchedulingPolicy::Priority).unwrap();
        assert_eq!(completions(&out), vec![16, 6, 11, 10]);
        assert!((out.average_waiting_time() - 4.0).abs() < 1e-10);
        assert!((out.average_turnaround_time() - 8.0).abs() < 1e-10);
        assert_eq!(
            out.timeline.segments,
            vec![
                TimelineSegment::busy("P1", 0, 2),
                TimelineSegment::busy("P2", 2, 6),
                TimelineSegment::busy("P4", 6, 10),
                TimelineSegment::busy("P3", 10, 11),
                TimelineSegment::busy("P1", 11, 16),
            ]
        );
    }

    #[test]
    fn test_priority_equal_priorities_is_srtf() {
        let out = engine().run(&textbook(), SchedulingPolicy::Priority).unwrap();
        assert_eq!(completions(&out), vec![16, 7, 5, 11]);
        assert!((out.average_waiting_time() - 3.0).abs() < 1e-10);
    }

    #[test]
    fn test_round_robin_requires_quantum() {
        let err = SchedulingEngine::new()
            .run(&textbook(), SchedulingPolicy::RoundRobin)
            .unwrap_err();
        assert_eq!(
            err.validation_errors()[0].kind,
            ValidationErrorKind::MissingQuantum
        );

        let err = SchedulingEngine::new()
            .with_quantum(0)
            .run(&textbook(), SchedulingPolicy::RoundRobin)
            .unwrap_err();
        assert!(matches!(err, SimError::InvalidInput(_)));
    }

    #[test]
    fn test_quantum_ignored_by_other_policies() {
        for policy in [
            SchedulingPolicy::Fcfs,
            SchedulingPolicy::Sjf,
            SchedulingPolicy::Priority,
        ] {
            assert!(SchedulingEngine::new().run(&textbook(), policy).is_ok());
        }
    }

    #[test]
    fn test_invalid_processes_rejected() {
        for policy in SchedulingPolicy::ALL {
            assert!(engine().run(&[], policy).is_err());
            assert!(engine().run(&[Process::new("P1", 0, 0)], policy).is_err());
        }
    }

    #[test]
    fn test_input_not_mutated() {
        let processes = textbook();
        let before = processes.clone();
        for policy in SchedulingPolicy::ALL {
            engine().run(&processes, policy).unwrap();
        }
        assert_eq!(processes, before);
    }

    #[test]
    fn test_idempotent_runs() {
        let processes = with_priorities();
        for policy in SchedulingPolicy::ALL {
            let a = engine().run(&processes, policy).unwrap();
            let b = engine().run(&processes, policy).unwrap();
            assert_eq!(a, b);
            assert_eq!(
                serde_json::to_string(&a).unwrap(),
                serde_json::to_string(&b).unwrap()
            );
        }
    }

    #[test]
    fn test_waiting_plus_burst_equals_turnaround() {
        let processes = with_priorities();
        for policy in SchedulingPolicy::ALL {
            let out = engine().run(&processes, policy).unwrap();
            let waiting: Ticks = out.results.iter().map(|r| r.waiting_time).sum();
            let burst: Ticks = processes.iter().map(|p| p.burst_time).sum();
            let turnaround: Ticks = out.results.iter().map(|r| r.turnaround_time).sum();
            assert_eq!(waiting + burst, turnaround, "{policy}");
        }
    }

    #[test]
    fn test_timeline_contiguous_and_complete() {
        let processes = vec![
            Process::new("P1", 3, 2).with_priority(1),
            Process::new("P2", 9, 3),
            Process::new("P3", 4, 4).with_priority(2),
        ];
        for policy in SchedulingPolicy::ALL {
            let out = engine().run(&processes, policy).unwrap();
            assert!(out.timeline.is_contiguous(), "{policy}");
            assert_eq!(out.results.len(), processes.len());
            for p in &processes {
                let busy: Ticks = out
                    .timeline
                    .segments_for(&p.id)
                    .iter()
                    .map(|s| s.duration())
                    .sum();
                assert_eq!(busy, p.burst_time, "{policy} {}", p.id);
            }
            let last_completion = out.results.iter().map(|r| r.completion_time).max();
            assert_eq!(Some(out.timeline.makespan()), last_completion);
        }
    }

    #[test]
    fn test_fcfs_runs_in_arrival_order() {
        let processes = vec![
            Process::new("C", 6, 1),
            Process::new("A", 0, 3),
            Process::new("B", 1, 2),
        ];
        let out = engine().run(&processes, SchedulingPolicy::Fcfs).unwrap();
        let arrivals: Vec<Ticks> = out
            .timeline
            .segments
            .iter()
            .filter_map(|s| s.process_id.as_deref())
            .map(|id| processes.iter().find(|p| p.id == id).unwrap().arrival_time)
            .collect();
        assert!(arrivals.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_round_robin_slices_bounded_by_quantum() {
        let processes = vec![
            Process::new("P1", 0, 7),
            Process::new("P2", 1, 5),
            Process::new("P3", 2, 3),
        ];
        let quantum = 3;
        let out = SchedulingEngine::new()
            .with_quantum(quantum)
            .run(&processes, SchedulingPolicy::RoundRobin)
            .unwrap();

        for seg in out.timeline.segments.iter().filter(|s| !s.is_idle()) {
            assert!(seg.duration() <= quantum);
        }

        // A run of back-to-back segments by one process only exceeds the
        // quantum if it ends in completion.
        let segs = &out.timeline.segments;
        let mut i = 0;
        while i < segs.len() {
            let mut j = i;
            let mut span = segs[i].duration();
            while j + 1 < segs.len()
                && segs[j + 1].process_id == segs[i].process_id
                && segs[j + 1].start_time == segs[j].end_time
            {
                j += 1;
                span += segs[j].duration();
            }
            if span > quantum {
                if let Some(id) = segs[i].process_id.as_deref() {
                    assert_eq!(out.result_for(id).unwrap().completion_time, segs[j].end_time);
                }
            }
            i = j + 1;
        }
    }

    #[test]
    fn test_priority_runs_minimum_at_every_tick() {
        let processes = vec![
            Process::new("P1", 0, 6).with_priority(4),
            Process::new("P2", 1, 3).with_priority(2),
            Process::new("P3", 2, 2).with_priority(0),
            Process::new("P4", 8, 2).with_priority(1),
        ];
        let out = engine().run(&processes, SchedulingPolicy::Priority).unwrap();

        for t in 0..out.timeline.makespan() {
            let Some(running) = out.timeline.running_at(t) else {
                continue;
            };
            let running_priority = processes.iter().find(|p| p.id == running).unwrap().priority;
            let best = processes
                .iter()
                .filter(|p| p.arrival_time <= t && out.result_for(&p.id).unwrap().completion_time > t)
                .map(|p| p.priority)
                .min()
                .unwrap();
            assert_eq!(running_priority, best, "tick {t}");
        }
    }

    #[test]
    fn test_outcome_kpi() {
        let out = engine().run(&textbook(), SchedulingPolicy::RoundRobin).unwrap();
        let kpi = out.kpi();
        assert_eq!(kpi.makespan, 16);
        assert!((kpi.avg_waiting_time - out.average_waiting_time()).abs() < 1e-10);
        assert!((kpi.cpu_utilization - 1.0).abs() < 1e-10);
        assert_eq!(kpi.context_switches, 8);
    }

    #[test]
    fn test_policy_metadata() {
        assert_eq!(SchedulingPolicy::RoundRobin.to_string(), "RR");
        assert!(SchedulingPolicy::Priority.is_preemptive());
        assert!(!SchedulingPolicy::Sjf.is_preemptive());
        assert!(SchedulingPolicy::RoundRobin.requires_quantum());
        assert!(!SchedulingPolicy::Fcfs.requires_quantum());
    }

    #[test]
    fn test_clock_overflow_is_invalid_input() {
        let engine = SchedulingEngine::new().with_quantum(2);
        let far = [Process::new("P1", Ticks::MAX, 1)];
        let crowded = [Process::new("P1", Ticks::MAX - 3, 2), Process::new("P2", 0, 2)];
        for policy in SchedulingPolicy::ALL {
            for input in [&far[..], &crowded[..]] {
                let err = engine.run(input, policy).unwrap_err();
                assert_eq!(err.validation_errors()[0].kind, ValidationErrorKind::TimeOverflow);
            }
        }
    }

    #[test]
    fn test_late_arrival_near_clock_limit() {
        let engine = SchedulingEngine::new().with_quantum(2);
        let processes = [Process::new("P1", Ticks::MAX - 4, 4)];
        for policy in SchedulingPolicy::ALL {
            let outcome = engine.run(&processes, policy).unwrap();
            assert_eq!(outcome.results[0].completion_time, Ticks::MAX);
            assert_eq!(outcome.timeline.idle_time(), Ticks::MAX - 4);
        }
    }
}
