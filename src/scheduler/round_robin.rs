//! Round Robin (preemptive, fixed quantum).
//!
//! # Algorithm
//!
//! 1. Pending processes are admitted to a FIFO ready queue in
//!    `(arrival_time, id)` order once `arrival_time <= clock`.
//! 2. The head runs for `min(quantum, remaining_time)`.
//! 3. Everything that arrived up to the end of the slice is admitted
//!    *before* the preempted process is re-queued at the tail.
//! 4. An empty queue idles the CPU until the next arrival.

use std::collections::VecDeque;

use tracing::debug;

use super::fcfs;
use super::state::RunState;
use crate::models::Ticks;

/// Arrival-ordered admission cursor plus the ready queue.
struct ReadyQueue {
    pending: Vec<usize>,
    next: usize,
    queue: VecDeque<usize>,
}

impl ReadyQueue {
    fn new(state: &RunState) -> Self {
        Self {
            pending: fcfs::dispatch_order(state),
            next: 0,
            queue: VecDeque::new(),
        }
    }

    /// Moves every pending process with `arrival_time <= now` to the tail.
    fn admit(&mut self, state: &RunState) {
        while let Some(&idx) = self.pending.get(self.next) {
            if !state.processes[idx].has_arrived(state.clock) {
                break;
            }
            self.queue.push_back(idx);
            self.next += 1;
        }
    }

    fn next_pending_arrival(&self, state: &RunState) -> Option<Ticks> {
        self.pending
            .get(self.next)
            .map(|&idx| state.processes[idx].arrival_time)
    }
}

pub(crate) fn run(state: &mut RunState, quantum: Ticks) {
    let mut ready = ReadyQueue::new(state);

    loop {
        ready.admit(state);

        let Some(idx) = ready.queue.pop_front() else {
            match ready.next_pending_arrival(state) {
                Some(arrival) => {
                    state.advance_to(arrival);
                    continue;
                }
                None => break,
            }
        };

        debug!(
            process = %state.processes[idx].id,
            time = state.clock,
            remaining = state.processes[idx].remaining_time,
            "RR slice"
        );
        let completed = state.execute(idx, quantum);

        ready.admit(state);
        if !completed {
            ready.queue.push_back(idx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Process, TimelineSegment};

    #[test]
    fn test_arrivals_enqueue_before_preempted() {
        // P2 arrives exactly when P1's slice ends: P2 must run next.
        let mut state = RunState::new(&[Process::new("P1", 0, 4), Process::new("P2", 2, 2)], false);
        run(&mut state, 2);

        assert_eq!(
            state.timeline.segments,
            vec![
                TimelineSegment::busy("P1", 0, 2),
                TimelineSegment::busy("P2", 2, 4),
                TimelineSegment::busy("P1", 4, 6),
            ]
        );
    }

    #[test]
    fn test_simultaneous_arrivals_sorted_by_id() {
        let mut state = RunState::new(&[Process::new("B", 0, 1), Process::new("A", 0, 1)], false);
        run(&mut state, 3);
        assert_eq!(state.timeline.running_at(0), Some("A"));
        assert_eq!(state.timeline.running_at(1), Some("B"));
    }

    #[test]
    fn test_lone_process_gets_consecutive_slices() {
        let mut state = RunState::new(&[Process::new("P1", 0, 5)], false);
        run(&mut state, 2);
        let durations: Vec<Ticks> = state.timeline.segments.iter().map(|s| s.duration()).collect();
        assert_eq!(durations, vec![2, 2, 1]);
    }

    #[test]
    fn test_idle_until_next_arrival() {
        let mut state = RunState::new(&[Process::new("P1", 0, 1), Process::new("P2", 4, 1)], false);
        run(&mut state, 2);
        assert_eq!(state.timeline.segments[1], TimelineSegment::idle(1, 4));
        assert!(state.is_finished());
    }
}
