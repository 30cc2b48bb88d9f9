//! Shortest Job First (non-preemptive).
//!
//! At every scheduling point the arrived process with the smallest burst
//! runs to completion. Ties break on `arrival_time`, then `id`.
//!
//! # Reference
//! Smith (1956): SPT minimizes mean flow time on a single machine.

use tracing::debug;

use super::state::RunState;

/// Picks the next job among arrived, unfinished processes.
pub(crate) fn select(state: &RunState) -> Option<usize> {
    state.ready().min_by(|&a, &b| {
        let (pa, pb) = (&state.processes[a], &state.processes[b]);
        pa.burst_time
            .cmp(&pb.burst_time)
            .then_with(|| pa.arrival_time.cmp(&pb.arrival_time))
            .then_with(|| pa.id.cmp(&pb.id))
    })
}

pub(crate) fn run(state: &mut RunState) {
    while !state.is_finished() {
        match select(state) {
            Some(idx) => {
                debug!(process = %state.processes[idx].id, time = state.clock, "SJF dispatch");
                let burst = state.processes[idx].burst_time;
                state.execute(idx, burst);
            }
            None => match state.next_arrival() {
                Some(arrival) => state.advance_to(arrival),
                None => break,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Process;

    #[test]
    fn test_select_shortest_then_arrival_then_id() {
        let mut state = RunState::new(
            &[
                Process::new("P1", 0, 7),
                Process::new("P2", 2, 4),
                Process::new("P4", 5, 4),
                Process::new("P0", 5, 4),
            ],
            false,
        );
        state.clock = 7;
        state.processes[0].remaining_time = 0;
        // P2 arrived earlier than P0/P4 with the same burst.
        assert_eq!(select(&state), Some(1));

        state.processes[1].remaining_time = 0;
        // P0 and P4 tie on burst and arrival: lowest id wins.
        assert_eq!(select(&state), Some(3));
    }

    #[test]
    fn test_select_none_before_arrival() {
        let state = RunState::new(&[Process::new("P1", 3, 2)], false);
        assert_eq!(select(&state), None);
    }

    #[test]
    fn test_sjf_is_non_preemptive() {
        // P2 arrives while P1 runs and is shorter, but must wait.
        let mut state = RunState::new(&[Process::new("P1", 0, 5), Process::new("P2", 1, 1)], false);
        run(&mut state);
        assert_eq!(state.timeline.segments_for("P1").len(), 1);
        assert_eq!(state.timeline.running_at(5), Some("P2"));
    }
}
