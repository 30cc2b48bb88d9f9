//! First-Come, First-Served.
//!
//! Non-preemptive. Processes run to completion in `(arrival_time, id)`
//! order; the CPU idles whenever the next process has not arrived yet.

use tracing::debug;

use super::state::RunState;

/// Dispatch order: indices sorted by `(arrival_time, id)`.
pub(crate) fn dispatch_order(state: &RunState) -> Vec<usize> {
    let mut order: Vec<usize> = (0..state.processes.len()).collect();
    order.sort_by(|&a, &b| {
        let (pa, pb) = (&state.processes[a], &state.processes[b]);
        pa.arrival_time
            .cmp(&pb.arrival_time)
            .then_with(|| pa.id.cmp(&pb.id))
    });
    order
}

pub(crate) fn run(state: &mut RunState) {
    for idx in dispatch_order(state) {
        state.advance_to(state.processes[idx].arrival_time);
        debug!(process = %state.processes[idx].id, time = state.clock, "FCFS dispatch");
        let burst = state.processes[idx].burst_time;
        state.execute(idx, burst);
    }
}
