//! Preemptive priority scheduling.
//!
//! Re-evaluated every tick: among arrived, unfinished processes the lowest
//! `priority` value runs for one tick. Ties break on `remaining_time`
//! (shortest remaining first), then `id`. A newly arrived process with a
//! better priority therefore preempts mid-burst.
//!
//! Priorities are static and running only shrinks the leader's remaining
//! time, so the choice can change only when a process arrives or
//! completes. The loop runs the leader up to the next such event, which
//! yields the same timeline as stepping one tick at a time.

use tracing::debug;

use super::state::RunState;

/// Picks the process that owns the CPU for the next tick.
pub(crate) fn select(state: &RunState) -> Option<usize> {
    state.ready().min_by(|&a, &b| {
        let (pa, pb) = (&state.processes[a], &state.processes[b]);
        pa.priority
            .cmp(&pb.priority)
            .then_with(|| pa.remaining_time.cmp(&pb.remaining_time))
            .then_with(|| pa.id.cmp(&pb.id))
    })
}

pub(crate) fn run(state: &mut RunState) {
    let mut running: Option<usize> = None;

    while !state.is_finished() {
        match select(state) {
            Some(idx) => {
                if running != Some(idx) {
                    debug!(process = %state.processes[idx].id, time = state.clock, "Priority dispatch");
                    running = Some(idx);
                }
                let slice = match state.next_arrival() {
                    Some(arrival) => arrival - state.clock,
                    None => state.processes[idx].remaining_time,
                };
                state.execute(idx, slice);
            }
            None => match state.next_arrival() {
                Some(arrival) => {
                    running = None;
                    state.advance_to(arrival);
                }
                None => break,
            },
        }
    }
}
