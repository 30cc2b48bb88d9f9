//! Per-run scheduling state.
//!
//! Every call to the engine builds a fresh `RunState` from the caller's
//! processes. Policies only ever mutate this copy.

use crate::models::{Process, ScheduleResult, Ticks, Timeline, TimelineSegment};

/// Mutable state of one scheduling run: the CPU clock, each process's
/// remaining work, and the timeline built so far.
#[derive(Debug, Clone)]
pub(crate) struct RunState {
    pub(crate) processes: Vec<Process>,
    pub(crate) clock: Ticks,
    pub(crate) timeline: Timeline,
    start_times: Vec<Option<Ticks>>,
    completion_times: Vec<Option<Ticks>>,
    coalesce: bool,
}

impl RunState {
    /// Copies `input` and resets every `remaining_time` to the full burst.
    ///
    /// With `coalesce`, consecutive runs of the same process merge into a
    /// single timeline segment.
    pub(crate) fn new(input: &[Process], coalesce: bool) -> Self {
        let processes: Vec<Process> = input
            .iter()
            .cloned()
            .map(|mut p| {
                p.reset();
                p
            })
            .collect();
        let n = processes.len();
        Self {
            processes,
            clock: 0,
            timeline: Timeline::new(),
            start_times: vec![None; n],
            completion_times: vec![None; n],
            coalesce,
        }
    }

    /// Indices of arrived, unfinished processes at the current clock.
    pub(crate) fn ready(&self) -> impl Iterator<Item = usize> + '_ {
        self.processes
            .iter()
            .enumerate()
            .filter(|(_, p)| p.has_arrived(self.clock) && !p.is_complete())
            .map(|(i, _)| i)
    }

    /// Earliest arrival among unfinished processes not yet in the system.
    pub(crate) fn next_arrival(&self) -> Option<Ticks> {
        self.processes
            .iter()
            .filter(|p| !p.is_complete() && !p.has_arrived(self.clock))
            .map(|p| p.arrival_time)
            .min()
    }

    /// Whether every process has finished.
    pub(crate) fn is_finished(&self) -> bool {
        self.processes.iter().all(Process::is_complete)
    }

    /// Idles the CPU until `time`. No-op if `time` is not in the future.
    pub(crate) fn advance_to(&mut self, time: Ticks) {
        if time > self.clock {
            self.timeline.push(TimelineSegment::idle(self.clock, time));
            self.clock = time;
        }
    }

    /// Runs process `idx` for `units` ticks (capped at its remaining work).
    ///
    /// Returns `true` if the process completed.
    pub(crate) fn execute(&mut self, idx: usize, units: Ticks) -> bool {
        let start = self.clock;
        let process = &mut self.processes[idx];
        let units = units.min(process.remaining_time);
        process.remaining_time -= units;
        // `validate_processes` bounds the clock by last arrival + total burst.
        let end = start.saturating_add(units);

        if self.coalesce {
            self.timeline.extend(Some(process.id.as_str()), start, end);
        } else {
            self.timeline
                .push(TimelineSegment::busy(process.id.clone(), start, end));
        }

        self.start_times[idx].get_or_insert(start);
        self.clock = end;

        if process.is_complete() {
            self.completion_times[idx] = Some(end);
            true
        } else {
            false
        }
    }

    /// Per-process results in input order, plus the timeline.
    pub(crate) fn finish(self) -> (Vec<ScheduleResult>, Timeline) {
        let results = self
            .processes
            .iter()
            .zip(self.start_times)
            .zip(self.completion_times)
            .filter_map(|((p, start), completion)| {
                Some(ScheduleResult::from_completion(p, start?, completion?))
            })
            .collect();
        (results, self.timeline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_resets_remaining() {
        let mut p = Process::new("P1", 0, 3);
        p.remaining_time = 0;
        let state = RunState::new(&[p], false);
        assert_eq!(state.processes[0].remaining_time, 3);
        assert!(!state.is_finished());
    }

    #[test]
    fn test_advance_to_emits_idle() {
        let mut state = RunState::new(&[Process::new("P1", 4, 1)], false);
        assert_eq!(state.ready().count(), 0);
        assert_eq!(state.next_arrival(), Some(4));

        state.advance_to(4);
        state.advance_to(2); // past: ignored
        assert_eq!(state.clock, 4);
        assert_eq!(state.timeline.segments, vec![TimelineSegment::idle(0, 4)]);
        assert_eq!(state.ready().collect::<Vec<_>>(), vec![0]);
    }

    #[test]
    fn test_execute_caps_and_completes() {
        let mut state = RunState::new(&[Process::new("P1", 0, 3)], false);
        assert!(!state.execute(0, 2));
        assert!(state.execute(0, 5));
        assert_eq!(state.clock, 3);
        assert!(state.is_finished());

        let (results, timeline) = state.finish();
        assert_eq!(results[0].start_time, 0);
        assert_eq!(results[0].completion_time, 3);
        assert_eq!(timeline.len(), 2);
    }

    #[test]
    fn test_execute_coalesces_when_enabled() {
        let mut state = RunState::new(&[Process::new("P1", 0, 3)], true);
        state.execute(0, 1);
        state.execute(0, 1);
        state.execute(0, 1);
        assert_eq!(state.timeline.segments, vec![TimelineSegment::busy("P1", 0, 3)]);
    }
}
