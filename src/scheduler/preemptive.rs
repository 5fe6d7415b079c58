//! Unit-stepped preemptive schedulers: SRTF and preemptive priority.
//!
//! # Algorithm
//!
//! At every time unit:
//! 1. Collect processes that have arrived and still need CPU time.
//! 2. Select one by the rule engine key; run it for exactly one unit.
//! 3. Extend the last timeline segment if the same process ran the
//!    previous unit, otherwise open a new one.
//! 4. Complete the process as soon as its remaining time reaches zero.
//!
//! An empty ready set jumps the clock to the next arrival; idle time is
//! never stepped through.
//!
//! # Complexity
//! O(B · n) where B = total burst.

use log::{debug, trace};

use super::non_preemptive::next_arrival;
use super::{CpuScheduler, SimulationResult};
use crate::dispatching::{rules, RuleEngine, TieBreaker};
use crate::models::{Process, ProcessRecord, Timeline};

/// Preemptive scheduler re-evaluating its rule key every time unit.
///
/// # Example
///
/// ```
/// use cpu_schedule::models::Process;
/// use cpu_schedule::scheduler::{CpuScheduler, PreemptiveScheduler};
/// use cpu_schedule::dispatching::TieBreaker;
///
/// let processes = vec![
///     Process::new("long", 6),
///     Process::new("short", 1).with_arrival(2),
/// ];
/// let result = PreemptiveScheduler::shortest_remaining_time(TieBreaker::default())
///     .run(&processes);
/// assert_eq!(result.timeline.len(), 3);
/// assert_eq!(result.records[1].response_time, Some(0));
/// ```
#[derive(Debug, Clone)]
pub struct PreemptiveScheduler {
    name: &'static str,
    rule_engine: RuleEngine,
}

impl PreemptiveScheduler {
    /// Shortest remaining time first: key `(remaining, arrival, order)`.
    pub fn shortest_remaining_time(tie_breaker: TieBreaker) -> Self {
        Self {
            name: "SRTF",
            rule_engine: RuleEngine::keyed_by(rules::ShortestRemaining, tie_breaker),
        }
    }

    /// Preemptive priority: key `(priority, arrival, order)`.
    pub fn priority(tie_breaker: TieBreaker) -> Self {
        Self {
            name: "PRIO_P",
            rule_engine: RuleEngine::keyed_by(rules::Priority, tie_breaker),
        }
    }
}

impl CpuScheduler for PreemptiveScheduler {
    fn name(&self) -> String {
        self.name.to_string()
    }

    fn run(&self, processes: &[Process]) -> SimulationResult {
        let mut records = ProcessRecord::from_processes(processes);
        let mut timeline = Timeline::new();
        let mut remaining = records.iter().filter(|r| !r.is_finished()).count();
        let mut clock = 0;
        let mut running: Option<usize> = None;

        while remaining > 0 {
            let ready = (0..records.len()).filter(|&i| records[i].is_ready(clock));
            let Some(idx) = self.rule_engine.select_best(&records, ready) else {
                let Some(arrival) = next_arrival(&records) else {
                    break;
                };
                debug!("{}: CPU idle from t={clock} to t={arrival}", self.name);
                running = None;
                clock = arrival;
                continue;
            };

            if running != Some(idx) {
                debug!("{}: dispatch {} at t={clock}", self.name, records[idx].id());
                running = Some(idx);
            }

            let record = &mut records[idx];
            trace!("{}: {} runs t={clock}..{}", self.name, record.id(), clock + 1);
            record.mark_started(clock);
            record.execute(1);
            timeline.record(&record.process.id, clock, clock + 1);
            clock += 1;

            if record.is_finished() {
                record.complete_at(clock);
                remaining -= 1;
                debug!("{}: {} completes at t={clock}", self.name, record.id());
            }
        }

        SimulationResult::new(self.name(), records, timeline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Segment;

    fn process(id: &str, arrival: i64, burst: i64, priority: i32) -> Process {
        Process::new(id, burst)
            .with_arrival(arrival)
            .with_priority(priority)
    }

    fn srtf() -> PreemptiveScheduler {
        PreemptiveScheduler::shortest_remaining_time(TieBreaker::default())
    }

    #[test]
    fn test_srtf_preempts_longer_job() {
        let processes = vec![
            process("P1", 0, 8, 0),
            process("P2", 1, 4, 0),
            process("P3", 2, 2, 0),
        ];
        let result = srtf().run(&processes);

        // P2 preempts P1 at t=1; P3 (2) beats P2 (3 left) at t=2
        assert_eq!(
            result.timeline.segments(),
            &[
                Segment::new("P1", 0, 1),
                Segment::new("P2", 1, 2),
                Segment::new("P3", 2, 4),
                Segment::new("P2", 4, 7),
                Segment::new("P1", 7, 14),
            ]
        );
        assert_eq!(result.records[0].completion_time, Some(14));
        assert_eq!(result.records[0].response_time, Some(0));
        assert_eq!(result.records[2].waiting_time, Some(0));
    }

    #[test]
    fn test_srtf_tie_keeps_earlier_arrival() {
        // At t=2 both have 3 units left; P1 arrived first and keeps the CPU
        let processes = vec![process("P1", 0, 5, 0), process("P2", 2, 3, 0)];
        let result = srtf().run(&processes);

        assert_eq!(
            result.timeline.segments(),
            &[Segment::new("P1", 0, 5), Segment::new("P2", 5, 8)]
        );
    }

    #[test]
    fn test_srtf_idle_steps() {
        let processes = vec![process("P1", 2, 2, 0), process("P2", 6, 1, 0)];
        let result = srtf().run(&processes);

        assert_eq!(
            result.timeline.segments(),
            &[Segment::new("P1", 2, 4), Segment::new("P2", 6, 7)]
        );
        assert_eq!(result.records[1].response_time, Some(0));
    }

    #[test]
    fn test_priority_preempts_at_arrival() {
        let processes = vec![
            process("low", 0, 4, 5),
            process("high", 2, 2, 1),
        ];
        let result = PreemptiveScheduler::priority(TieBreaker::default()).run(&processes);

        assert_eq!(
            result.timeline.segments(),
            &[
                Segment::new("low", 0, 2),
                Segment::new("high", 2, 4),
                Segment::new("low", 4, 6),
            ]
        );
        assert_eq!(result.records[0].waiting_time, Some(2));
        assert_eq!(result.records[1].turnaround_time, Some(2));
    }

    #[test]
    fn test_priority_equal_does_not_preempt() {
        let processes = vec![process("first", 0, 3, 2), process("second", 1, 1, 2)];
        let result = PreemptiveScheduler::priority(TieBreaker::default()).run(&processes);

        assert_eq!(result.timeline.segments()[0], Segment::new("first", 0, 3));
    }

    #[test]
    fn test_no_consecutive_duplicate_segments() {
        let processes = vec![
            process("A", 0, 3, 1),
            process("B", 1, 3, 1),
            process("C", 2, 3, 1),
        ];
        let result = srtf().run(&processes);
        let segs = result.timeline.segments();
        assert!(segs.windows(2).all(|w| w[0].process_id != w[1].process_id));
    }

    #[test]
    fn test_srtf_full_tie_by_id() {
        let processes = vec![process("B", 0, 3, 0), process("A", 0, 3, 0)];

        let result = srtf().run(&processes);
        assert_eq!(result.timeline.segments()[0], Segment::new("B", 0, 3));

        let by_id = PreemptiveScheduler::shortest_remaining_time(TieBreaker::ById).run(&processes);
        assert_eq!(
            by_id.timeline.segments(),
            &[Segment::new("A", 0, 3), Segment::new("B", 3, 6)]
        );
    }

    #[test]
    fn test_priority_full_tie_by_id() {
        let processes = vec![process("B", 0, 2, 1), process("A", 0, 2, 1)];
        let result = PreemptiveScheduler::priority(TieBreaker::ById).run(&processes);

        assert_eq!(
            result.timeline.segments(),
            &[Segment::new("A", 0, 2), Segment::new("B", 2, 4)]
        );
    }

    #[test]
    fn test_priority_tie_resolved_by_arrival() {
        // Declared first but arrives later: equal priority never preempts
        let processes = vec![process("late", 2, 2, 1), process("early", 1, 3, 1)];
        let result = PreemptiveScheduler::priority(TieBreaker::default()).run(&processes);

        assert_eq!(
            result.timeline.segments(),
            &[Segment::new("early", 1, 4), Segment::new("late", 4, 6)]
        );
        assert_eq!(result.records[0].waiting_time, Some(2));
    }

    #[test]
    fn test_idle_gap_splits_segments() {
        let processes = vec![process("A", 0, 2, 1), process("B", 5, 2, 1)];
        for scheduler in [srtf(), PreemptiveScheduler::priority(TieBreaker::default())] {
            let result = scheduler.run(&processes);
            assert_eq!(
                result.timeline.segments(),
                &[Segment::new("A", 0, 2), Segment::new("B", 5, 7)]
            );
            assert_eq!(result.timeline.context_switches(), 1);
        }
    }

    #[test]
    fn test_preempted_process_resumes_in_new_segment() {
        // "low" is preempted at t=1 and resumes once "high" is done
        let processes = vec![process("low", 0, 3, 5), process("high", 1, 1, 1)];
        let result = PreemptiveScheduler::priority(TieBreaker::default()).run(&processes);

        assert_eq!(
            result.timeline.segments(),
            &[
                Segment::new("low", 0, 1),
                Segment::new("high", 1, 2),
                Segment::new("low", 2, 4),
            ]
        );
        assert_eq!(result.timeline.segments_for("low").len(), 2);
    }

    #[test]
    fn test_idle_jumps_to_far_arrival() {
        let processes = vec![process("P1", 1_000_000_000_000, 2, 0)];
        let result = srtf().run(&processes);

        assert_eq!(
            result.timeline.segments(),
            &[Segment::new("P1", 1_000_000_000_000, 1_000_000_000_002)]
        );
    }

    #[test]
    fn test_empty_input() {
        let result = srtf().run(&[]);
        assert!(result.records.is_empty());
        assert!(result.timeline.is_empty());
    }
}
