//! Built-in dispatching rules.
//!
//! # Score Convention
//! All rules return lower scores for processes that should run first.

use super::{DispatchingRule, RuleScore};
use crate::models::ProcessRecord;

/// First In First Out: earliest arrival first.
#[derive(Debug, Clone, Copy)]
pub struct Fifo;

impl DispatchingRule for Fifo {
    fn name(&self) -> &'static str {
        "FIFO"
    }

    fn evaluate(&self, record: &ProcessRecord) -> RuleScore {
        record.process.arrival_time
    }

    fn description(&self) -> &'static str {
        "First In First Out"
    }
}

/// Shortest total burst first.
///
/// Minimizes mean waiting time among non-preemptive disciplines.
#[derive(Debug, Clone, Copy)]
pub struct ShortestBurst;

impl DispatchingRule for ShortestBurst {
    fn name(&self) -> &'static str {
        "SJF"
    }

    fn evaluate(&self, record: &ProcessRecord) -> RuleScore {
        record.process.burst_time
    }

    fn description(&self) -> &'static str {
        "Shortest Job First"
    }
}

/// Shortest remaining work first.
///
/// Identical to [`ShortestBurst`] before a process has run.
#[derive(Debug, Clone, Copy)]
pub struct ShortestRemaining;

impl DispatchingRule for ShortestRemaining {
    fn name(&self) -> &'static str {
        "SRTF"
    }

    fn evaluate(&self, record: &ProcessRecord) -> RuleScore {
        record.remaining_time
    }

    fn description(&self) -> &'static str {
        "Shortest Remaining Time First"
    }
}

/// Static priority: lower value = more urgent.
#[derive(Debug, Clone, Copy)]
pub struct Priority;

impl DispatchingRule for Priority {
    fn name(&self) -> &'static str {
        "PRIORITY"
    }

    fn evaluate(&self, record: &ProcessRecord) -> RuleScore {
        i64::from(record.process.priority)
    }

    fn description(&self) -> &'static str {
        "Process Priority"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Process;

    fn record(id: &str, arrival: i64, burst: i64, priority: i32) -> ProcessRecord {
        ProcessRecord::new(
            &Process::new(id, burst)
                .with_arrival(arrival)
                .with_priority(priority),
        )
    }

    #[test]
    fn test_fifo() {
        let first = record("first", 1, 5, 0);
        let second = record("second", 3, 1, 0);
        assert!(Fifo.evaluate(&first) < Fifo.evaluate(&second));
    }

    #[test]
    fn test_shortest_burst() {
        let short = record("short", 0, 2, 0);
        let long = record("long", 0, 9, 0);
        assert!(ShortestBurst.evaluate(&short) < ShortestBurst.evaluate(&long));
    }

    #[test]
    fn test_shortest_remaining_tracks_progress() {
        let mut ran = record("ran", 0, 9, 0);
        let fresh = record("fresh", 0, 4, 0);
        assert!(ShortestRemaining.evaluate(&fresh) < ShortestRemaining.evaluate(&ran));

        ran.execute(6);
        assert!(ShortestRemaining.evaluate(&ran) < ShortestRemaining.evaluate(&fresh));
        // Burst-based score is unaffected by progress
        assert!(ShortestBurst.evaluate(&fresh) < ShortestBurst.evaluate(&ran));
    }

    #[test]
    fn test_priority_lower_value_wins() {
        let urgent = record("urgent", 0, 5, 1);
        let relaxed = record("relaxed", 0, 5, 7);
        assert!(Priority.evaluate(&urgent) < Priority.evaluate(&relaxed));
    }

    #[test]
    fn test_negative_priority() {
        let negative = record("neg", 0, 5, -3);
        let zero = record("zero", 0, 5, 0);
        assert!(Priority.evaluate(&negative) < Priority.evaluate(&zero));
    }
}
