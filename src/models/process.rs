//! Process model.
//!
//! A [`Process`] is the static description of a job as read from input.
//! A [`ProcessRecord`] is the per-run view an algorithm mutates while it
//! simulates: remaining work plus the derived timing metrics.
//!
//! Keeping the two apart means every algorithm run starts from its own
//! fresh records and the shared input is never written to.

use serde::{Deserialize, Serialize};

/// A process (job) to be scheduled on the virtual CPU.
///
/// # Time Representation
/// All times are integer time units relative to the simulation epoch (t=0).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Process {
    /// Unique process identifier.
    pub id: String,
    /// Time at which the process becomes eligible for the CPU.
    pub arrival_time: i64,
    /// Total CPU time the process requires.
    pub burst_time: i64,
    /// Scheduling priority (lower = more urgent).
    pub priority: i32,
}

impl Process {
    /// Creates a process that arrives at t=0 with priority 0.
    pub fn new(id: impl Into<String>, burst_time: i64) -> Self {
        Self {
            id: id.into(),
            arrival_time: 0,
            burst_time,
            priority: 0,
        }
    }

    /// Sets the arrival time.
    pub fn with_arrival(mut self, arrival_time: i64) -> Self {
        self.arrival_time = arrival_time;
        self
    }

    /// Sets the priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }
}

/// Simulation state and derived metrics for one process in one run.
///
/// Every derived field stays `None` until the simulation sets it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessRecord {
    /// The static input this record was created from.
    pub process: Process,
    /// CPU time still owed to the process.
    pub remaining_time: i64,
    /// Time of first CPU acquisition.
    pub start_time: Option<i64>,
    /// Time the last unit of work finished.
    pub completion_time: Option<i64>,
    /// `completion - arrival`.
    pub turnaround_time: Option<i64>,
    /// `turnaround - burst`.
    pub waiting_time: Option<i64>,
    /// `start - arrival`.
    pub response_time: Option<i64>,
}

impl ProcessRecord {
    /// Creates a fresh record with `remaining_time = burst_time`.
    ///
    /// A burst that is not positive leaves nothing to run, so the record is
    /// finished from the start.
    pub fn new(process: &Process) -> Self {
        Self {
            process: process.clone(),
            remaining_time: process.burst_time.max(0),
            start_time: None,
            completion_time: None,
            turnaround_time: None,
            waiting_time: None,
            response_time: None,
        }
    }

    /// Builds one fresh record per input process, preserving order.
    pub fn from_processes(processes: &[Process]) -> Vec<Self> {
        processes.iter().map(Self::new).collect()
    }

    /// Process identifier.
    #[inline]
    pub fn id(&self) -> &str {
        &self.process.id
    }

    /// Whether the process has arrived by `time`.
    #[inline]
    pub fn has_arrived(&self, time: i64) -> bool {
        self.process.arrival_time <= time
    }

    /// Whether the process still needs CPU time.
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.remaining_time == 0
    }

    /// Eligible at `time`: arrived and unfinished.
    #[inline]
    pub fn is_ready(&self, time: i64) -> bool {
        self.has_arrived(time) && !self.is_finished()
    }

    /// Records the first CPU acquisition. Later calls are ignored.
    pub fn mark_started(&mut self, time: i64) {
        if self.start_time.is_none() {
            self.start_time = Some(time);
        }
    }

    /// Consumes up to `units` of remaining work and returns how many were used.
    pub fn execute(&mut self, units: i64) -> i64 {
        let used = units.min(self.remaining_time);
        self.remaining_time -= used;
        used
    }

    /// Sets completion and derives turnaround, waiting and response time.
    ///
    /// Called exactly once, after [`mark_started`](Self::mark_started) and
    /// when `remaining_time` has reached zero.
    pub fn complete_at(&mut self, time: i64) {
        debug_assert!(self.start_time.is_some(), "{} completed without starting", self.id());
        debug_assert!(self.is_finished());
        debug_assert!(self.completion_time.is_none());

        let turnaround = time - self.process.arrival_time;

        self.completion_time = Some(time);
        self.turnaround_time = Some(turnaround);
        self.waiting_time = Some(turnaround - self.process.burst_time);
        self.response_time = self.start_time.map(|start| start - self.process.arrival_time);
    }

    /// Whether all derived metrics are populated.
    pub fn is_complete(&self) -> bool {
        self.completion_time.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_builder() {
        let p = Process::new("P1", 5).with_arrival(3).with_priority(2);
        assert_eq!(p.id, "P1");
        assert_eq!(p.arrival_time, 3);
        assert_eq!(p.burst_time, 5);
        assert_eq!(p.priority, 2);
    }

    #[test]
    fn test_record_starts_unset() {
        let r = ProcessRecord::new(&Process::new("P1", 4));
        assert_eq!(r.remaining_time, 4);
        assert!(r.start_time.is_none());
        assert!(r.completion_time.is_none());
        assert!(!r.is_complete());
    }

    #[test]
    fn test_mark_started_only_once() {
        let mut r = ProcessRecord::new(&Process::new("P1", 4));
        r.mark_started(2);
        r.mark_started(7);
        assert_eq!(r.start_time, Some(2));
    }

    #[test]
    fn test_execute_clamps_to_remaining() {
        let mut r = ProcessRecord::new(&Process::new("P1", 3));
        assert_eq!(r.execute(2), 2);
        assert_eq!(r.execute(2), 1);
        assert!(r.is_finished());
    }

    #[test]
    fn test_complete_derives_metrics() {
        let mut r = ProcessRecord::new(&Process::new("P2", 3).with_arrival(1));
        r.mark_started(5);
        r.execute(3);
        r.complete_at(8);

        assert_eq!(r.completion_time, Some(8));
        assert_eq!(r.turnaround_time, Some(7));
        assert_eq!(r.waiting_time, Some(4));
        assert_eq!(r.response_time, Some(4));
        assert!(r.is_complete());
    }

    #[test]
    fn test_non_positive_burst_is_finished() {
        let zero = ProcessRecord::new(&Process::new("Z", 0));
        let negative = ProcessRecord::new(&Process::new("N", -4));
        assert!(zero.is_finished());
        assert_eq!(negative.remaining_time, 0);
        assert!(!negative.is_ready(10));
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "completed without starting")]
    fn test_complete_requires_start() {
        let mut r = ProcessRecord::new(&Process::new("P1", 1));
        r.execute(1);
        r.complete_at(1);
    }

    #[test]
    fn test_readiness() {
        let r = ProcessRecord::new(&Process::new("P1", 2).with_arrival(3));
        assert!(!r.is_ready(2));
        assert!(r.is_ready(3));
    }
}
