//! Non-preemptive schedulers: FCFS, SJF and priority.
//!
//! # Algorithm
//!
//! Once a process gets the CPU it keeps it for its whole burst, so every
//! process produces exactly one timeline segment.
//!
//! - **FCFS** sorts once by arrival and dispatches in that fixed order.
//! - **SJF / priority** re-select at every decision point (CPU free) among
//!   the processes that have arrived, by the rule engine's key. When none
//!   has arrived the clock jumps to the earliest pending arrival.
//!
//! # Complexity
//! FCFS: O(n log n). SJF / priority: O(n²) from the linear eligibility scan.

use log::debug;

use super::{CpuScheduler, SimulationResult};
use crate::dispatching::{rules, RuleEngine, TieBreaker};
use crate::models::{Process, ProcessRecord, Timeline};

/// First-come-first-served scheduler.
///
/// # Example
///
/// ```
/// use cpu_schedule::models::Process;
/// use cpu_schedule::scheduler::{CpuScheduler, FcfsScheduler};
///
/// let processes = vec![
///     Process::new("P1", 5),
///     Process::new("P2", 3).with_arrival(1),
/// ];
/// let result = FcfsScheduler::new().run(&processes);
/// assert_eq!(result.timeline.end_time(), 8);
/// assert_eq!(result.records[1].waiting_time, Some(4));
/// ```
#[derive(Debug, Clone)]
pub struct FcfsScheduler {
    rule_engine: RuleEngine,
}

impl FcfsScheduler {
    /// Creates a FCFS scheduler breaking full ties by declaration order.
    pub fn new() -> Self {
        Self::with_tie_breaker(TieBreaker::default())
    }

    /// Creates a FCFS scheduler with the given final tie-breaker.
    pub fn with_tie_breaker(tie_breaker: TieBreaker) -> Self {
        Self {
            rule_engine: RuleEngine::arrival_order(tie_breaker),
        }
    }
}

impl Default for FcfsScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl CpuScheduler for FcfsScheduler {
    fn name(&self) -> String {
        "FCFS".to_string()
    }

    fn run(&self, processes: &[Process]) -> SimulationResult {
        let mut records = ProcessRecord::from_processes(processes);
        let mut timeline = Timeline::new();
        let mut clock = 0;

        for idx in self.rule_engine.sort_indices(&records) {
            let record = &mut records[idx];
            if record.is_finished() {
                continue;
            }
            // Idle until the next process arrives
            clock = clock.max(record.process.arrival_time);
            run_to_completion(record, clock, &mut timeline);
            clock += record.process.burst_time;
        }

        SimulationResult::new(self.name(), records, timeline)
    }
}

/// Non-preemptive scheduler selecting by a rule key at each decision point.
///
/// Used for shortest-job-first and non-preemptive priority scheduling.
#[derive(Debug, Clone)]
pub struct NonPreemptiveScheduler {
    name: &'static str,
    rule_engine: RuleEngine,
}

impl NonPreemptiveScheduler {
    /// Shortest job first: key `(burst, arrival, order)`.
    pub fn shortest_job_first(tie_breaker: TieBreaker) -> Self {
        Self {
            name: "SJF",
            rule_engine: RuleEngine::keyed_by(rules::ShortestBurst, tie_breaker),
        }
    }

    /// Non-preemptive priority: key `(priority, arrival, order)`.
    pub fn priority(tie_breaker: TieBreaker) -> Self {
        Self {
            name: "PRIO_NP",
            rule_engine: RuleEngine::keyed_by(rules::Priority, tie_breaker),
        }
    }
}

impl CpuScheduler for NonPreemptiveScheduler {
    fn name(&self) -> String {
        self.name.to_string()
    }

    fn run(&self, processes: &[Process]) -> SimulationResult {
        let mut records = ProcessRecord::from_processes(processes);
        let mut timeline = Timeline::new();
        let mut clock = 0;

        loop {
            let ready = (0..records.len()).filter(|&i| records[i].is_ready(clock));
            match self.rule_engine.select_best(&records, ready) {
                Some(idx) => {
                    let record = &mut records[idx];
                    run_to_completion(record, clock, &mut timeline);
                    clock += record.process.burst_time;
                }
                None => match next_arrival(&records) {
                    Some(arrival) => {
                        debug!("{}: CPU idle from t={clock} to t={arrival}", self.name);
                        clock = arrival;
                    }
                    None => break,
                },
            }
        }

        SimulationResult::new(self.name(), records, timeline)
    }
}

/// Earliest arrival among unfinished records.
pub(crate) fn next_arrival(records: &[ProcessRecord]) -> Option<i64> {
    records
        .iter()
        .filter(|r| !r.is_finished())
        .map(|r| r.process.arrival_time)
        .min()
}

fn run_to_completion(record: &mut ProcessRecord, clock: i64, timeline: &mut Timeline) {
    let end = clock + record.process.burst_time;
    debug!("dispatch {} at t={clock}, runs until t={end}", record.id());

    record.mark_started(clock);
    record.execute(record.process.burst_time);
    record.complete_at(end);
    timeline.record(&record.process.id, clock, end);
}
