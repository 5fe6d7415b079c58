//! Round-robin scheduler with a fixed quantum.
//!
//! # Algorithm
//!
//! 1. Order processes by `(arrival, declaration order)`; this is the
//!    admission pool. Admit everything that has arrived at t=0.
//! 2. Pop the head of the ready queue and run it for
//!    `min(quantum, remaining)` units as one timeline run.
//! 3. Admit every process that arrived during that run, in pool order.
//! 4. Re-queue the process that just ran, behind the newcomers, unless it
//!    finished.
//! 5. With an empty ready queue, jump the clock to the next pool arrival.
//!
//! # Reference
//! Silberschatz, Galvin & Gagne, "Operating System Concepts", §5.3.4

use std::collections::VecDeque;
use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};

use super::{CpuScheduler, SimulationResult};
use crate::dispatching::{RuleEngine, TieBreaker};
use crate::models::{Process, ProcessRecord, Timeline};
use crate::validation::{ValidationError, ValidationErrorKind};

/// Maximum CPU slice granted per round-robin turn. Always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Quantum(i64);

impl Quantum {
    /// Validates a quantum; anything below 1 is rejected.
    pub fn new(units: i64) -> Result<Self, ValidationError> {
        if units <= 0 {
            return Err(ValidationError::new(
                ValidationErrorKind::InvalidQuantum,
                format!("Quantum must be a positive integer, got {units}"),
            ));
        }
        Ok(Self(units))
    }

    /// Slice length in time units.
    #[inline]
    pub fn get(self) -> i64 {
        self.0
    }
}

impl TryFrom<i64> for Quantum {
    type Error = ValidationError;

    fn try_from(units: i64) -> Result<Self, Self::Error> {
        Self::new(units)
    }
}

impl From<Quantum> for i64 {
    fn from(q: Quantum) -> Self {
        q.0
    }
}

impl fmt::Display for Quantum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// FIFO ready queue fed from an arrival-ordered admission pool.
///
/// Each process is admitted at most once; the pool owns "not yet
/// admitted" and the queue owns "ready", so membership never needs a
/// separate flag.
#[derive(Debug, Clone, Default)]
pub struct ReadyQueue {
    pool: VecDeque<usize>,
    ready: VecDeque<usize>,
}

impl ReadyQueue {
    /// Creates a queue whose pool holds `admission_order`.
    ///
    /// `admission_order` must be sorted by arrival time.
    pub fn new(admission_order: impl IntoIterator<Item = usize>) -> Self {
        Self {
            pool: admission_order.into_iter().collect(),
            ready: VecDeque::new(),
        }
    }

    /// Moves every pooled process that has arrived by `clock` to the back of
    /// the ready queue. Returns how many were admitted.
    pub fn admit(&mut self, records: &[ProcessRecord], clock: i64) -> usize {
        let mut admitted = 0;
        while let Some(&idx) = self.pool.front() {
            if !records[idx].has_arrived(clock) {
                break;
            }
            self.pool.pop_front();
            self.ready.push_back(idx);
            admitted += 1;
        }
        admitted
    }

    /// Arrival time of the next pooled process.
    pub fn next_arrival(&self, records: &[ProcessRecord]) -> Option<i64> {
        self.pool.front().map(|&idx| records[idx].process.arrival_time)
    }

    /// Takes the head of the ready queue.
    pub fn pop(&mut self) -> Option<usize> {
        self.ready.pop_front()
    }

    /// Re-queues a process at the back.
    pub fn requeue(&mut self, idx: usize) {
        self.ready.push_back(idx);
    }
}

/// Round-robin scheduler.
///
/// # Example
///
/// ```
/// use cpu_schedule::models::{Process, Segment};
/// use cpu_schedule::scheduler::{CpuScheduler, Quantum, RoundRobinScheduler};
///
/// let processes = vec![Process::new("P1", 5), Process::new("P2", 3)];
/// let rr = RoundRobinScheduler::new(Quantum::new(2).unwrap());
/// let result = rr.run(&processes);
/// assert_eq!(result.timeline.segments()[1], Segment::new("P2", 2, 4));
/// assert_eq!(result.timeline.len(), 5);
/// ```
#[derive(Debug, Clone)]
pub struct RoundRobinScheduler {
    quantum: Quantum,
    rule_engine: RuleEngine,
}

impl RoundRobinScheduler {
    /// Creates a round-robin scheduler breaking arrival ties by declaration order.
    pub fn new(quantum: Quantum) -> Self {
        Self {
            quantum,
            rule_engine: RuleEngine::arrival_order(TieBreaker::default()),
        }
    }

    /// Sets the final tie-breaker used to order simultaneous arrivals.
    pub fn with_tie_breaker(mut self, tie_breaker: TieBreaker) -> Self {
        self.rule_engine = RuleEngine::arrival_order(tie_breaker);
        self
    }
}

impl CpuScheduler for RoundRobinScheduler {
    fn name(&self) -> String {
        format!("RR (q={})", self.quantum)
    }

    fn run(&self, processes: &[Process]) -> SimulationResult {
        let mut records = ProcessRecord::from_processes(processes);
        let mut timeline = Timeline::new();
        let admission_order: Vec<usize> = self
            .rule_engine
            .sort_indices(&records)
            .into_iter()
            .filter(|&idx| !records[idx].is_finished())
            .collect();
        let mut remaining = admission_order.len();
        let mut queue = ReadyQueue::new(admission_order);
        let mut clock = 0;

        queue.admit(&records, clock);

        while remaining > 0 {
            let Some(idx) = queue.pop() else {
                // Nothing ready: every unfinished process is still pooled
                let Some(arrival) = queue.next_arrival(&records) else {
                    break;
                };
                debug!("RR: CPU idle from t={clock} to t={arrival}");
                clock = clock.max(arrival);
                queue.admit(&records, clock);
                continue;
            };

            let record = &mut records[idx];
            record.mark_started(clock);
            let ran = record.execute(self.quantum.get());
            timeline.record(&record.process.id, clock, clock + ran);
            debug!("RR: {} runs t={clock}..{}", record.id(), clock + ran);
            clock += ran;

            let finished = record.is_finished();
            if finished {
                record.complete_at(clock);
                remaining -= 1;
            }

            // Newcomers queue ahead of the process that just yielded
            queue.admit(&records, clock);
            if !finished {
                queue.requeue(idx);
            }
        }

        SimulationResult::new(self.name(), records, timeline)
    }
}
