//! Algorithm selection and run configuration.

use std::fmt;
use std::str::FromStr;

use log::info;
use serde::{Deserialize, Serialize};

use super::{
    CpuScheduler, FcfsScheduler, NonPreemptiveScheduler, PreemptiveScheduler, Quantum,
    RoundRobinScheduler, SimulationResult,
};
use crate::dispatching::TieBreaker;
use crate::models::Process;
use crate::validation::{validate_processes, ValidationError, ValidationErrorKind};

/// The six supported scheduling disciplines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Algorithm {
    /// First-come-first-served.
    Fcfs,
    /// Shortest job first (non-preemptive).
    Sjf,
    /// Shortest remaining time first.
    Srtf,
    /// Round robin (needs a quantum).
    RoundRobin,
    /// Priority, non-preemptive.
    PriorityNp,
    /// Priority, preemptive.
    PriorityP,
}

impl Algorithm {
    /// Every algorithm, in comparison-report order.
    pub const ALL: [Algorithm; 6] = [
        Algorithm::Fcfs,
        Algorithm::Sjf,
        Algorithm::Srtf,
        Algorithm::RoundRobin,
        Algorithm::PriorityNp,
        Algorithm::PriorityP,
    ];

    /// Short label used on the command line and in reports.
    pub fn label(self) -> &'static str {
        match self {
            Algorithm::Fcfs => "FCFS",
            Algorithm::Sjf => "SJF",
            Algorithm::Srtf => "SRTF",
            Algorithm::RoundRobin => "RR",
            Algorithm::PriorityNp => "PRIO_NP",
            Algorithm::PriorityP => "PRIO_P",
        }
    }

    /// Whether a running process can lose the CPU before finishing.
    pub fn is_preemptive(self) -> bool {
        matches!(
            self,
            Algorithm::Srtf | Algorithm::RoundRobin | Algorithm::PriorityP
        )
    }

    /// Whether the algorithm needs a quantum.
    pub fn needs_quantum(self) -> bool {
        self == Algorithm::RoundRobin
    }

    /// Builds the scheduler for this algorithm.
    ///
    /// `quantum` is only consulted for round robin, where it is required and
    /// must be positive.
    pub fn scheduler(
        self,
        quantum: Option<i64>,
        tie_breaker: TieBreaker,
    ) -> Result<Box<dyn CpuScheduler>, ValidationError> {
        let scheduler: Box<dyn CpuScheduler> = match self {
            Algorithm::Fcfs => Box::new(FcfsScheduler::with_tie_breaker(tie_breaker)),
            Algorithm::Sjf => Box::new(NonPreemptiveScheduler::shortest_job_first(tie_breaker)),
            Algorithm::Srtf => {
                Box::new(PreemptiveScheduler::shortest_remaining_time(tie_breaker))
            }
            Algorithm::RoundRobin => {
                let units = quantum.ok_or_else(|| {
                    ValidationError::new(
                        ValidationErrorKind::MissingQuantum,
                        "Round robin requires a quantum",
                    )
                })?;
                let rr = RoundRobinScheduler::new(Quantum::new(units)?);
                Box::new(rr.with_tie_breaker(tie_breaker))
            }
            Algorithm::PriorityNp => Box::new(NonPreemptiveScheduler::priority(tie_breaker)),
            Algorithm::PriorityP => Box::new(PreemptiveScheduler::priority(tie_breaker)),
        };
        Ok(scheduler)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Algorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Algorithm::ALL
            .into_iter()
            .find(|a| a.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                let labels: Vec<_> = Algorithm::ALL.iter().map(|a| a.label()).collect();
                format!("unknown algorithm '{s}' (expected one of {})", labels.join(", "))
            })
    }
}

/// Input container for one simulation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationRequest {
    /// Processes to schedule.
    pub processes: Vec<Process>,
    /// Discipline to simulate.
    pub algorithm: Algorithm,
    /// Round-robin quantum.
    pub quantum: Option<i64>,
    /// Final tie-breaking strategy.
    pub tie_breaker: TieBreaker,
}

impl SimulationRequest {
    /// Creates a new request.
    pub fn new(processes: Vec<Process>, algorithm: Algorithm) -> Self {
        Self {
            processes,
            algorithm,
            quantum: None,
            tie_breaker: TieBreaker::default(),
        }
    }

    /// Sets the round-robin quantum.
    pub fn with_quantum(mut self, quantum: i64) -> Self {
        self.quantum = Some(quantum);
        self
    }

    /// Sets the final tie-breaker.
    pub fn with_tie_breaker(mut self, tie_breaker: TieBreaker) -> Self {
        self.tie_breaker = tie_breaker;
        self
    }

    /// Validates the request and runs the simulation.
    ///
    /// Configuration and input problems are reported together, before any
    /// simulation starts.
    pub fn run(&self) -> Result<SimulationResult, Vec<ValidationError>> {
        let input_check = validate_processes(&self.processes);
        let scheduler = self.algorithm.scheduler(self.quantum, self.tie_breaker);

        match (input_check, scheduler) {
            (Ok(()), Ok(scheduler)) => {
                info!(
                    "simulating {} over {} processes",
                    scheduler.name(),
                    self.processes.len()
                );
                Ok(scheduler.run(&self.processes))
            }
            (input, config) => {
                let mut errors = input.err().unwrap_or_default();
                errors.extend(config.err());
                Err(errors)
            }
        }
    }
}

/// Runs every algorithm over the same input.
///
/// Input and quantum problems are reported together before any algorithm
/// runs. Each run builds its own records from the shared, read-only
/// `processes`.
pub fn compare_all(
    processes: &[Process],
    quantum: i64,
    tie_breaker: TieBreaker,
) -> Result<Vec<SimulationResult>, Vec<ValidationError>> {
    let input_check = validate_processes(processes);
    let schedulers: Result<Vec<_>, _> = Algorithm::ALL
        .into_iter()
        .map(|algorithm| algorithm.scheduler(Some(quantum), tie_breaker))
        .collect();

    match (input_check, schedulers) {
        (Ok(()), Ok(schedulers)) => Ok(schedulers
            .iter()
            .map(|scheduler| {
                info!("simulating {}", scheduler.name());
                scheduler.run(processes)
            })
            .collect()),
        (input, config) => {
            let mut errors = input.err().unwrap_or_default();
            errors.extend(config.err());
            Err(errors)
        }
    }
}
