//! CPU scheduling algorithms and KPI evaluation.
//!
//! Six disciplines behind one [`CpuScheduler`] trait:
//!
//! | Algorithm | Type | Selection key |
//! |-----------|------|---------------|
//! | FCFS | [`FcfsScheduler`] | arrival, order |
//! | SJF | [`NonPreemptiveScheduler`] | burst, arrival, order |
//! | PRIO_NP | [`NonPreemptiveScheduler`] | priority, arrival, order |
//! | SRTF | [`PreemptiveScheduler`] | remaining, arrival, order |
//! | PRIO_P | [`PreemptiveScheduler`] | priority, arrival, order |
//! | RR | [`RoundRobinScheduler`] | FIFO ready queue, fixed quantum |
//!
//! Every run takes the input by shared reference and builds its own
//! [`ProcessRecord`]s, so any number of runs can share one input.
//!
//! # KPI
//!
//! [`SimulationKpi`] computes averages, context switches, utilization and
//! throughput from a [`SimulationResult`].

mod kpi;
mod non_preemptive;
mod preemptive;
mod request;
mod round_robin;

pub use kpi::{averages, count_context_switches, SimulationKpi};
pub use non_preemptive::{FcfsScheduler, NonPreemptiveScheduler};
pub use preemptive::PreemptiveScheduler;
pub use request::{compare_all, Algorithm, SimulationRequest};
pub use round_robin::{Quantum, ReadyQueue, RoundRobinScheduler};

use serde::{Deserialize, Serialize};

use crate::models::{Process, ProcessRecord, Timeline};

/// A CPU scheduling discipline.
///
/// Implementations are deterministic functions of their input and always
/// terminate.
///
/// # Input Contract
///
/// - Process IDs must be unique.
/// - A process whose burst is not positive is finished from the start. It
///   is never dispatched and its derived metrics stay `None`.
/// - Every time reached must fit in `i64`.
///
/// [`SimulationRequest::run`] and [`compare_all`] check all three with
/// [`validate_processes`](crate::validation::validate_processes) first.
pub trait CpuScheduler: std::fmt::Debug {
    /// Display name (e.g., "SJF", "RR (q=4)").
    fn name(&self) -> String;

    /// Simulates the discipline over `processes`.
    ///
    /// The returned records follow the input order and carry every derived
    /// metric for each process that ran.
    fn run(&self, processes: &[Process]) -> SimulationResult;
}

/// Outcome of one algorithm run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    /// Name of the discipline that produced this result.
    pub algorithm: String,
    /// Per-process records, in input order.
    pub records: Vec<ProcessRecord>,
    /// Chronological CPU intervals.
    pub timeline: Timeline,
}

impl SimulationResult {
    /// Creates a new result.
    pub fn new(
        algorithm: impl Into<String>,
        records: Vec<ProcessRecord>,
        timeline: Timeline,
    ) -> Self {
        Self {
            algorithm: algorithm.into(),
            records,
            timeline,
        }
    }

    /// KPIs for this run.
    pub fn kpi(&self) -> SimulationKpi {
        SimulationKpi::calculate(&self.records, &self.timeline)
    }

    /// Finds the record of one process.
    pub fn record(&self, process_id: &str) -> Option<&ProcessRecord> {
        self.records.iter().find(|r| r.id() == process_id)
    }
}
