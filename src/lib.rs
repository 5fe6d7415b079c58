//! Deterministic CPU scheduling simulator.
//!
//! Simulates classical single-CPU disciplines over a fully-known process
//! set and reports per-process metrics, aggregate KPIs and a Gantt
//! timeline.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Process`, `ProcessRecord`, `Timeline`, `Segment`
//! - **`dispatching`**: Selection keys as composable rules with deterministic tie-breaking
//! - **`scheduler`**: FCFS, SJF, SRTF, round robin, priority (both flavours) and KPIs
//! - **`validation`**: Input and configuration checks (duplicate IDs, bursts, quantum)
//! - **`parser`**: Line-oriented process file reader
//! - **`report`**: Tables, execution log, ASCII Gantt chart, comparison charts, JSON
//!
//! # Example
//!
//! ```
//! use cpu_schedule::models::Process;
//! use cpu_schedule::scheduler::{Algorithm, SimulationRequest};
//!
//! let processes = vec![
//!     Process::new("P1", 8),
//!     Process::new("P2", 4).with_arrival(1),
//!     Process::new("P3", 2).with_arrival(2),
//! ];
//! let result = SimulationRequest::new(processes, Algorithm::Sjf).run().unwrap();
//! let order: Vec<_> = result.timeline.segments().iter().map(|s| s.process_id.as_str()).collect();
//! assert_eq!(order, ["P1", "P3", "P2"]);
//! ```
//!
//! # References
//!
//! - Silberschatz, Galvin & Gagne, "Operating System Concepts", Ch. 5
//! - Tanenbaum & Bos, "Modern Operating Systems", §2.4

pub mod dispatching;
pub mod models;
pub mod parser;
pub mod report;
pub mod scheduler;
pub mod validation;
