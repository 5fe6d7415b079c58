//! Dispatching rules and rule engine for CPU selection.
//!
//! Every algorithm picks the next process by an ordered key such as
//! `(burst, arrival, declaration order)`. Each component of that key is a
//! [`DispatchingRule`]; the [`RuleEngine`] chains them and applies a final
//! [`TieBreaker`] so that selection is a total, deterministic order.
//!
//! # Usage
//!
//! ```
//! use cpu_schedule::dispatching::{rules, RuleEngine};
//! use cpu_schedule::models::{Process, ProcessRecord};
//!
//! let records = ProcessRecord::from_processes(&[
//!     Process::new("long", 8),
//!     Process::new("short", 2),
//! ]);
//! let engine = RuleEngine::new()
//!     .with_rule(rules::ShortestBurst)
//!     .with_tie_breaker(rules::Fifo);
//!
//! assert_eq!(engine.select_best(&records, 0..records.len()), Some(1));
//! ```

mod engine;
pub mod rules;

pub use engine::{RuleEngine, TieBreaker};

use crate::models::ProcessRecord;
use std::fmt::Debug;

/// Score returned by a dispatching rule.
///
/// Lower scores = selected first.
pub type RuleScore = i64;

/// A dispatching rule that scores a candidate process.
///
/// # Score Convention
/// **Lower score = higher priority.**
pub trait DispatchingRule: Send + Sync + Debug {
    /// Rule name (e.g., "SJF", "FIFO").
    fn name(&self) -> &'static str;

    /// Scores a candidate. Lower = dispatched first.
    fn evaluate(&self, record: &ProcessRecord) -> RuleScore;

    /// Rule description.
    fn description(&self) -> &'static str {
        self.name()
    }
}
