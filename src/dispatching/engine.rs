//! Rule engine for multi-key dispatching.
//!
//! Applies rules in sequence, consulting the next rule only on ties, and
//! falls back to a final [`TieBreaker`] once every rule is exhausted.

use std::cmp::Ordering;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{rules, DispatchingRule, RuleScore};
use crate::models::ProcessRecord;

/// How ties are broken after all rules are exhausted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TieBreaker {
    /// Position in the input (first declared wins).
    #[default]
    DeclarationOrder,
    /// Lexicographic process ID, then position in the input.
    ById,
}

/// A composable rule engine for process selection.
///
/// # Example
/// ```
/// use cpu_schedule::dispatching::{rules, RuleEngine, TieBreaker};
///
/// let engine = RuleEngine::new()
///     .with_rule(rules::Priority)
///     .with_tie_breaker(rules::Fifo)
///     .with_final_tie_breaker(TieBreaker::DeclarationOrder);
/// assert_eq!(engine.rule_names(), vec!["PRIORITY", "FIFO"]);
/// ```
#[derive(Clone, Default)]
pub struct RuleEngine {
    rules: Vec<Arc<dyn DispatchingRule>>,
    tie_breaker: TieBreaker,
}

impl RuleEngine {
    /// Creates an empty rule engine.
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine keyed by `rule`, then earliest arrival, then `tie_breaker`.
    ///
    /// This is the selection order shared by every algorithm.
    pub fn keyed_by<R: DispatchingRule + 'static>(rule: R, tie_breaker: TieBreaker) -> Self {
        Self::new()
            .with_rule(rule)
            .with_tie_breaker(rules::Fifo)
            .with_final_tie_breaker(tie_breaker)
    }

    /// Engine ordering by arrival, then `tie_breaker`.
    pub fn arrival_order(tie_breaker: TieBreaker) -> Self {
        Self::new()
            .with_rule(rules::Fifo)
            .with_final_tie_breaker(tie_breaker)
    }

    /// Adds a primary rule.
    pub fn with_rule<R: DispatchingRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Adds a rule consulted only when every earlier rule ties.
    pub fn with_tie_breaker<R: DispatchingRule + 'static>(self, rule: R) -> Self {
        self.with_rule(rule)
    }

    /// Sets the final tie-breaking strategy.
    pub fn with_final_tie_breaker(mut self, tie_breaker: TieBreaker) -> Self {
        self.tie_breaker = tie_breaker;
        self
    }

    /// Names of the configured rules, in evaluation order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Sorts all records, highest priority first.
    ///
    /// Returns indices into `records`.
    pub fn sort_indices(&self, records: &[ProcessRecord]) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..records.len()).collect();
        indices.sort_by(|&a, &b| self.compare(records, a, b));
        indices
    }

    /// Returns the highest-priority index among `candidates`.
    pub fn select_best<I>(&self, records: &[ProcessRecord], candidates: I) -> Option<usize>
    where
        I: IntoIterator<Item = usize>,
    {
        candidates
            .into_iter()
            .min_by(|&a, &b| self.compare(records, a, b))
    }

    /// Evaluates a single record and returns the score from each rule.
    pub fn evaluate(&self, record: &ProcessRecord) -> Vec<RuleScore> {
        self.rules.iter().map(|r| r.evaluate(record)).collect()
    }

    /// Total order between two records identified by index.
    pub fn compare(&self, records: &[ProcessRecord], a: usize, b: usize) -> Ordering {
        let (ra, rb) = (&records[a], &records[b]);
        for rule in &self.rules {
            match rule.evaluate(ra).cmp(&rule.evaluate(rb)) {
                Ordering::Equal => continue,
                decided => return decided,
            }
        }

        match self.tie_breaker {
            TieBreaker::DeclarationOrder => a.cmp(&b),
            TieBreaker::ById => ra.id().cmp(rb.id()).then(a.cmp(&b)),
        }
    }
}

impl std::fmt::Debug for RuleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleEngine")
            .field("rules", &self.rule_names())
            .field("tie_breaker", &self.tie_breaker)
            .finish()
    }
}
