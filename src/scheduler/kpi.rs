//! Simulation quality metrics (KPIs).
//!
//! Computes standard CPU scheduling performance indicators from the
//! finished records and timeline of one algorithm run.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Avg Turnaround | mean(completion - arrival) |
//! | Avg Waiting | mean(turnaround - burst) |
//! | Avg Response | mean(first start - arrival) |
//! | Context Switches | adjacent segments with different processes |
//! | Makespan | end of the last segment |
//! | CPU Utilization | busy time / makespan |
//! | Throughput | completed processes / makespan |
//!
//! # Reference
//! Silberschatz, Galvin & Gagne, "Operating System Concepts", §5.2

use serde::{Deserialize, Serialize};

use crate::models::{ProcessRecord, Timeline};

/// Simulation performance indicators.
///
/// All time values are in simulation time units.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationKpi {
    /// Mean turnaround time.
    pub average_turnaround: f64,
    /// Mean waiting time.
    pub average_waiting: f64,
    /// Mean response time.
    pub average_response: f64,
    /// Number of process changes between consecutive segments.
    pub context_switches: usize,
    /// End of the last segment.
    pub makespan: i64,
    /// Total time the CPU was running a process.
    pub busy_time: i64,
    /// Time within the makespan the CPU sat idle.
    pub idle_time: i64,
    /// Fraction of the makespan the CPU was busy (0.0..1.0).
    pub cpu_utilization: f64,
    /// Completed processes per time unit.
    pub throughput: f64,
    /// Number of records with completion metrics.
    pub completed: usize,
}

impl SimulationKpi {
    /// Computes KPIs from finished records and their timeline.
    ///
    /// Records that never completed are excluded from the averages. An
    /// empty input yields all-zero KPIs.
    pub fn calculate(records: &[ProcessRecord], timeline: &Timeline) -> Self {
        let (average_turnaround, average_waiting, average_response) = averages(records);
        let completed = records.iter().filter(|r| r.is_complete()).count();

        let makespan = timeline.end_time();
        let busy_time = timeline.busy_time();
        let (cpu_utilization, throughput) = if makespan > 0 {
            (
                busy_time as f64 / makespan as f64,
                completed as f64 / makespan as f64,
            )
        } else {
            (0.0, 0.0)
        };

        Self {
            average_turnaround,
            average_waiting,
            average_response,
            context_switches: count_context_switches(timeline),
            makespan,
            busy_time,
            idle_time: makespan - busy_time,
            cpu_utilization,
            throughput,
            completed,
        }
    }
}

/// Mean `(turnaround, waiting, response)` over completed records.
///
/// Returns `(0.0, 0.0, 0.0)` when nothing completed.
pub fn averages(records: &[ProcessRecord]) -> (f64, f64, f64) {
    let mut turnaround = 0i64;
    let mut waiting = 0i64;
    let mut response = 0i64;
    let mut counted = 0usize;

    for r in records {
        if let (Some(t), Some(w), Some(s)) = (r.turnaround_time, r.waiting_time, r.response_time) {
            turnaround += t;
            waiting += w;
            response += s;
            counted += 1;
        }
    }

    if counted == 0 {
        return (0.0, 0.0, 0.0);
    }
    let n = counted as f64;
    (
        turnaround as f64 / n,
        waiting as f64 / n,
        response as f64 / n,
    )
}

/// Context switches in a timeline.
pub fn count_context_switches(timeline: &Timeline) -> usize {
    timeline.context_switches()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Process;

    fn finished(id: &str, arrival: i64, burst: i64, start: i64) -> ProcessRecord {
        let mut r = ProcessRecord::new(&Process::new(id, burst).with_arrival(arrival));
        r.mark_started(start);
        r.execute(burst);
        r.complete_at(start + burst);
        r
    }

    #[test]
    fn test_kpi_basic() {
        let records = vec![finished("P1", 0, 5, 0), finished("P2", 1, 3, 5)];
        let mut timeline = Timeline::new();
        timeline.record("P1", 0, 5);
        timeline.record("P2", 5, 8);

        let kpi = SimulationKpi::calculate(&records, &timeline);
        // Turnaround: 5, 7 → 6.0; waiting: 0, 4 → 2.0; response: 0, 4 → 2.0
        assert!((kpi.average_turnaround - 6.0).abs() < 1e-10);
        assert!((kpi.average_waiting - 2.0).abs() < 1e-10);
        assert!((kpi.average_response - 2.0).abs() < 1e-10);
        assert_eq!(kpi.context_switches, 1);
        assert_eq!(kpi.makespan, 8);
        assert_eq!(kpi.completed, 2);
        assert!((kpi.cpu_utilization - 1.0).abs() < 1e-10);
        assert!((kpi.throughput - 0.25).abs() < 1e-10);
    }

    #[test]
    fn test_kpi_idle_time() {
        let records = vec![finished("P1", 0, 2, 0), finished("P2", 6, 2, 6)];
        let mut timeline = Timeline::new();
        timeline.record("P1", 0, 2);
        timeline.record("P2", 6, 8);

        let kpi = SimulationKpi::calculate(&records, &timeline);
        assert_eq!(kpi.busy_time, 4);
        assert_eq!(kpi.idle_time, 4);
        assert!((kpi.cpu_utilization - 0.5).abs() < 1e-10);
        // Idle gap is not a segment: one switch only
        assert_eq!(kpi.context_switches, 1);
    }

    #[test]
    fn test_kpi_empty() {
        let kpi = SimulationKpi::calculate(&[], &Timeline::new());
        assert_eq!(kpi, SimulationKpi::default());
        assert_eq!(averages(&[]), (0.0, 0.0, 0.0));
    }

    #[test]
    fn test_incomplete_records_excluded() {
        let pending = ProcessRecord::new(&Process::new("P9", 4));
        let records = vec![finished("P1", 0, 2, 0), pending];

        let (t, w, r) = averages(&records);
        assert!((t - 2.0).abs() < 1e-10);
        assert!((w - 0.0).abs() < 1e-10);
        assert!((r - 0.0).abs() < 1e-10);
    }

    #[test]
    fn test_count_context_switches_same_process_twice() {
        let mut timeline = Timeline::new();
        timeline.record("P1", 0, 2);
        timeline.record("P1", 3, 4);
        // Separate segments of one process across idle: no switch
        assert_eq!(count_context_switches(&timeline), 0);
    }
}
