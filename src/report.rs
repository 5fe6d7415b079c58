//! Text and JSON reporting.
//!
//! Every renderer is a small wrapper implementing [`fmt::Display`], so the
//! same value can be printed, written to a file, or compared in a test.
//!
//! | Renderer | Input | Output |
//! |----------|-------|--------|
//! | [`ResultsTable`] | records | per-process metrics table |
//! | [`KpiSummary`] | KPIs | averages and context switches |
//! | [`ExecutionLog`] | timeline | start / finish events |
//! | [`GanttChart`] | timeline | three-row ASCII chart with idle blocks |
//! | [`ComparisonTable`] | results | one row per algorithm |
//! | [`BarChart`] | labelled values | horizontal ASCII bars |

use std::fmt;

use serde::Serialize;

use crate::models::{ProcessRecord, Timeline};
use crate::scheduler::{SimulationKpi, SimulationResult};

/// Character columns per time unit in the Gantt chart.
const GANTT_UNIT_WIDTH: usize = 3;

/// Label drawn for gaps between segments.
const IDLE_LABEL: &str = "IDLE";

/// Width of the longest bar in a [`BarChart`].
const BAR_WIDTH: usize = 40;

fn opt(value: Option<i64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

/// Columns for a block of `duration` units, widened to fit `label`.
fn block_width(duration: i64, label: &str) -> usize {
    (duration as usize * GANTT_UNIT_WIDTH).max(label.len() + 2)
}

/// Per-process results table.
pub struct ResultsTable<'a>(pub &'a [ProcessRecord]);

impl fmt::Display for ResultsTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", "=".repeat(85))?;
        writeln!(
            f,
            "{:<6} {:<6} {:<8} {:<8} {:<12} {:<10} {:<10}",
            "PID", "Arr", "Burst", "Compl", "Turn", "Wait", "Resp"
        )?;
        writeln!(f, "{}", "-".repeat(85))?;
        for r in self.0 {
            writeln!(
                f,
                "{:<6} {:<6} {:<8} {:<8} {:<12} {:<10} {:<10}",
                r.id(),
                r.process.arrival_time,
                r.process.burst_time,
                opt(r.completion_time),
                opt(r.turnaround_time),
                opt(r.waiting_time),
                opt(r.response_time),
            )?;
        }
        writeln!(f, "{}", "=".repeat(85))
    }
}

/// Averages and context-switch count.
pub struct KpiSummary<'a>(pub &'a SimulationKpi);

impl fmt::Display for KpiSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kpi = self.0;
        writeln!(f, "Average Turnaround Time: {:.2}", kpi.average_turnaround)?;
        writeln!(f, "Average Waiting Time: {:.2}", kpi.average_waiting)?;
        writeln!(f, "Average Response Time: {:.2}", kpi.average_response)?;
        writeln!(f, "Total Context Switches: {}", kpi.context_switches)?;
        writeln!(
            f,
            "CPU Utilization: {:.2}% (idle {} of {})",
            kpi.cpu_utilization * 100.0,
            kpi.idle_time,
            kpi.makespan
        )?;
        writeln!(f, "Throughput: {:.3} processes/unit", kpi.throughput)
    }
}

/// Chronological start / finish events.
pub struct ExecutionLog<'a>(pub &'a Timeline);

impl fmt::Display for ExecutionLog<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- DETAILED EXECUTION LOG ---")?;
        for s in self.0 {
            writeln!(f, "t={}: {} starts running", s.start, s.process_id)?;
            writeln!(f, "t={}: {} finishes/preempted", s.end, s.process_id)?;
        }
        Ok(())
    }
}

/// ASCII Gantt chart: a border row, a process row and a time axis.
///
/// Each time unit takes [`GANTT_UNIT_WIDTH`] columns; blocks are widened to
/// fit their label. [`Timeline::idle_gaps`] are drawn as `IDLE` blocks.
pub struct GanttChart<'a>(pub &'a Timeline);

impl GanttChart<'_> {
    /// The three chart rows, or `None` for an empty timeline.
    pub fn rows(&self) -> Option<[String; 3]> {
        if self.0.is_empty() {
            return None;
        }

        let mut top = String::from(" ");
        let mut mid = String::from("|");
        let mut axis = String::from("0");
        let mut gaps = self.0.idle_gaps().into_iter().peekable();

        for s in self.0 {
            if let Some(gap) = gaps.next_if(|g| g.end == s.start) {
                let width = block_width(gap.end - gap.start, IDLE_LABEL);
                top.push_str(&" ".repeat(width + 1));
                mid.push_str(&format!("{IDLE_LABEL:^width$}|"));
                axis.push_str(&format!("{:>w$}", gap.end, w = width + 1));
            }

            let width = block_width(s.duration(), &s.process_id);
            top.push_str(&"_".repeat(width));
            top.push(' ');
            mid.push_str(&format!("{:^width$}|", s.process_id));
            axis.push_str(&format!("{:>w$}", s.end, w = width + 1));
        }

        Some([top, mid, axis])
    }
}

impl fmt::Display for GanttChart<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.rows() {
            None => writeln!(f, "No execution data available."),
            Some(rows) => {
                writeln!(f, "--- CPU SCHEDULING GANTT CHART ---")?;
                for row in &rows {
                    writeln!(f, "{}", row.trim_end())?;
                }
                writeln!(f, "{}", "-".repeat(34))
            }
        }
    }
}

/// Full single-run report: table, summary, log and chart.
pub struct RunReport<'a>(pub &'a SimulationResult);

impl fmt::Display for RunReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let result = self.0;
        writeln!(f, "Algorithm: {}", result.algorithm)?;
        write!(f, "{}", ResultsTable(&result.records))?;
        write!(f, "{}", KpiSummary(&result.kpi()))?;
        writeln!(f)?;
        write!(f, "{}", ExecutionLog(&result.timeline))?;
        writeln!(f)?;
        write!(f, "{}", GanttChart(&result.timeline))
    }
}

/// One row per algorithm with its averages and context switches.
pub struct ComparisonTable<'a>(pub &'a [SimulationResult]);

impl fmt::Display for ComparisonTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", "=".repeat(80))?;
        writeln!(
            f,
            "{:<15} {:<15} {:<15} {:<15} {:<5}",
            "Algorithm", "Avg Turn", "Avg Wait", "Avg Resp", "CS"
        )?;
        writeln!(f, "{}", "-".repeat(80))?;
        for result in self.0 {
            let kpi = result.kpi();
            writeln!(
                f,
                "{:<15} {:<15.2} {:<15.2} {:<15.2} {:<5}",
                result.algorithm,
                kpi.average_turnaround,
                kpi.average_waiting,
                kpi.average_response,
                kpi.context_switches
            )?;
        }
        writeln!(f, "{}", "=".repeat(80))
    }
}

/// Horizontal bar chart scaled so the largest value spans [`BAR_WIDTH`].
pub struct BarChart<'a> {
    pub title: &'a str,
    pub entries: Vec<(String, f64)>,
}

impl<'a> BarChart<'a> {
    /// Creates a chart.
    pub fn new(title: &'a str, entries: Vec<(String, f64)>) -> Self {
        Self { title, entries }
    }

    /// Average waiting time per algorithm.
    pub fn average_waiting(results: &[SimulationResult]) -> BarChart<'static> {
        BarChart::new(
            "Average Waiting Time vs Algorithm",
            results
                .iter()
                .map(|r| (r.algorithm.clone(), r.kpi().average_waiting))
                .collect(),
        )
    }

    /// Average turnaround time per algorithm.
    pub fn average_turnaround(results: &[SimulationResult]) -> BarChart<'static> {
        BarChart::new(
            "Average Turnaround Time vs Algorithm",
            results
                .iter()
                .map(|r| (r.algorithm.clone(), r.kpi().average_turnaround))
                .collect(),
        )
    }

    fn bar_len(&self, value: f64) -> usize {
        let max = self.entries.iter().map(|(_, v)| *v).fold(0.0, f64::max);
        if max <= 0.0 {
            return 0;
        }
        ((value / max) * BAR_WIDTH as f64).round() as usize
    }
}

impl fmt::Display for BarChart<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        let label_width = self
            .entries
            .iter()
            .map(|(label, _)| label.len())
            .max()
            .unwrap_or(0);
        for (label, value) in &self.entries {
            writeln!(
                f,
                "{label:<label_width$} | {} {value:.2}",
                "#".repeat(self.bar_len(*value))
            )?;
        }
        Ok(())
    }
}

#[derive(Serialize)]
struct JsonRun<'a> {
    #[serde(flatten)]
    result: &'a SimulationResult,
    kpi: SimulationKpi,
}

/// Serializes one result together with its KPIs.
pub fn run_to_json(result: &SimulationResult) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&JsonRun {
        result,
        kpi: result.kpi(),
    })
}

/// Serializes a comparison as an array of results with KPIs.
pub fn comparison_to_json(results: &[SimulationResult]) -> serde_json::Result<String> {
    let runs: Vec<JsonRun<'_>> = results
        .iter()
        .map(|result| JsonRun {
            result,
            kpi: result.kpi(),
        })
        .collect();
    serde_json::to_string_pretty(&runs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Process;
    use crate::scheduler::{CpuScheduler, FcfsScheduler};

    fn scenario() -> SimulationResult {
        FcfsScheduler::new().run(&[
            Process::new("P1", 5),
            Process::new("P2", 3).with_arrival(1),
        ])
    }

    #[test]
    fn test_results_table() {
        let text = ResultsTable(&scenario().records).to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[1].starts_with("PID    Arr    Burst"));
        assert!(lines[3].starts_with("P1     0      5        5"));
        assert!(lines[4].starts_with("P2     1      3        8        7"));
    }

    #[test]
    fn test_results_table_unset_fields() {
        let pending = ProcessRecord::new(&Process::new("P9", 2));
        let text = ResultsTable(std::slice::from_ref(&pending)).to_string();
        assert!(text.contains("P9     0      2        -"));
    }

    #[test]
    fn test_kpi_summary() {
        let text = KpiSummary(&scenario().kpi()).to_string();
        assert!(text.contains("Average Turnaround Time: 6.00"));
        assert!(text.contains("Average Waiting Time: 2.00"));
        assert!(text.contains("Total Context Switches: 1"));
    }

    #[test]
    fn test_execution_log() {
        let text = ExecutionLog(&scenario().timeline).to_string();
        assert!(text.contains("t=0: P1 starts running"));
        assert!(text.contains("t=8: P2 finishes/preempted"));
    }

    #[test]
    fn test_gantt_rows() {
        let result = scenario();
        let [top, mid, axis] = GanttChart(&result.timeline).rows().unwrap();
        // P1: 5 units * 3 = 15 columns, P2: 3 * 3 = 9 columns
        assert_eq!(top, format!(" {} {} ", "_".repeat(15), "_".repeat(9)));
        assert_eq!(mid, format!("|{:^15}|{:^9}|", "P1", "P2"));
        assert_eq!(axis, format!("0{:>16}{:>10}", 5, 8));
    }

    #[test]
    fn test_gantt_idle_block() {
        let mut timeline = Timeline::new();
        timeline.record("P1", 0, 1);
        timeline.record("P2", 3, 4);
        let [_, mid, axis] = GanttChart(&timeline).rows().unwrap();
        assert_eq!(mid, "| P1 | IDLE | P2 |");
        assert!(axis.ends_with('4'));
    }

    #[test]
    fn test_gantt_short_idle_keeps_axis_aligned() {
        let mut timeline = Timeline::new();
        timeline.record("P1", 0, 1);
        timeline.record("P2", 2, 3);
        let [_, mid, axis] = GanttChart(&timeline).rows().unwrap();

        assert_eq!(mid, "| P1 | IDLE | P2 |");
        assert_eq!(axis, "0    1      2    3");
        // Every boundary digit sits under a bar
        for (i, c) in axis.char_indices().filter(|(_, c)| c.is_ascii_digit()) {
            assert_eq!(&mid[i..=i], "|", "boundary {c} misaligned");
        }
    }

    #[test]
    fn test_gantt_leading_idle() {
        let mut timeline = Timeline::new();
        timeline.record("P1", 2, 3);
        let [_, mid, axis] = GanttChart(&timeline).rows().unwrap();
        assert_eq!(mid, "| IDLE | P1 |");
        assert_eq!(axis, "0      2    3");
    }

    #[test]
    fn test_gantt_wide_label() {
        let mut timeline = Timeline::new();
        timeline.record("worker", 0, 1);
        let [_, mid, _] = GanttChart(&timeline).rows().unwrap();
        assert_eq!(mid, "| worker |");
    }

    #[test]
    fn test_gantt_empty() {
        let text = GanttChart(&Timeline::new()).to_string();
        assert_eq!(text.trim(), "No execution data available.");
    }

    #[test]
    fn test_run_report_sections() {
        let text = RunReport(&scenario()).to_string();
        assert!(text.starts_with("Algorithm: FCFS"));
        assert!(text.contains("--- DETAILED EXECUTION LOG ---"));
        assert!(text.contains("--- CPU SCHEDULING GANTT CHART ---"));
    }

    #[test]
    fn test_comparison_table() {
        let results = vec![scenario()];
        let text = ComparisonTable(&results).to_string();
        assert!(text.contains("Algorithm       Avg Turn"));
        assert!(text.contains("FCFS            6.00            2.00            2.00            1"));
    }

    #[test]
    fn test_bar_chart_scaling() {
        let chart = BarChart::new(
            "Waiting",
            vec![("A".to_string(), 4.0), ("BB".to_string(), 2.0), ("C".to_string(), 0.0)],
        );
        let text = chart.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Waiting");
        assert_eq!(lines[1], format!("A  | {} 4.00", "#".repeat(40)));
        assert_eq!(lines[2], format!("BB | {} 2.00", "#".repeat(20)));
        assert_eq!(lines[3], "C  |  0.00");
    }

    #[test]
    fn test_bar_chart_all_zero() {
        let chart = BarChart::new("Zero", vec![("A".to_string(), 0.0)]);
        assert!(chart.to_string().contains("A |  0.00"));
    }

    #[test]
    fn test_run_to_json() {
        let json = run_to_json(&scenario()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["algorithm"], "FCFS");
        assert_eq!(value["kpi"]["context_switches"], 1);
        assert_eq!(value["records"][1]["waiting_time"], 4);
    }

    #[test]
    fn test_comparison_to_json() {
        let json = comparison_to_json(&[scenario(), scenario()]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 2);
    }
}
