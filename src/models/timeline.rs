//! Timeline (Gantt) model.
//!
//! A timeline is the chronological list of CPU intervals produced by one
//! algorithm run. Intervals are end-exclusive and never overlap. Idle time
//! is not stored; it is the gap between consecutive segments.

use serde::{Deserialize, Serialize};

/// A contiguous run of one process on the CPU, `[start, end)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    /// Process that held the CPU.
    pub process_id: String,
    /// First time unit of the run.
    pub start: i64,
    /// End of the run (exclusive).
    pub end: i64,
}

impl Segment {
    /// Creates a new segment.
    pub fn new(process_id: impl Into<String>, start: i64, end: i64) -> Self {
        Self {
            process_id: process_id.into(),
            start,
            end,
        }
    }

    /// Length of the run.
    #[inline]
    pub fn duration(&self) -> i64 {
        self.end - self.start
    }
}

/// An idle gap between two segments (or before the first one).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdleGap {
    pub start: i64,
    pub end: i64,
}

/// Ordered sequence of execution segments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeline {
    segments: Vec<Segment>,
}

impl Timeline {
    /// Creates an empty timeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that `process_id` ran during `[start, end)`.
    ///
    /// Extends the last segment when it belongs to the same process and ends
    /// exactly at `start`; otherwise appends a new segment. Empty intervals
    /// are ignored.
    pub fn record(&mut self, process_id: &str, start: i64, end: i64) {
        if end <= start {
            return;
        }
        debug_assert!(self.end_time() <= start, "segments must be chronological");

        match self.segments.last_mut() {
            Some(last) if last.process_id == process_id && last.end == start => {
                last.end = end;
            }
            _ => self.segments.push(Segment::new(process_id, start, end)),
        }
    }

    /// All segments in chronological order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Whether nothing was dispatched.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// End of the last segment, or 0 for an empty timeline.
    pub fn end_time(&self) -> i64 {
        self.segments.last().map(|s| s.end).unwrap_or(0)
    }

    /// Sum of all segment durations.
    pub fn busy_time(&self) -> i64 {
        self.segments.iter().map(Segment::duration).sum()
    }

    /// Segments belonging to one process.
    pub fn segments_for(&self, process_id: &str) -> Vec<&Segment> {
        self.segments
            .iter()
            .filter(|s| s.process_id == process_id)
            .collect()
    }

    /// Total CPU time granted to one process.
    pub fn time_for(&self, process_id: &str) -> i64 {
        self.segments_for(process_id)
            .iter()
            .map(|s| s.duration())
            .sum()
    }

    /// Number of adjacent segment pairs whose process differs.
    ///
    /// Idle gaps are not segments and never count as a switch.
    pub fn context_switches(&self) -> usize {
        self.segments
            .windows(2)
            .filter(|pair| pair[0].process_id != pair[1].process_id)
            .count()
    }

    /// Idle gaps from t=0 up to the last segment.
    pub fn idle_gaps(&self) -> Vec<IdleGap> {
        let mut gaps = Vec::new();
        let mut cursor = 0;
        for s in &self.segments {
            if s.start > cursor {
                gaps.push(IdleGap {
                    start: cursor,
                    end: s.start,
                });
            }
            cursor = s.end;
        }
        gaps
    }
}

impl<'a> IntoIterator for &'a Timeline {
    type Item = &'a Segment;
    type IntoIter = std::slice::Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}
