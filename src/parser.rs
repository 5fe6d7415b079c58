//! Process list parser.
//!
//! # Format
//!
//! Line-oriented text, one process per line:
//!
//! ```text
//! # id  arrival  burst  priority
//! P1    0        5      2
//! P2    1        3      1   # trailing comments are fine
//! ```
//!
//! - Everything after `#` is ignored; blank lines are skipped.
//! - Fields are separated by any whitespace; tokens past the fourth are
//!   ignored.
//! - Lines with fewer than four tokens are skipped with a warning.
//! - `arrival`, `burst` and `priority` must be integers.

use std::fmt;
use std::fs;
use std::path::Path;

use log::{debug, warn};

use crate::models::Process;

/// A parse failure.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    /// Error category.
    pub kind: ParseErrorKind,
    /// 1-based line number, when the error is tied to a line.
    pub line: Option<usize>,
    /// Human-readable description.
    pub message: String,
}

/// Categories of parse errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// The input file could not be read.
    Io,
    /// A numeric field is not an integer.
    InvalidInteger,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "line {line}: {}", self.message),
            None => f.write_str(&self.message),
        }
    }
}

impl std::error::Error for ParseError {}

/// Reads and parses a process file.
pub fn parse_file(path: impl AsRef<Path>) -> Result<Vec<Process>, ParseError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| ParseError {
        kind: ParseErrorKind::Io,
        line: None,
        message: format!("cannot read input file '{}': {e}", path.display()),
    })?;
    parse_processes(&text)
}

/// Parses a process list from text.
///
/// # Example
/// ```
/// use cpu_schedule::parser::parse_processes;
///
/// let processes = parse_processes("P1 0 5 2 # first\n\nP2 1 3 1\n").unwrap();
/// assert_eq!(processes.len(), 2);
/// assert_eq!(processes[1].burst_time, 3);
/// ```
pub fn parse_processes(text: &str) -> Result<Vec<Process>, ParseError> {
    let mut processes = Vec::new();

    for (i, raw) in text.lines().enumerate() {
        let line_no = i + 1;
        let line = strip_comment(raw).trim();
        if line.is_empty() {
            continue;
        }

        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() < 4 {
            warn!("line {line_no}: expected 'id arrival burst priority', skipping '{line}'");
            continue;
        }

        let process = Process {
            id: tokens[0].to_string(),
            arrival_time: parse_int(tokens[1], "arrival time", line_no)?,
            burst_time: parse_int(tokens[2], "burst time", line_no)?,
            priority: parse_int(tokens[3], "priority", line_no)?,
        };
        debug!("parsed {process:?}");
        processes.push(process);
    }

    Ok(processes)
}

fn strip_comment(line: &str) -> &str {
    line.split_once('#').map(|(head, _)| head).unwrap_or(line)
}

fn parse_int<T: std::str::FromStr>(token: &str, field: &str, line: usize) -> Result<T, ParseError> {
    token.parse().map_err(|_| ParseError {
        kind: ParseErrorKind::InvalidInteger,
        line: Some(line),
        message: format!("{field} '{token}' is not an integer"),
    })
}
