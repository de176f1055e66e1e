//! Simulation result container and its export surfaces.
//!
//! The engine performs no file I/O: it produces a two-section tabular byte
//! stream (aggregate row, blank line, detail rows) and a flat key→value
//! summary. Naming and storage belong to the caller.

use crate::error::SimResult;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// One typed value in a detail table.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Int(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Int(v) => write!(f, "{v}"),
            Cell::Float(v) => write!(f, "{v}"),
            Cell::Text(v) => {
                if v.contains(',') || v.contains('"') {
                    write!(f, "\"{}\"", v.replace('"', "\"\""))
                } else {
                    write!(f, "{v}")
                }
            }
        }
    }
}

impl From<i64> for Cell {
    fn from(v: i64) -> Self {
        Cell::Int(v)
    }
}

impl From<u32> for Cell {
    fn from(v: u32) -> Self {
        Cell::Int(i64::from(v))
    }
}

impl From<f64> for Cell {
    fn from(v: f64) -> Self {
        Cell::Float(v)
    }
}

impl From<&str> for Cell {
    fn from(v: &str) -> Self {
        Cell::Text(v.to_string())
    }
}

impl From<String> for Cell {
    fn from(v: String) -> Self {
        Cell::Text(v)
    }
}

/// Column names plus typed rows; the per-unit section of a result.
#[derive(Debug, Clone, Serialize)]
pub struct DetailTable {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl DetailTable {
    pub fn new(columns: &[&str]) -> Self {
        Self {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Append one row. The row must match the column count.
    pub fn push_row(&mut self, row: Vec<Cell>) {
        debug_assert_eq!(row.len(), self.columns.len());
        self.rows.push(row);
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Immutable outcome of one `run()`: opaque score, aggregate summary row,
/// per-unit detail table.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationResult {
    score: f64,
    summary: BTreeMap<String, f64>,
    detail: DetailTable,
}

impl SimulationResult {
    pub fn new(score: f64, summary: BTreeMap<String, f64>, detail: DetailTable) -> Self {
        Self {
            score,
            summary,
            detail,
        }
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    /// Flat key→value summary for compact storage or display.
    pub fn summary(&self) -> &BTreeMap<String, f64> {
        &self.summary
    }

    pub fn detail(&self) -> &DetailTable {
        &self.detail
    }

    pub fn summary_json(&self) -> SimResult<serde_json::Value> {
        Ok(serde_json::to_value(&self.summary)?)
    }

    /// Byte stream of the two-section tabular report: the aggregate summary
    /// row, a blank separator line, then the detail rows.
    pub fn detail_as_bytes(&self) -> Vec<u8> {
        let mut out = String::new();
        let keys: Vec<&str> = self.summary.keys().map(String::as_str).collect();
        out.push_str(&keys.join(","));
        out.push('\n');
        let values: Vec<String> = self.summary.values().map(|v| v.to_string()).collect();
        out.push_str(&values.join(","));
        out.push('\n');
        out.push('\n');

        out.push_str(&self.detail.columns.join(","));
        out.push('\n');
        for row in &self.detail.rows {
            let cells: Vec<String> = row.iter().map(Cell::to_string).collect();
            out.push_str(&cells.join(","));
            out.push('\n');
        }
        out.into_bytes()
    }
}
