//! Report output sinks.
//!
//! A sink owns one operation: `put(report_name, rows)` atomically discards
//! any prior content under that name and installs the new rows. Assemblers
//! build the full row set before calling `put`, so readers never observe a
//! partially written table.

use std::io::Write;
use std::path::PathBuf;

use rustc_hash::FxHashMap;
use serde_json::Value;

use crate::analytics::types::{AnalyticsError, AnalyticsResult};

/// Named-table replace sink.
pub trait ReportSink {
    /// Replace the table under `report` with `rows`, all-or-nothing.
    fn put(&mut self, report: &str, rows: Vec<Value>) -> AnalyticsResult<()>;
}

// ---------------------------------------------------------------------------
// MemorySink
// ---------------------------------------------------------------------------

/// In-memory sink for library consumers and tests.
#[derive(Debug, Default)]
pub struct MemorySink {
    tables: FxHashMap<String, Vec<Value>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// The current rows of a table, if the report has run.
    pub fn table(&self, name: &str) -> Option<&[Value]> {
        self.tables.get(name).map(Vec::as_slice)
    }

    /// Table names in sorted order.
    pub fn table_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tables.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Drain the sink into a name → rows JSON object.
    pub fn into_json(self) -> Value {
        let mut map = serde_json::Map::new();
        let mut tables: Vec<(String, Vec<Value>)> = self.tables.into_iter().collect();
        tables.sort_by(|a, b| a.0.cmp(&b.0));
        for (name, rows) in tables {
            map.insert(name, Value::Array(rows));
        }
        Value::Object(map)
    }
}

impl ReportSink for MemorySink {
    fn put(&mut self, report: &str, rows: Vec<Value>) -> AnalyticsResult<()> {
        // Whole-entry swap: the old table vanishes with the insert.
        self.tables.insert(report.to_string(), rows);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// JsonDirSink
// ---------------------------------------------------------------------------

/// Sink that materializes each table as `<dir>/<report>.json`.
///
/// Rows are staged into a temp file in the same directory and renamed over
/// the final path, so a concurrent reader sees either the old table or the
/// new one, never a partial write.
#[derive(Debug)]
pub struct JsonDirSink {
    dir: PathBuf,
    pretty: bool,
}

impl JsonDirSink {
    pub fn new(dir: PathBuf, pretty: bool) -> Self {
        Self { dir, pretty }
    }

    fn sink_err(&self, report: &str, message: impl std::fmt::Display) -> AnalyticsError {
        AnalyticsError::Sink {
            report: report.to_string(),
            message: message.to_string(),
        }
    }
}

impl ReportSink for JsonDirSink {
    fn put(&mut self, report: &str, rows: Vec<Value>) -> AnalyticsResult<()> {
        let payload = if self.pretty {
            serde_json::to_vec_pretty(&rows)
        } else {
            serde_json::to_vec(&rows)
        }
        .map_err(|e| self.sink_err(report, e))?;

        std::fs::create_dir_all(&self.dir).map_err(|e| self.sink_err(report, e))?;

        let mut staged = tempfile::NamedTempFile::new_in(&self.dir)
            .map_err(|e| self.sink_err(report, e))?;
        staged
            .write_all(&payload)
            .map_err(|e| self.sink_err(report, e))?;

        let target = self.dir.join(format!("{report}.json"));
        staged
            .persist(&target)
            .map_err(|e| self.sink_err(report, e))?;
        tracing::debug!(report, path = %target.display(), "published report table");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
