//! CSV run-history backend.
//!
//! Creates `runs.csv` in the configured output directory.  Path and
//! environment columns hold text (`"0,1,9"`) and JSON respectively.

use std::fs::File;
use std::path::Path;

use csv::{Writer, WriterBuilder};
use gp_sim::{RunLog, RunRecord};

use crate::row::{COLUMNS, RunRow};
use crate::{OutputError, OutputResult};

/// Appends one row per [`RunRecord`] to `runs.csv`.
pub struct CsvRunLog {
    writer:   Writer<File>,
    rows:     u64,
    finished: bool,
}

impl CsvRunLog {
    /// Create (truncating) `runs.csv` in `dir` and write the header row.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut writer = WriterBuilder::new()
            .has_headers(false)
            .from_path(dir.join("runs.csv"))?;
        writer.write_record(COLUMNS)?;
        Ok(Self { writer, rows: 0, finished: false })
    }

    /// Rows written so far.
    pub fn rows(&self) -> u64 {
        self.rows
    }
}

impl RunLog for CsvRunLog {
    type Error = OutputError;

    fn record(&mut self, record: &RunRecord) -> OutputResult<()> {
        self.writer.serialize(RunRow::from_record(record)?)?;
        self.rows += 1;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.writer.flush()?;
        Ok(())
    }
}
