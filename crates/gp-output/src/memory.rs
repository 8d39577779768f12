//! In-memory run history with comparison metrics.

use std::convert::Infallible;

use gp_sim::{ComparisonMetrics, RunLog, RunRecord};

/// Keeps every record; useful for dashboards and tests.
#[derive(Debug, Default, Clone)]
pub struct MemoryRunLog {
    records: Vec<RunRecord>,
}

impl MemoryRunLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[RunRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Agent-versus-baseline tally over the whole history.
    pub fn metrics(&self) -> ComparisonMetrics {
        ComparisonMetrics::from_records(&self.records)
    }
}

impl RunLog for MemoryRunLog {
    type Error = Infallible;

    fn record(&mut self, record: &RunRecord) -> Result<(), Infallible> {
        self.records.push(record.clone());
        Ok(())
    }
}
