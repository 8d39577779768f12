//! SQLite run-history backend (feature `sqlite`).
//!
//! Creates `runs.db` in the configured output directory with a single
//! `simulation_runs` table.

use std::path::Path;

use gp_sim::{RunLog, RunRecord};
use rusqlite::Connection;

use crate::row::RunRow;
use crate::{OutputError, OutputResult};

/// Writes one row per [`RunRecord`] to an SQLite database.
pub struct SqliteRunLog {
    conn:     Connection,
    finished: bool,
}

impl SqliteRunLog {
    /// Open (or create) `runs.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join("runs.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS simulation_runs (
                 id                 INTEGER PRIMARY KEY AUTOINCREMENT,
                 algorithm          TEXT    NOT NULL,
                 start_node         INTEGER NOT NULL,
                 end_node           INTEGER NOT NULL,
                 priority           TEXT    NOT NULL,
                 vehicle_type       TEXT    NOT NULL,
                 total_fuel         REAL    NOT NULL,
                 total_time         REAL    NOT NULL,
                 total_distance     REAL    NOT NULL,
                 co2_emissions      REAL    NOT NULL,
                 fallback           INTEGER NOT NULL,
                 route_path         TEXT    NOT NULL,
                 minute             INTEGER NOT NULL,
                 city               TEXT    NOT NULL,
                 traffic_conditions TEXT    NOT NULL,
                 weather_conditions TEXT    NOT NULL
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl RunLog for SqliteRunLog {
    type Error = OutputError;

    fn record(&mut self, record: &RunRecord) -> OutputResult<()> {
        let row = RunRow::from_record(record)?;
        let mut stmt = self.conn.prepare_cached(
            "INSERT INTO simulation_runs \
             (algorithm, start_node, end_node, priority, vehicle_type, \
              total_fuel, total_time, total_distance, co2_emissions, fallback, \
              route_path, minute, city, traffic_conditions, weather_conditions) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)",
        )?;
        stmt.execute(rusqlite::params![
            row.algorithm,
            row.start_node,
            row.end_node,
            row.priority,
            row.vehicle_type,
            row.total_fuel,
            row.total_time,
            row.total_distance,
            row.co2_emissions,
            row.fallback as i64,
            row.route_path,
            row.minute,
            row.city,
            row.traffic_conditions,
            row.weather_conditions,
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
