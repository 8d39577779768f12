//! `gp-output` — run-history backends for greenpath comparison runs.
//!
//! | Feature   | Backend      | Files created |
//! |-----------|--------------|---------------|
//! | *(none)*  | CSV          | `runs.csv`    |
//! | *(none)*  | In-memory    | —             |
//! | `sqlite`  | SQLite       | `runs.db`     |
//!
//! All backends implement [`gp_sim::RunLog`] and are handed to the
//! controller through `ControllerBuilder::run_log`.  Each comparison run
//! produces two rows, one per algorithm, with the environment snapshot
//! stored as JSON.
//!
//! # Usage
//!
//! ```rust,ignore
//! use gp_output::CsvRunLog;
//! use gp_sim::ControllerBuilder;
//!
//! let mut controller = ControllerBuilder::new(config)
//!     .run_log(CsvRunLog::new(Path::new("./output"))?)
//!     .build()?;
//! controller.run_comparison(start, goal, &job, &vehicle)?;
//! let log = controller.shutdown();
//! ```

pub mod csv;
pub mod error;
pub mod memory;
pub mod row;

#[cfg(feature = "sqlite")]
pub mod sqlite;


pub use crate::csv::CsvRunLog;
pub use error::{OutputError, OutputResult};
pub use memory::MemoryRunLog;
pub use row::{COLUMNS, RunRow};

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteRunLog;
