//! SQLite persistence: the session recorder and its report reader.

pub mod database;
pub mod recorder;
pub mod report;

pub use recorder::SqliteRecorder;
pub use report::{SessionReport, SqliteReportReader};
