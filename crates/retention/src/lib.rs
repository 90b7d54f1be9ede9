//! `arsip-retention`: retention and disposition scheduling for archive records.
//!
//! Pure engine crate: receives pre-loaded folders and items, returns the
//! disposition report. The `load` module is the only part that touches files.

pub mod classify;
pub mod config;
pub mod error;
pub mod format;
pub mod hierarchy;
pub mod load;
pub mod model;
pub mod report;
pub mod resolve;
pub mod schedule;

pub use config::ReportConfig;
pub use error::RetentionError;
pub use model::{ArchiveItemRecord, FolderRecord, Report, ReportInput, ReportRow};
pub use report::{assemble, run};
