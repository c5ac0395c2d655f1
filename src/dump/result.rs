use chrono::{DateTime, Local};
use serde::Serialize;
use std::path::PathBuf;

/// A verified dump. Only built once the dump program succeeded and the
/// output file could be read back.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DumpResult {
    pub file_path: PathBuf,
    pub relative_path: String,
    pub filename: String,
    pub database: String,
    pub file_size: u64,
    pub created_at: DateTime<Local>,
}
