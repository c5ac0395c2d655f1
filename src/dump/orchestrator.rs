use super::format::{format_bytes, DEFAULT_PRECISION};
use super::naming::{dump_filename, format_timestamp, relative_path, resolve_under};
use super::result::DumpResult;
use super::runner::{DumpRequest, DumpRunner};
use crate::config::AppConfig;
use crate::error::{DumpError, Result};
use crate::notify::{publish_all, NotificationSink};
use chrono::{DateTime, Local};
use console::style;
use std::fs;
use std::io::Write;
use std::path::Path;
use tracing::{debug, error, info, warn};

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;

pub struct DumpOrchestrator {
    config: AppConfig,
    runner: Box<dyn DumpRunner>,
    sinks: Vec<Box<dyn NotificationSink>>,
}

impl DumpOrchestrator {
    pub fn new(
        config: AppConfig,
        runner: Box<dyn DumpRunner>,
        sinks: Vec<Box<dyn NotificationSink>>,
    ) -> Self {
        Self {
            config,
            runner,
            sinks,
        }
    }

    /// Dumps the configured database now and returns the process exit code.
    pub async fn run<W: Write>(&self, custom_path: Option<&str>, out: &mut W) -> i32 {
        self.run_at(custom_path, Local::now(), out).await
    }

    /// Same as [`run`](Self::run) with the capture time supplied by the
    /// caller. Every failure is reported on `out` and turned into
    /// `EXIT_FAILURE`.
    pub async fn run_at<W: Write>(
        &self,
        custom_path: Option<&str>,
        now: DateTime<Local>,
        out: &mut W,
    ) -> i32 {
        let _ = writeln!(out, "{}", style("Creating database dump...").cyan());

        match self.execute_at(custom_path, now, out).await {
            Ok(result) => {
                info!(
                    "Dump of {} completed: {} bytes at {}",
                    result.database,
                    result.file_size,
                    result.file_path.display()
                );
                EXIT_SUCCESS
            }
            Err(e) => {
                error!("Database dump failed: {}", e);
                let _ = writeln!(out, "{}", style("Failed to create database dump.").red().bold());
                let _ = writeln!(out, "{}", style(&e).red());
                EXIT_FAILURE
            }
        }
    }

    pub async fn execute_at<W: Write>(
        &self,
        custom_path: Option<&str>,
        now: DateTime<Local>,
        out: &mut W,
    ) -> Result<DumpResult> {
        let database = self.config.validate()?;

        let filename = dump_filename(database, &format_timestamp(&now));
        let relative = relative_path(custom_path, &filename);
        let file_path = resolve_under(&self.config.storage_root, &relative);
        debug!("Dump destination: {}", file_path.display());

        if let Some(dir) = file_path.parent() {
            prepare_directory(dir)?;
        }
        if file_path.exists() {
            return Err(DumpError::DestinationExists(file_path));
        }

        info!("Dumping database {} with {}", database, self.runner.program_name());
        let request = DumpRequest {
            connection: &self.config.database,
            database,
            output: &file_path,
        };
        let outcome = self.runner.run(&request).await?;
        if !outcome.success {
            return Err(DumpError::DumpProgram {
                status: outcome.status,
                stderr: outcome.stderr,
            });
        }

        let file_size = match fs::metadata(&file_path) {
            Ok(meta) if meta.is_file() => meta.len(),
            _ => return Err(DumpError::MissingOutput(file_path)),
        };

        if let Err(e) = report_success(out, database, &relative, file_size) {
            warn!("Could not print dump report: {}", e);
        }

        let result = DumpResult {
            file_path,
            relative_path: relative,
            filename,
            database: database.to_string(),
            file_size,
            created_at: now,
        };

        let delivered = publish_all(&self.sinks, &result).await;
        debug!("Dump notification delivered to {}/{} sinks", delivered, self.sinks.len());

        Ok(result)
    }
}

fn report_success<W: Write>(
    out: &mut W,
    database: &str,
    relative: &str,
    file_size: u64,
) -> std::io::Result<()> {
    writeln!(out, "{}", style("Database dump created successfully!").green().bold())?;
    writeln!(out, "Database: {}", database)?;
    writeln!(out, "File: {}", relative)?;
    writeln!(out, "Size: {}", format_bytes(file_size, DEFAULT_PRECISION))?;
    out.flush()
}

/// Creates `dir` and any missing parents as rwxr-xr-x. An existing
/// directory is fine.
fn prepare_directory(dir: &Path) -> Result<()> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o755);
    }

    builder.create(dir).map_err(|source| DumpError::DirectoryCreation {
        path: dir.to_path_buf(),
        source,
    })
}
