use crate::config::{DatabaseConfig, DumpToolConfig};
use crate::error::{DumpError, Result};
use async_trait::async_trait;
use std::ffi::OsString;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;
use which::which;

/// What to dump and where the program should write it.
#[derive(Debug, Clone, Copy)]
pub struct DumpRequest<'a> {
    pub connection: &'a DatabaseConfig,
    pub database: &'a str,
    pub output: &'a Path,
}

#[derive(Debug, Clone)]
pub struct DumpOutcome {
    pub success: bool,
    pub status: Option<i32>,
    pub stderr: String,
}

#[async_trait]
pub trait DumpRunner: Send + Sync {
    /// Runs the dump to completion. `Err` means the program could not be
    /// started at all; a program that ran and failed is an unsuccessful
    /// `DumpOutcome`.
    async fn run(&self, request: &DumpRequest<'_>) -> Result<DumpOutcome>;
    fn program_name(&self) -> &str;
}

pub struct MysqldumpRunner {
    program: String,
    extra_args: Vec<String>,
}

impl MysqldumpRunner {
    pub fn new(config: &DumpToolConfig) -> Self {
        Self {
            program: config.program.clone(),
            extra_args: config.extra_args.clone(),
        }
    }

    /// Every configured or user-supplied value is its own argument; no
    /// shell ever sees them.
    pub fn build_args(&self, request: &DumpRequest<'_>) -> Vec<OsString> {
        let connection = request.connection;
        let mut args: Vec<OsString> = vec![
            format!("--host={}", connection.host).into(),
            format!("--port={}", connection.port).into(),
            format!("--user={}", connection.username).into(),
            format!("--password={}", connection.password).into(),
        ];
        args.extend(self.extra_args.iter().map(OsString::from));

        let mut result_file = OsString::from("--result-file=");
        result_file.push(request.output);
        args.push(result_file);

        args.push(request.database.into());
        args
    }
}

#[async_trait]
impl DumpRunner for MysqldumpRunner {
    async fn run(&self, request: &DumpRequest<'_>) -> Result<DumpOutcome> {
        let program_path = which(&self.program).map_err(|e| DumpError::DumpProgram {
            status: None,
            stderr: format!("could not locate '{}': {}", self.program, e),
        })?;

        debug!(
            "Running {} for database {} into {}",
            program_path.display(),
            request.database,
            request.output.display()
        );

        let output = Command::new(&program_path)
            .args(self.build_args(request))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| DumpError::DumpProgram {
                status: None,
                stderr: format!("could not start '{}': {}", program_path.display(), e),
            })?;

        Ok(DumpOutcome {
            success: output.status.success(),
            status: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        })
    }

    fn program_name(&self) -> &str {
        &self.program
    }
}
