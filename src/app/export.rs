//! Exporting a solution to a timestamped archive
//!
//! An export only counts as successful when pac exits zero *and* the archive
//! is found at the expected path afterwards.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Local};
use tracing::{debug, info, warn};

use crate::app::models::{ExportReport, ExportStatus};
use crate::app::runner::{OutputMode, ProcessRunner};
use crate::cli::progress::{ProgressConfig, ProgressIndicator};
use crate::constants::export;
use crate::errors::{ExportError, ExportResult, Result};

/// Runtime export settings
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Directory receiving archives, created on demand
    pub output_dir: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(export::DEFAULT_OUTPUT_DIR),
        }
    }
}

/// `<output_dir>/<name>_<YYYYMMDD_HHMMSS>.zip`
pub fn export_path(output_dir: &Path, solution_name: &str, at: &DateTime<Local>) -> PathBuf {
    let timestamp = at.format(export::TIMESTAMP_FORMAT);
    output_dir.join(format!(
        "{}_{}.{}",
        solution_name,
        timestamp,
        export::EXTENSION
    ))
}

/// pac arguments for an unmanaged, non-interactive, overwriting export
pub fn export_args<'a>(solution_name: &'a str, path: &'a str) -> Vec<&'a str> {
    vec![
        "solution",
        "export",
        "--name",
        solution_name,
        "--path",
        path,
        "--managed",
        "false",
        "--overwrite",
    ]
}

/// Create the output directory and any missing parents
pub fn ensure_output_dir(dir: &Path) -> ExportResult<()> {
    std::fs::create_dir_all(dir).map_err(|source| ExportError::Io {
        path: dir.to_path_buf(),
        source,
    })
}

/// Exports solutions through pac
pub struct Exporter {
    runner: Arc<dyn ProcessRunner>,
    config: ExportConfig,
    progress: ProgressConfig,
}

impl Exporter {
    pub fn new(
        runner: Arc<dyn ProcessRunner>,
        config: ExportConfig,
        progress: ProgressConfig,
    ) -> Self {
        Self {
            runner,
            config,
            progress,
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.config.output_dir
    }

    /// Export `solution_name` and report what happened
    ///
    /// Failures of the export itself are reported in the returned
    /// [`ExportReport`]; errors are reserved for the output directory and a
    /// missing pac executable.
    pub async fn export(&self, solution_name: &str) -> Result<ExportReport> {
        ensure_output_dir(&self.config.output_dir)?;
        let path = export_path(&self.config.output_dir, solution_name, &Local::now());
        let path_arg = path.to_string_lossy().into_owned();

        println!("\n📥 Exporting solution: {}", solution_name);
        println!("   Output: {}", path.display());
        println!("   Type: Unmanaged");
        println!();

        let spinner =
            ProgressIndicator::start(format!("Exporting {}", solution_name), &self.progress);
        let result = self
            .runner
            .run(&export_args(solution_name, &path_arg), OutputMode::Capture)
            .await;

        let succeeded = matches!(&result, Ok(output) if output.success()) && path.exists();
        spinner.stop(succeeded).await;

        let output = result?;
        let status = if !output.success() {
            ExportStatus::CommandFailed {
                exit_code: output.exit_code,
                stderr: output.stderr,
            }
        } else {
            match std::fs::metadata(&path) {
                Ok(meta) => ExportStatus::Exported {
                    size_bytes: meta.len(),
                },
                Err(e) => {
                    debug!("No archive at {}: {}", path.display(), e);
                    ExportStatus::FileMissing {
                        stdout: output.stdout,
                    }
                }
            }
        };

        let report = ExportReport {
            solution_name: solution_name.to_string(),
            path,
            status,
        };
        print_report(&report);
        Ok(report)
    }
}

fn print_report(report: &ExportReport) {
    match &report.status {
        ExportStatus::Exported { .. } => {
            info!("Exported {} to {}", report.solution_name, report.path.display());
            println!("   📁 File: {}", report.path.display());
            println!("   📊 Size: {:.2} MB", report.size_mb().unwrap_or_default());
        }
        ExportStatus::FileMissing { stdout } => {
            warn!("pac reported success but {} is missing", report.path.display());
            println!("\n⚠️  Export command completed but file was not found.");
            println!("   Expected location: {}", report.path.display());
            if !stdout.is_empty() {
                println!("   Output: {}", stdout);
            }
        }
        ExportStatus::CommandFailed { exit_code, stderr } => {
            warn!(
                "Export of {} failed with status {}",
                report.solution_name, exit_code
            );
            println!("\n❌ Failed to export solution: {}", report.solution_name);
            println!("   Please verify the solution name is correct.");
            if !stderr.is_empty() {
                println!("   Error: {}", stderr);
            }
        }
    }
}

impl ExportReport {
    /// Turn a failed report into the matching error
    pub fn into_result(self) -> ExportResult<ExportReport> {
        match self.status {
            ExportStatus::Exported { .. } => Ok(self),
            ExportStatus::FileMissing { .. } => Err(ExportError::FileMissing { path: self.path }),
            ExportStatus::CommandFailed { exit_code, .. } => Err(ExportError::CommandFailed {
                name: self.solution_name,
                exit_code,
            }),
        }
    }
}
