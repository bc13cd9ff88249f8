//! Startup checks for the solution exporter
//!
//! Before anything else the session confirms that pac is installed and
//! answering. A missing executable surfaces as [`ToolError::NotFound`], whose
//! hint carries the installation guidance.

use tracing::{debug, info, warn};

use crate::app::runner::{OutputMode, ProcessRunner};
use crate::constants::{pac, ui};
use crate::errors::{Result, ToolError};

/// What the installation check learned about pac
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallationStatus {
    /// Trimmed `Version:` line, when pac printed one
    pub version: Option<String>,
}

impl InstallationStatus {
    /// Confirmation line, with the version when known
    pub fn found_message(&self) -> String {
        match &self.version {
            Some(version) => format!("✅ Found pac CLI: {}", version),
            None => "✅ Found pac CLI".to_string(),
        }
    }
}

/// Framed welcome banner
pub fn banner() -> String {
    let rule = "=".repeat(ui::BANNER_WIDTH);
    format!(
        "{}\n  PowerApps Solution Exporter\n  \
         Export unmanaged solutions from Dynamics 365 / Power Platform\n{}",
        rule, rule
    )
}

/// Inspect `pac help` output for the product banner or a version line
pub fn parse_help_output(combined: &str) -> Option<InstallationStatus> {
    if !combined.contains(pac::PRODUCT_BANNER) && !combined.contains(pac::VERSION_MARKER) {
        return None;
    }

    let version = combined
        .lines()
        .find(|line| line.contains(pac::VERSION_MARKER))
        .map(|line| line.trim().to_string());

    Some(InstallationStatus { version })
}

/// Confirm that pac is installed and responding
///
/// The exit code of `pac help` is ignored; only its output decides.
pub async fn check_installation(runner: &dyn ProcessRunner) -> Result<InstallationStatus> {
    println!("🔍 Checking for PowerApps CLI (pac)...");

    let output = runner.run(pac::HELP_ARGS, OutputMode::Capture).await?;
    debug!("pac help exited with status {}", output.exit_code);

    match parse_help_output(&output.combined()) {
        Some(status) => {
            println!("{}", status.found_message());
            info!("pac installation confirmed");
            Ok(status)
        }
        None => {
            warn!("pac help output did not identify the CLI");
            Err(ToolError::CheckFailed.into())
        }
    }
}
