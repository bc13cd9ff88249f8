//! Data types shared across the export session
//!
//! Everything here is derived from pac's text output for a single run and is
//! never persisted.

use std::fmt;
use std::path::PathBuf;

use crate::constants::{export, table};

/// A solution row scraped from `pac solution list`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolutionRecord {
    /// First whitespace-delimited token of the row
    pub unique_name: String,
    /// The row exactly as pac printed it, re-parsed at display time
    pub raw_line: String,
}

impl SolutionRecord {
    /// Build a record from a table row, or `None` for rows without a usable name
    pub fn from_line(line: &str) -> Option<Self> {
        let unique_name = line.split_whitespace().next()?;
        if unique_name.starts_with('-') {
            return None;
        }

        Some(Self {
            unique_name: unique_name.to_string(),
            raw_line: line.to_string(),
        })
    }

    /// Display columns re-extracted from the raw row
    pub fn columns(&self) -> SolutionColumns {
        SolutionColumns::parse(&self.raw_line)
    }
}

/// Display columns of a solution row
///
/// pac prints `UniqueName FriendlyName... Version [Managed]`, where the friendly
/// name may contain spaces and the managed column may be absent.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SolutionColumns {
    pub unique_name: String,
    pub friendly_name: String,
    pub version: String,
    pub managed: Option<bool>,
}

impl SolutionColumns {
    /// Re-extract columns from a raw row using positional heuristics
    pub fn parse(raw_line: &str) -> Self {
        let parts: Vec<&str> = raw_line.split_whitespace().collect();
        let unique_name = parts.first().copied().unwrap_or_default().to_string();

        if parts.len() < 3 {
            return Self {
                unique_name,
                ..Self::default()
            };
        }

        let last = parts[parts.len() - 1];
        let managed = parse_managed(last);
        let (version, friendly_parts) = match managed {
            Some(_) => (parts[parts.len() - 2], &parts[1..parts.len() - 2]),
            None => (last, &parts[1..parts.len() - 1]),
        };

        Self {
            unique_name,
            friendly_name: friendly_parts.join(" "),
            version: version.to_string(),
            managed,
        }
    }

    /// Friendly name clipped to the table column
    pub fn display_friendly_name(&self) -> String {
        truncate_friendly_name(&self.friendly_name)
    }
}

fn parse_managed(token: &str) -> Option<bool> {
    match token {
        t if t == table::MANAGED_LITERALS[0] => Some(true),
        t if t == table::MANAGED_LITERALS[1] => Some(false),
        _ => None,
    }
}

/// Clip a friendly name to 21 characters plus `...` when it exceeds 24 characters
pub fn truncate_friendly_name(name: &str) -> String {
    if name.chars().count() > table::FRIENDLY_NAME_MAX {
        let kept: String = name.chars().take(table::FRIENDLY_NAME_KEEP).collect();
        format!("{}...", kept)
    } else {
        name.to_string()
    }
}

/// Outcome of one export attempt
#[derive(Debug, Clone, PartialEq)]
pub struct ExportReport {
    /// Solution that was requested
    pub solution_name: String,
    /// `<output_dir>/<solution>_<YYYYMMDD_HHMMSS>.zip`
    pub path: PathBuf,
    pub status: ExportStatus,
}

impl ExportReport {
    /// True only when pac exited zero and the archive exists on disk
    pub fn is_success(&self) -> bool {
        matches!(self.status, ExportStatus::Exported { .. })
    }

    /// Archive size in megabytes, for successful exports
    pub fn size_mb(&self) -> Option<f64> {
        match self.status {
            ExportStatus::Exported { size_bytes } => Some(size_bytes as f64 / export::BYTES_PER_MB),
            _ => None,
        }
    }
}

/// How an export attempt ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportStatus {
    /// pac exited zero and the archive was found
    Exported { size_bytes: u64 },
    /// pac exited zero but no archive exists at the target path
    FileMissing { stdout: String },
    /// pac exited non-zero
    CommandFailed { exit_code: i32, stderr: String },
}

impl fmt::Display for ExportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportStatus::Exported { size_bytes } => write!(f, "exported ({} bytes)", size_bytes),
            ExportStatus::FileMissing { .. } => write!(f, "file missing"),
            ExportStatus::CommandFailed { exit_code, .. } => {
                write!(f, "command failed (exit status {})", exit_code)
            }
        }
    }
}
