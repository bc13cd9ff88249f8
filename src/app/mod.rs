//! Core application logic for the solution exporter
//!
//! This module talks to the pac CLI and turns its text output into the data
//! the interactive session works with:
//!
//! - [`runner`]: spawning pac and collecting its output
//! - [`table`]: scraping pac's human-readable tables
//! - [`catalog`]: listing solutions and resolving the user's choice
//! - [`export`]: exporting a solution to a timestamped archive
//! - [`models`]: the records and reports passed between them

pub mod catalog;
pub mod export;
pub mod models;
pub mod runner;
pub mod table;

pub use catalog::{Selection, SolutionCatalog, render_table, resolve_selection};
pub use export::{ExportConfig, Exporter, ensure_output_dir, export_args, export_path};
pub use models::{
    ExportReport, ExportStatus, SolutionColumns, SolutionRecord, truncate_friendly_name,
};
pub use runner::{CommandOutput, OutputMode, PacRunner, ProcessRunner, ToolConfig};
pub use table::{ProfileListing, TableKind, parse_solutions};
