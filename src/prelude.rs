//! Prelude module for the solution exporter library
//!
//! Re-exports the items most integrations need, so a single
//! `use solution_exporter::prelude::*;` is enough.
//!
//! # Usage
//!
//! ```rust,no_run
//! use solution_exporter::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let runner: Arc<dyn ProcessRunner> = Arc::new(PacRunner::new(ToolConfig::default()));
//!     let exporter = Exporter::new(runner, ExportConfig::default(), ProgressConfig::default());
//!
//!     let report = exporter.export("ContosoCore").await?;
//!     println!("{}", report.status);
//!     Ok(())
//! }
//! ```

// Core result types
pub use crate::errors::{AppError, Result};

// Process boundary and flows
pub use crate::app::{
    CommandOutput, ExportConfig, ExportReport, ExportStatus, Exporter, OutputMode, PacRunner,
    ProcessRunner, Selection, SolutionCatalog, SolutionRecord, ToolConfig, resolve_selection,
};
pub use crate::auth::{AuthFlow, AuthState};
pub use crate::cli::{ProgressConfig, Prompter, Session, StdinPrompter};
pub use crate::config::{AppConfig, RuntimeConfig};

// Standard library re-exports that are commonly needed
pub use std::path::{Path, PathBuf};
pub use std::sync::Arc;

pub use tokio;
