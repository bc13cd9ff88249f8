//! Authentication against a Power Platform environment
//!
//! Credentials are never handled here: pac stores its own profiles and runs
//! the browser sign-in. This module only decides whether an existing profile
//! can be reused and, if not, starts a new sign-in.
//!
//! # Examples
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use solution_exporter::app::{PacRunner, ToolConfig};
//! use solution_exporter::auth::AuthFlow;
//! use solution_exporter::cli::StdinPrompter;
//!
//! # async fn example() -> solution_exporter::Result<()> {
//! let mut flow = AuthFlow::new(Arc::new(PacRunner::new(ToolConfig::default())));
//! flow.ensure_authenticated(&mut StdinPrompter::new()).await?;
//! # Ok(())
//! # }
//! ```

pub mod flow;

// Re-export main public API
pub use flow::{AuthFlow, AuthState, normalize_environment_url};
