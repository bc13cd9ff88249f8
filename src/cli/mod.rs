//! Command-line interface components
//!
//! This module contains CLI-specific code for the solution exporter,
//! including argument parsing, prompts, the spinner and the session driver.

pub mod args;
pub mod commands;
pub mod progress;
pub mod prompt;
pub mod session;
pub mod signals;
pub mod startup;

pub use args::{AuthAction, AuthArgs, Cli, Commands, GlobalArgs};
pub use commands::{AppContext, execute, handle_auth, handle_export, handle_list, handle_run};
pub use progress::{ProgressConfig, ProgressIndicator};
pub use prompt::{Prompter, StdinPrompter, confirm};
pub use session::{Session, SessionSummary};
pub use signals::{Interrupt, wait_for_interrupt};
pub use startup::{InstallationStatus, banner, check_installation};
