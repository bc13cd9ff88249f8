//! Command-line argument parsing for the solution exporter
//!
//! This module defines the CLI structure using clap derive macros. Running
//! without a subcommand starts the interactive session.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Solution Exporter - Export Power Platform solutions through the pac CLI
#[derive(Parser, Debug)]
#[command(
    name = "solution_exporter",
    version,
    about = "Interactively export Power Platform solutions as unmanaged archives",
    long_about = "An interactive wrapper around the PowerApps CLI (pac).
Checks the installation, reuses or creates an authentication profile, lists the
solutions in the environment and exports the chosen one to a timestamped zip."
)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand; defaults to the interactive session
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Global arguments available to all subcommands
#[derive(Args, Debug, Default)]
pub struct GlobalArgs {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Very verbose logging (debug level)
    #[arg(long, global = true)]
    pub very_verbose: bool,

    /// Quiet mode - only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Configuration file path
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// pac executable name or path
    #[arg(long, global = true, value_name = "EXE")]
    pub pac: Option<String>,

    /// Directory receiving exported archives
    #[arg(short, long, global = true, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Disable the animated spinner
    #[arg(long, global = true)]
    pub no_progress: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Interactive export session (default)
    Run,

    /// Print the solutions in the current environment
    List,

    /// Export a single solution without prompting
    Export {
        /// Unique name of the solution
        #[arg(value_name = "NAME")]
        name: String,
    },

    /// Inspect or create pac authentication profiles
    Auth(AuthArgs),
}

/// Arguments for authentication management
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct AuthArgs {
    #[command(subcommand)]
    pub action: AuthAction,
}

/// Authentication actions
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum AuthAction {
    /// Show pac's profiles and whether one is usable
    Status,

    /// Sign in to an environment through the browser
    Login {
        /// Environment URL; prompted for when omitted
        #[arg(long)]
        url: Option<String>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// The command to run, with the interactive session as default
    pub fn command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Run)
    }

    /// Logging level forced by CLI flags, if any
    ///
    /// `None` leaves the choice to the configured level.
    pub fn log_level(&self) -> Option<tracing::Level> {
        if self.global.quiet {
            Some(tracing::Level::ERROR)
        } else if self.global.very_verbose {
            Some(tracing::Level::DEBUG)
        } else if self.global.verbose {
            Some(tracing::Level::INFO)
        } else {
            None
        }
    }
}
