//! Error types for the solution exporter
//!
//! Each stage of the export session has its own error enum. They all fold into
//! [`AppError`], which `main` reports to the user before exiting with status 1.

use std::path::PathBuf;
use thiserror::Error;

use crate::constants::pac;

/// Failures invoking the external `pac` executable
#[derive(Error, Debug)]
pub enum ToolError {
    /// The executable could not be located on PATH
    #[error("PowerApps CLI ({executable}) is not installed or not in PATH.")]
    NotFound { executable: String },

    /// The executable exists but could not be started
    #[error("Failed to run {executable}")]
    Spawn {
        executable: String,
        #[source]
        source: std::io::Error,
    },

    /// `pac help` ran but did not identify itself
    #[error("pac CLI check failed.")]
    CheckFailed,
}

/// Authentication flow errors
#[derive(Error, Debug)]
pub enum AuthError {
    /// The user entered an empty environment URL
    #[error("Environment URL is required.")]
    MissingUrl,

    /// `pac auth create` exited with a non-zero status
    #[error("Authentication failed (exit status {exit_code}). Please try again.")]
    SignInFailed { exit_code: i32 },
}

/// Solution listing errors
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Listing produced no usable rows, or the listing command failed
    #[error("No solutions available to export.")]
    Empty,
}

/// Errors resolving the user's choice from the solution table
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SelectionError {
    /// Numeric choice outside `1..=count`
    #[error("Invalid selection. Please enter a number between 1 and {count}.")]
    OutOfRange { count: usize },

    /// Literal fallback with nothing typed
    #[error("Solution name is required.")]
    EmptyName,
}

/// Export errors
#[derive(Error, Debug)]
pub enum ExportError {
    /// `pac solution export` exited with a non-zero status
    #[error("Failed to export solution: {name}")]
    CommandFailed { name: String, exit_code: i32 },

    /// Export reported success but nothing was written at the target path
    #[error("Export command completed but file was not found: {path}")]
    FileMissing { path: PathBuf },

    /// Output directory could not be created or the archive could not be inspected
    #[error("File I/O error at {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Interactive input errors
#[derive(Error, Debug)]
pub enum PromptError {
    /// Standard input reached end of file while an answer was expected
    #[error("Input closed while waiting for an answer")]
    InputClosed,

    /// Terminal read or write failed
    #[error("Terminal I/O error")]
    Io(#[from] std::io::Error),
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    NotFound { path: PathBuf },

    /// Configuration file could not be read
    #[error("Failed to read config file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid configuration format
    #[error("Invalid configuration format")]
    InvalidFormat(#[from] toml::de::Error),

    /// Invalid configuration value
    #[error("Invalid configuration value for {field}: {value:?}. {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

/// Top-level application error that can represent any error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Tool(#[from] ToolError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Selection(#[from] SelectionError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error(transparent)]
    Prompt(#[from] PromptError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl AppError {
    /// Whether this error only ends an "export another" round.
    ///
    /// Missing tools, authentication and input failures stay fatal in every round.
    pub fn ends_round_only(&self) -> bool {
        matches!(
            self,
            AppError::Catalog(_) | AppError::Selection(_) | AppError::Export(_)
        )
    }

    /// Remediation text shown underneath the error message
    pub fn hint(&self) -> Option<String> {
        match self {
            AppError::Tool(ToolError::NotFound { .. }) => Some(install_guidance()),
            AppError::Auth(_) => Some("Authentication required to continue.".to_string()),
            _ => None,
        }
    }

    /// Whether the export report already showed this failure to the user
    pub fn already_reported(&self) -> bool {
        matches!(
            self,
            AppError::Export(ExportError::CommandFailed { .. } | ExportError::FileMissing { .. })
        )
    }

    /// Console text for this error, `None` when it was already shown
    pub fn user_report(&self) -> Option<String> {
        if self.already_reported() {
            return None;
        }
        Some(match self.hint() {
            Some(hint) => format!("❌ {}\n{}", self, hint),
            None => format!("❌ {}", self),
        })
    }

    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            AppError::Tool(_) => "environment",
            AppError::Auth(_) => "authentication",
            AppError::Catalog(_) => "listing",
            AppError::Selection(_) => "selection",
            AppError::Export(_) => "export",
            AppError::Prompt(_) => "input",
            AppError::Config(_) => "config",
        }
    }
}

/// Multi-line installation instructions for the pac CLI
pub fn install_guidance() -> String {
    let mut text = String::from("Install it using one of these methods:\n");
    for (platform, command) in pac::INSTALL_METHODS {
        text.push_str(&format!("  • {:<10} {}\n", format!("{}:", platform), command));
    }
    text.push_str("\nAfter installation, restart your terminal and try again.");
    text
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, AppError>;

/// External tool result type alias
pub type ToolResult<T> = std::result::Result<T, ToolError>;

/// Selection result type alias
pub type SelectionResult<T> = std::result::Result<T, SelectionError>;

/// Export result type alias
pub type ExportResult<T> = std::result::Result<T, ExportError>;

/// Prompt result type alias
pub type PromptResult<T> = std::result::Result<T, PromptError>;

/// Configuration result type alias
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
