//! Application constants for the solution exporter
//!
//! This module centralizes the constants used throughout the application,
//! organized by functional domain.

use std::time::Duration;

/// Environment variable names for configuration overrides
pub mod env {
    /// Overrides the pac executable name or path
    pub const EXECUTABLE: &str = "SOLUTION_EXPORTER_PAC";

    /// Overrides the export output directory
    pub const OUTPUT_DIR: &str = "SOLUTION_EXPORTER_OUTPUT_DIR";
}

/// Power Platform CLI invocation details
pub mod pac {
    /// Default executable name, resolved through PATH
    pub const EXECUTABLE: &str = "pac";

    /// Arguments for the help/version query
    pub const HELP_ARGS: &[&str] = &["help"];

    /// Arguments listing authentication profiles
    pub const AUTH_LIST_ARGS: &[&str] = &["auth", "list"];

    /// Arguments listing solutions in the active environment
    pub const SOLUTION_LIST_ARGS: &[&str] = &["solution", "list"];

    /// Banner text printed by `pac help`
    pub const PRODUCT_BANNER: &str = "Microsoft PowerPlatform CLI";

    /// Version line marker printed by `pac help`
    pub const VERSION_MARKER: &str = "Version:";

    /// Installation methods shown when the executable is missing
    pub const INSTALL_METHODS: &[(&str, &str)] = &[
        (
            ".NET",
            "dotnet tool install --global Microsoft.PowerApps.CLI.Tool",
        ),
        ("Windows", "Download from https://aka.ms/PowerAppsCLI"),
        ("macOS", "brew install microsoft/mssql-release/powerapps-cli"),
    ];
}

/// Markers used when scraping pac's human-readable tables
pub mod table {
    /// Separator rows contain a run of dashes
    pub const SEPARATOR: &str = "---";

    /// Header token of the `auth list` table
    pub const AUTH_HEADER: &str = "Index";

    /// Header token of the `solution list` table
    pub const SOLUTION_HEADER: &str = "Unique Name";

    /// Lowercase host marker of an environment URL
    pub const HOST_MARKER: &str = "http";

    /// Lowercase word that must appear in a listing with usable profiles
    pub const ACTIVE_MARKER: &str = "active";

    /// Lowercase profile kind that disqualifies a listing lacking [`ACTIVE_MARKER`]
    pub const UNIVERSAL_MARKER: &str = "universal";

    /// Lowercase marker of a Dynamics organization instance
    pub const ORG_MARKER: &str = "crm";

    /// Literals pac prints in the trailing "Managed" column
    pub const MANAGED_LITERALS: [&str; 2] = ["True", "False"];

    /// Friendly names longer than this are truncated
    pub const FRIENDLY_NAME_MAX: usize = 24;

    /// Characters kept before the ellipsis when truncating
    pub const FRIENDLY_NAME_KEEP: usize = 21;

    /// Width of the `#` column
    pub const INDEX_WIDTH: usize = 4;

    /// Width of the unique name column
    pub const UNIQUE_NAME_WIDTH: usize = 30;

    /// Width of the friendly name column
    pub const FRIENDLY_NAME_WIDTH: usize = 25;

    /// Width of the horizontal rules around the table
    pub const RULE_WIDTH: usize = 70;
}

/// Export defaults
pub mod export {
    /// Default directory receiving exported archives
    pub const DEFAULT_OUTPUT_DIR: &str = "./exports";

    /// chrono format for the timestamp embedded in archive names
    pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

    /// Archive extension
    pub const EXTENSION: &str = "zip";

    /// Bytes per reported megabyte
    pub const BYTES_PER_MB: f64 = 1024.0 * 1024.0;
}

/// Progress indicator settings
pub mod progress {
    use super::Duration;

    /// Spinner frames, cycled while an operation runs
    pub const FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

    /// Default repaint interval
    pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(100);

    /// Glyph of a successful final status line
    pub const SUCCESS_GLYPH: &str = "✅";

    /// Glyph of a failed final status line
    pub const FAILURE_GLYPH: &str = "❌";
}

/// Console layout
pub mod ui {
    /// Width of the banner rules
    pub const BANNER_WIDTH: usize = 60;

    /// Input that quits the selection prompt
    pub const QUIT: &str = "q";

    /// Prompt for the environment to sign in to
    pub const URL_PROMPT: &str =
        "Enter your environment URL (e.g., https://yourorg.crm.dynamics.com): ";
}

/// Configuration file locations
pub mod config {
    /// Project-local configuration file
    pub const LOCAL_FILE: &str = "./solution-exporter.toml";

    /// Directory under the user config dir
    pub const APP_DIR: &str = "solution-exporter";

    /// File name inside [`APP_DIR`]
    pub const FILE_NAME: &str = "config.toml";
}
