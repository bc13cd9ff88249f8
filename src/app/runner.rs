//! Invocation of the Power Platform CLI
//!
//! Non-zero exit statuses are data, not errors: callers receive them in
//! [`CommandOutput`] and decide what they mean. The only error conditions are
//! a missing executable and a failure to spawn it.

use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, info};

use crate::constants::pac;
use crate::errors::{ToolError, ToolResult};

/// How the child's standard streams are wired
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Collect stdout/stderr as text
    Capture,
    /// Let the child use this terminal directly (interactive sign-in)
    PassThrough,
}

/// Result of one pac invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit status; `-1` when the child was terminated by a signal
    pub exit_code: i32,
    /// Captured stdout, empty in pass-through mode
    pub stdout: String,
    /// Captured stderr, empty in pass-through mode
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// stdout followed by stderr, as `pac help` splits its banner across both
    pub fn combined(&self) -> String {
        if self.stderr.is_empty() {
            self.stdout.clone()
        } else {
            format!("{}{}", self.stdout, self.stderr)
        }
    }
}

/// Runs the external tool with an argument vector
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    async fn run(&self, args: &[&str], mode: OutputMode) -> ToolResult<CommandOutput>;
}

/// Runtime settings for locating the external tool
#[derive(Debug, Clone)]
pub struct ToolConfig {
    /// Executable name looked up on PATH, or a path to it
    pub executable: String,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            executable: pac::EXECUTABLE.to_string(),
        }
    }
}

/// [`ProcessRunner`] backed by the real `pac` executable
#[derive(Debug, Clone)]
pub struct PacRunner {
    config: ToolConfig,
}

impl PacRunner {
    pub fn new(config: ToolConfig) -> Self {
        Self { config }
    }

    /// Resolve the executable on every call so a tool removed mid-session is reported
    fn resolve(&self) -> ToolResult<PathBuf> {
        which::which(&self.config.executable).map_err(|e| {
            debug!("Could not resolve {}: {}", self.config.executable, e);
            ToolError::NotFound {
                executable: self.config.executable.clone(),
            }
        })
    }

    fn spawn_error(&self, source: std::io::Error) -> ToolError {
        if source.kind() == std::io::ErrorKind::NotFound {
            ToolError::NotFound {
                executable: self.config.executable.clone(),
            }
        } else {
            ToolError::Spawn {
                executable: self.config.executable.clone(),
                source,
            }
        }
    }
}

#[async_trait]
impl ProcessRunner for PacRunner {
    async fn run(&self, args: &[&str], mode: OutputMode) -> ToolResult<CommandOutput> {
        let program = self.resolve()?;
        info!("Running {} {}", self.config.executable, args.join(" "));

        let mut command = Command::new(&program);
        command.args(args).kill_on_drop(true);

        let output = match mode {
            OutputMode::Capture => {
                let output = command.output().await.map_err(|e| self.spawn_error(e))?;
                CommandOutput {
                    exit_code: output.status.code().unwrap_or(-1),
                    stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                    stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
                }
            }
            OutputMode::PassThrough => {
                let status = command
                    .stdin(Stdio::inherit())
                    .stdout(Stdio::inherit())
                    .stderr(Stdio::inherit())
                    .status()
                    .await
                    .map_err(|e| self.spawn_error(e))?;
                CommandOutput {
                    exit_code: status.code().unwrap_or(-1),
                    ..CommandOutput::default()
                }
            }
        };

        debug!(
            "{} {} exited with status {}",
            self.config.executable,
            args.join(" "),
            output.exit_code
        );
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combined_output() {
        let output = CommandOutput {
            exit_code: 0,
            stdout: "Microsoft PowerPlatform CLI\n".to_string(),
            stderr: "Version: 1.31.6\n".to_string(),
        };
        assert_eq!(
            output.combined(),
            "Microsoft PowerPlatform CLI\nVersion: 1.31.6\n"
        );
        assert!(output.success());

        let stdout_only = CommandOutput {
            exit_code: 2,
            stdout: "usage".to_string(),
            stderr: String::new(),
        };
        assert_eq!(stdout_only.combined(), "usage");
        assert!(!stdout_only.success());
    }

    #[tokio::test]
    async fn test_missing_executable_is_not_found() {
        let runner = PacRunner::new(ToolConfig {
            executable: "definitely-not-a-real-pac-binary-3f9a".to_string(),
        });

        let result = runner.run(pac::HELP_ARGS, OutputMode::Capture).await;
        assert!(matches!(result, Err(ToolError::NotFound { .. })));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_non_zero_exit_is_data() {
        // `false` exists on every unix system and exits with status 1
        let runner = PacRunner::new(ToolConfig {
            executable: "false".to_string(),
        });

        let output = runner.run(&[], OutputMode::Capture).await.unwrap();
        assert_eq!(output.exit_code, 1);
        assert!(!output.success());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_capture_collects_stdout() {
        let runner = PacRunner::new(ToolConfig {
            executable: "echo".to_string(),
        });

        let output = runner
            .run(&["solution", "list"], OutputMode::Capture)
            .await
            .unwrap();
        assert!(output.success());
        assert_eq!(output.stdout.trim(), "solution list");
    }
}
