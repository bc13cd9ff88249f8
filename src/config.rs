//! Configuration management for the solution exporter
//!
//! Settings are resolved with the following precedence, later sources winning:
//!
//! 1. Built-in defaults
//! 2. Config file (`--config`, `./solution-exporter.toml` or the user config dir)
//! 3. Environment variables (also read from `.env`)
//! 4. CLI arguments

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::app::{ExportConfig, ToolConfig};
use crate::cli::args::GlobalArgs;
use crate::cli::progress::ProgressConfig;
use crate::constants::{config, env, export, pac, progress};
use crate::errors::{ConfigError, ConfigResult};

/// Unified application configuration for TOML serialization
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// External tool settings
    pub tool: ToolConfigToml,
    /// Export settings
    pub export: ExportConfigToml,
    /// Spinner settings
    pub progress: ProgressConfigToml,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// TOML-friendly tool configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ToolConfigToml {
    /// pac executable name or path
    pub executable: String,
}

impl Default for ToolConfigToml {
    fn default() -> Self {
        Self {
            executable: pac::EXECUTABLE.to_string(),
        }
    }
}

/// TOML-friendly export configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ExportConfigToml {
    /// Directory receiving exported archives
    pub output_dir: PathBuf,
}

impl Default for ExportConfigToml {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(export::DEFAULT_OUTPUT_DIR),
        }
    }
}

/// TOML-friendly progress configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ProgressConfigToml {
    /// Animate the spinner
    pub enabled: bool,
    /// Spinner repaint interval in milliseconds
    pub tick_interval_ms: u64,
}

impl Default for ProgressConfigToml {
    fn default() -> Self {
        Self {
            enabled: true,
            tick_interval_ms: progress::DEFAULT_TICK_INTERVAL.as_millis() as u64,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level used when no CLI verbosity flag is given
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

/// Runtime configuration handed to the application components
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub tool: ToolConfig,
    pub export: ExportConfig,
    pub progress: ProgressConfig,
}

impl AppConfig {
    /// Load configuration from defaults, the config file and the environment
    ///
    /// An explicit `config_file_override` must exist; the standard locations
    /// are optional.
    pub async fn load(config_file_override: Option<PathBuf>) -> ConfigResult<Self> {
        let config_path = match config_file_override {
            Some(path) if !path.exists() => return Err(ConfigError::NotFound { path }),
            Some(path) => Some(path),
            None => Self::find_config_file(),
        };

        let mut config = match config_path {
            Some(path) => Self::load_from_file(&path).await?,
            None => Self::default(),
        };

        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// First existing file among the standard locations
    fn find_config_file() -> Option<PathBuf> {
        let mut search_paths = vec![PathBuf::from(config::LOCAL_FILE)];
        if let Some(path) = Self::default_config_path() {
            search_paths.push(path);
        }

        let found = search_paths.into_iter().find(|path| path.exists());
        match &found {
            Some(path) => debug!("Found config file: {}", path.display()),
            None => debug!("No config file found in standard locations"),
        }
        found
    }

    /// `<user config dir>/solution-exporter/config.toml`
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(config::APP_DIR).join(config::FILE_NAME))
    }

    /// Load configuration from a TOML file
    pub async fn load_from_file(path: &Path) -> ConfigResult<Self> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;

        let config: AppConfig = toml::from_str(&content)?;
        info!("Loaded configuration from: {}", path.display());
        Ok(config)
    }

    /// Apply environment variable overrides through `lookup`
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(executable) = lookup(env::EXECUTABLE) {
            debug!("{} overrides pac executable", env::EXECUTABLE);
            self.tool.executable = executable;
        }
        if let Some(dir) = lookup(env::OUTPUT_DIR) {
            debug!("{} overrides output directory", env::OUTPUT_DIR);
            self.export.output_dir = PathBuf::from(dir);
        }
    }

    /// Apply CLI argument overrides
    pub fn apply_cli_overrides(&mut self, args: &GlobalArgs) {
        if let Some(executable) = &args.pac {
            self.tool.executable = executable.clone();
        }
        if let Some(dir) = &args.output_dir {
            self.export.output_dir = dir.clone();
        }
        if args.no_progress {
            self.progress.enabled = false;
        }
    }

    /// Reject values the application cannot run with
    pub fn validate(&self) -> ConfigResult<()> {
        if self.tool.executable.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "tool.executable".to_string(),
                value: self.tool.executable.clone(),
                reason: "The pac executable must not be empty.".to_string(),
            });
        }
        if self.export.output_dir.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "export.output_dir".to_string(),
                value: String::new(),
                reason: "The output directory must not be empty.".to_string(),
            });
        }
        if self.progress.tick_interval_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "progress.tick_interval_ms".to_string(),
                value: "0".to_string(),
                reason: "The tick interval must be greater than zero.".to_string(),
            });
        }
        if self.logging.level.parse::<tracing::Level>().is_err() {
            return Err(ConfigError::InvalidValue {
                field: "logging.level".to_string(),
                value: self.logging.level.clone(),
                reason: "Expected one of error, warn, info, debug, trace.".to_string(),
            });
        }
        Ok(())
    }

    /// Convert to the runtime configuration types
    pub fn to_runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            tool: self.tool.to_runtime_config(),
            export: self.export.to_runtime_config(),
            progress: self.progress.to_runtime_config(),
        }
    }
}

impl ToolConfigToml {
    /// Convert to runtime ToolConfig
    pub fn to_runtime_config(&self) -> ToolConfig {
        ToolConfig {
            executable: self.executable.trim().to_string(),
        }
    }
}

impl ExportConfigToml {
    /// Convert to runtime ExportConfig
    pub fn to_runtime_config(&self) -> ExportConfig {
        ExportConfig {
            output_dir: self.output_dir.clone(),
        }
    }
}

impl ProgressConfigToml {
    /// Convert to runtime ProgressConfig
    pub fn to_runtime_config(&self) -> ProgressConfig {
        ProgressConfig {
            enabled: self.enabled,
            tick_interval: Duration::from_millis(self.tick_interval_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.tool.executable, "pac");
        assert_eq!(config.export.output_dir, PathBuf::from("./exports"));
        assert!(config.progress.enabled);
        assert_eq!(config.progress.tick_interval_ms, 100);
        assert_eq!(config.logging.level, "warn");
        assert!(config.validate().is_ok());
    }

    #[tokio::test]
    async fn test_config_loading_nonexistent_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nonexistent.toml");

        let result = AppConfig::load(Some(config_path)).await;
        assert!(matches!(result, Err(ConfigError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_partial_file_keeps_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        tokio::fs::write(
            &config_path,
            r#"
[export]
output_dir = "/srv/solutions"

[logging]
level = "debug"
"#,
        )
        .await
        .unwrap();

        let config = AppConfig::load_from_file(&config_path).await.unwrap();

        assert_eq!(config.export.output_dir, PathBuf::from("/srv/solutions"));
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.tool.executable, "pac");
        assert_eq!(config.progress.tick_interval_ms, 100);
    }

    #[tokio::test]
    async fn test_invalid_toml() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("broken.toml");
        tokio::fs::write(&config_path, "[export\noutput_dir = ").await.unwrap();

        let result = AppConfig::load_from_file(&config_path).await;
        assert!(matches!(result, Err(ConfigError::InvalidFormat(_))));
    }

    #[test]
    fn test_precedence_env_then_cli() {
        let mut config = AppConfig::default();
        let vars: HashMap<&str, &str> = [
            ("SOLUTION_EXPORTER_PAC", "/opt/pac/pac"),
            ("SOLUTION_EXPORTER_OUTPUT_DIR", "/env/exports"),
        ]
        .into_iter()
        .collect();

        config.apply_env_overrides(|key| vars.get(key).map(|v| v.to_string()));
        assert_eq!(config.tool.executable, "/opt/pac/pac");
        assert_eq!(config.export.output_dir, PathBuf::from("/env/exports"));

        let args = GlobalArgs {
            output_dir: Some(PathBuf::from("cli-exports")),
            no_progress: true,
            ..Default::default()
        };
        config.apply_cli_overrides(&args);

        assert_eq!(config.tool.executable, "/opt/pac/pac");
        assert_eq!(config.export.output_dir, PathBuf::from("cli-exports"));
        assert!(!config.progress.enabled);
    }

    #[test]
    fn test_validation() {
        let mut config = AppConfig::default();
        config.tool.executable = "  ".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { ref field, .. }) if field == "tool.executable"
        ));

        let mut config = AppConfig::default();
        config.export.output_dir = PathBuf::new();
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.progress.tick_interval_ms = 0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.logging.level = "loud".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_to_runtime_config() {
        let mut config = AppConfig::default();
        config.progress.tick_interval_ms = 250;

        let runtime = config.to_runtime_config();

        assert_eq!(runtime.tool.executable, "pac");
        assert_eq!(runtime.export.output_dir, PathBuf::from("./exports"));
        assert_eq!(runtime.progress.tick_interval, Duration::from_millis(250));
    }

    #[test]
    fn test_serialized_defaults_round_trip() {
        let content = toml::to_string(&AppConfig::default()).unwrap();
        assert!(content.contains("[tool]"));

        let parsed: AppConfig = toml::from_str(&content).unwrap();
        assert_eq!(parsed, AppConfig::default());
    }
}
