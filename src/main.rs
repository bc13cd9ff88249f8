//! Solution Exporter CLI application
//!
//! Interactive command-line front-end for exporting Power Platform solutions
//! through the PowerApps CLI.

use std::process;
use std::sync::Arc;

use tracing::{debug, error, info};
use tracing_subscriber::{EnvFilter, fmt};

use solution_exporter::app::{PacRunner, ProcessRunner};
use solution_exporter::cli::{AppContext, Cli, StdinPrompter, execute, wait_for_interrupt};
use solution_exporter::config::AppConfig;
use solution_exporter::errors::{AppError, Result};

#[tokio::main]
async fn main() {
    let code = match run().await {
        Ok(()) => 0,
        Err(e) => {
            report_error(&e);
            1
        }
    };

    // Exit from inside the runtime so a pending stdin read cannot hold up shutdown
    process::exit(code);
}

/// Main application logic
async fn run() -> Result<()> {
    // Load environment variables from .env file if it exists
    dotenv::dotenv().ok();

    let cli = Cli::parse_args();

    let mut config = AppConfig::load(cli.global.config.clone()).await?;
    config.apply_cli_overrides(&cli.global);
    config.validate()?;

    init_logging(&cli, &config);
    info!("Solution Exporter v{} starting", env!("CARGO_PKG_VERSION"));

    let runtime = config.to_runtime_config();
    debug!("Runtime configuration: {:?}", runtime);

    let runner: Arc<dyn ProcessRunner> = Arc::new(PacRunner::new(runtime.tool.clone()));
    let ctx = AppContext::new(runner, runtime);
    let mut prompter = StdinPrompter::new();

    tokio::select! {
        result = execute(cli.command(), &ctx, &mut prompter) => result,
        interrupt = wait_for_interrupt() => {
            debug!("Session interrupted by {}", interrupt);
            println!("\n\n⚠️  Export cancelled by user.");
            Ok(())
        }
    }
}

/// Print a failed run's error and remediation hint unless already shown
fn report_error(e: &AppError) {
    error!("{} error: {}", e.category(), e);
    if let Some(report) = e.user_report() {
        println!("\n{}", report);
    }
}

/// Initialize logging from CLI verbosity flags, falling back to the config
fn init_logging(cli: &Cli, config: &AppConfig) {
    let level = cli
        .log_level()
        .map(|level| level.to_string())
        .unwrap_or_else(|| config.logging.level.clone());

    let mut filter = EnvFilter::from_default_env();
    match format!("solution_exporter={}", level.to_lowercase()).parse() {
        Ok(directive) => filter = filter.add_directive(directive),
        Err(e) => eprintln!("Ignoring log level {:?}: {}", level, e),
    }

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(cli.global.very_verbose)
        .init();

    if cli.global.very_verbose {
        info!("Very verbose logging enabled");
    } else if cli.global.verbose {
        info!("Verbose logging enabled");
    }
}
