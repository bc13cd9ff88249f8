//! Command handlers for the solution exporter CLI
//!
//! This module connects parsed CLI arguments to the application components.
//! Every handler shares one [`AppContext`] holding the pac runner and the
//! resolved runtime configuration.

use std::sync::Arc;

use tracing::info;

use crate::app::{Exporter, ProcessRunner, SolutionCatalog};
use crate::auth::AuthFlow;
use crate::cli::args::{AuthAction, AuthArgs, Commands};
use crate::cli::prompt::Prompter;
use crate::cli::session::Session;
use crate::cli::startup::check_installation;
use crate::config::RuntimeConfig;
use crate::constants::ui;
use crate::errors::{CatalogError, Result};

/// Shared state for command handlers
#[derive(Clone)]
pub struct AppContext {
    pub runner: Arc<dyn ProcessRunner>,
    pub config: RuntimeConfig,
}

impl AppContext {
    pub fn new(runner: Arc<dyn ProcessRunner>, config: RuntimeConfig) -> Self {
        Self { runner, config }
    }

    fn exporter(&self) -> Exporter {
        Exporter::new(
            self.runner.clone(),
            self.config.export.clone(),
            self.config.progress.clone(),
        )
    }
}

/// Dispatch a parsed command
pub async fn execute(
    command: Commands,
    ctx: &AppContext,
    prompter: &mut dyn Prompter,
) -> Result<()> {
    match command {
        Commands::Run => {
            info!("Executing interactive session");
            handle_run(ctx, prompter).await
        }
        Commands::List => {
            info!("Executing list command");
            handle_list(ctx).await
        }
        Commands::Export { name } => {
            info!("Executing export command for {}", name);
            handle_export(ctx, &name).await
        }
        Commands::Auth(args) => {
            info!("Executing auth command");
            handle_auth(ctx, args, prompter).await
        }
    }
}

/// Handle the interactive session
pub async fn handle_run(ctx: &AppContext, prompter: &mut dyn Prompter) -> Result<()> {
    let mut session = Session::new(
        ctx.runner.clone(),
        ctx.config.export.clone(),
        ctx.config.progress.clone(),
    );
    let summary = session.run(prompter).await?;

    for report in &summary.exported {
        info!("Exported {} to {}", report.solution_name, report.path.display());
    }
    Ok(())
}

/// Handle the list command
///
/// Relies on the current pac profile; an empty listing is a failure.
pub async fn handle_list(ctx: &AppContext) -> Result<()> {
    check_installation(ctx.runner.as_ref()).await?;

    let records = SolutionCatalog::new(ctx.runner.clone()).list().await?;
    if records.is_empty() {
        return Err(CatalogError::Empty.into());
    }
    Ok(())
}

/// Handle a single non-interactive export
pub async fn handle_export(ctx: &AppContext, name: &str) -> Result<()> {
    check_installation(ctx.runner.as_ref()).await?;

    let report = ctx.exporter().export(name).await?.into_result()?;
    println!("\n🎉 Export complete: {}", report.path.display());
    Ok(())
}

/// Handle the auth command
pub async fn handle_auth(
    ctx: &AppContext,
    args: AuthArgs,
    prompter: &mut dyn Prompter,
) -> Result<()> {
    check_installation(ctx.runner.as_ref()).await?;
    let mut flow = AuthFlow::new(ctx.runner.clone());

    match args.action {
        AuthAction::Status => {
            let listing = flow.check_profiles().await?;

            println!("\n📋 Current profiles:");
            if listing.raw().trim().is_empty() {
                println!("   (none)");
            } else {
                println!("{}", listing.raw());
            }

            if listing.has_active_profile() {
                println!("✅ Active environment profile detected.");
            } else {
                println!(
                    "⚠️  No active environment profile. Run 'solution_exporter auth login'."
                );
            }
            Ok(())
        }
        AuthAction::Login { url } => {
            let url = match url {
                Some(url) => url,
                None => prompter.ask(ui::URL_PROMPT).await?,
            };
            flow.sign_in(&url).await
        }
    }
}
