//! The interactive export session
//!
//! Installation check, then authentication, then export rounds until the user
//! quits or declines another export. Rounds are an explicit loop that lists
//! solutions afresh every time.
//!
//! Errors in the first round end the program with a failure. In later rounds
//! an empty catalog, a bad selection or a failed export only ends the session.

use std::sync::Arc;

use tracing::{info, warn};

use crate::app::{
    ExportConfig, ExportReport, Exporter, ProcessRunner, Selection, SolutionCatalog,
    resolve_selection,
};
use crate::auth::AuthFlow;
use crate::cli::progress::ProgressConfig;
use crate::cli::prompt::{Prompter, confirm};
use crate::cli::startup::{banner, check_installation};
use crate::constants::{table, ui};
use crate::errors::{CatalogError, Result};

const SELECTION_PROMPT: &str = "Enter the number of the solution to export (or 'q' to quit): ";
const ANOTHER_PROMPT: &str = "\nExport another solution? (y/N): ";

/// How a single round ended
#[derive(Debug)]
enum RoundOutcome {
    Exported(ExportReport),
    Quit,
}

/// What a finished session accomplished
#[derive(Debug, Default)]
pub struct SessionSummary {
    /// Successful exports in the order they happened
    pub exported: Vec<ExportReport>,
    /// The user typed the quit token
    pub quit: bool,
}

/// Interactive session driver
pub struct Session {
    runner: Arc<dyn ProcessRunner>,
    auth: AuthFlow,
    catalog: SolutionCatalog,
    exporter: Exporter,
}

impl Session {
    pub fn new(
        runner: Arc<dyn ProcessRunner>,
        export: ExportConfig,
        progress: ProgressConfig,
    ) -> Self {
        Self {
            auth: AuthFlow::new(runner.clone()),
            catalog: SolutionCatalog::new(runner.clone()),
            exporter: Exporter::new(runner.clone(), export, progress),
            runner,
        }
    }

    /// Run the session to completion
    pub async fn run(&mut self, prompter: &mut dyn Prompter) -> Result<SessionSummary> {
        println!("{}", banner());

        check_installation(self.runner.as_ref()).await?;
        self.auth.ensure_authenticated(prompter).await?;

        let mut summary = SessionSummary::default();
        for round in 1usize.. {
            let outcome = match self.round(prompter).await {
                Ok(outcome) => outcome,
                Err(e) if round > 1 && e.ends_round_only() => {
                    warn!("Round {} ended: {} ({})", round, e, e.category());
                    if let Some(report) = e.user_report() {
                        println!("{}", report);
                    }
                    break;
                }
                Err(e) => return Err(e),
            };

            match outcome {
                RoundOutcome::Quit => {
                    println!("👋 Goodbye!");
                    summary.quit = true;
                    break;
                }
                RoundOutcome::Exported(report) => {
                    let rule = "=".repeat(ui::BANNER_WIDTH);
                    println!("\n{}\n🎉 Export complete!\n{}", rule, rule);
                    summary.exported.push(report);

                    if !confirm(prompter, ANOTHER_PROMPT, false).await? {
                        break;
                    }
                }
            }
        }

        info!("Session finished with {} export(s)", summary.exported.len());
        Ok(summary)
    }

    /// List, select and export once
    async fn round(&self, prompter: &mut dyn Prompter) -> Result<RoundOutcome> {
        let records = self.catalog.list().await?;
        if records.is_empty() {
            return Err(CatalogError::Empty.into());
        }

        println!("\n{}", "-".repeat(table::RULE_WIDTH));
        let input = prompter.ask(SELECTION_PROMPT).await?;

        let name = match resolve_selection(&input, &records)? {
            Selection::Quit => return Ok(RoundOutcome::Quit),
            Selection::Indexed(name) => name,
            Selection::Literal(name) => {
                println!("ℹ️  Using direct name input: {}", name);
                name
            }
        };

        let report = self.exporter.export(&name).await?.into_result()?;
        Ok(RoundOutcome::Exported(report))
    }
}
