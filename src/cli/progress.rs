//! Elapsed-time spinner for long-running pac operations
//!
//! The spinner is ticked by a background tokio task while a shared running
//! flag is set. [`ProgressIndicator::stop`] clears the flag and awaits the task
//! before printing the final status line, so the two never interleave on the
//! terminal.
//!
//! # Examples
//!
//! ```rust,no_run
//! use solution_exporter::cli::{ProgressConfig, ProgressIndicator};
//!
//! # async fn example() {
//! let spinner = ProgressIndicator::start("Exporting ContosoCore", &ProgressConfig::default());
//! // ... run the export ...
//! spinner.stop(true).await;
//! # }
//! ```

use std::fmt::Write as _;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use indicatif::{ProgressBar, ProgressState, ProgressStyle};
use tokio::task::JoinHandle;
use tracing::debug;

use crate::constants::progress;

/// Configuration for the progress indicator
#[derive(Debug, Clone)]
pub struct ProgressConfig {
    /// Repaint the spinner line; the final status line is printed regardless
    pub enabled: bool,
    /// How often the spinner advances
    pub tick_interval: Duration,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            tick_interval: progress::DEFAULT_TICK_INTERVAL,
        }
    }
}

/// Format a duration as `MM:SS`; minutes keep growing past 59
pub fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Final line printed when the indicator stops
pub fn status_line(label: &str, success: bool, elapsed: Duration) -> String {
    if success {
        format!(
            "{} {} completed in {}",
            progress::SUCCESS_GLYPH,
            label,
            format_elapsed(elapsed)
        )
    } else {
        format!(
            "{} {} failed after {}",
            progress::FAILURE_GLYPH,
            label,
            format_elapsed(elapsed)
        )
    }
}

fn spinner_style() -> ProgressStyle {
    // The last tick string is indicatif's "finished" frame
    let mut ticks: Vec<&str> = progress::FRAMES.to_vec();
    ticks.push(" ");

    let style = ProgressStyle::default_spinner()
        .with_key("mmss", |state: &ProgressState, w: &mut dyn std::fmt::Write| {
            let _ = write!(w, "{}", format_elapsed(state.elapsed()));
        })
        .tick_strings(&ticks);

    match style.clone().template("{spinner} {msg}... [{mmss}]  ") {
        Ok(templated) => templated,
        Err(e) => {
            debug!("Falling back to default spinner template: {}", e);
            style
        }
    }
}

/// A running spinner; consumed by [`ProgressIndicator::stop`]
pub struct ProgressIndicator {
    label: String,
    started: Instant,
    running: Arc<AtomicBool>,
    bar: ProgressBar,
    ticker: Option<JoinHandle<()>>,
}

impl ProgressIndicator {
    /// Start repainting `label` with an animated glyph and the elapsed time
    pub fn start(label: impl Into<String>, config: &ProgressConfig) -> Self {
        let label = label.into();
        let visible = config.enabled && atty::is(atty::Stream::Stderr);

        let bar = if visible {
            let bar = ProgressBar::new_spinner();
            bar.set_style(spinner_style());
            bar
        } else {
            ProgressBar::hidden()
        };
        bar.set_message(label.clone());

        let running = Arc::new(AtomicBool::new(true));
        let ticker = {
            let running = running.clone();
            let bar = bar.clone();
            let tick_interval = config.tick_interval;

            tokio::spawn(async move {
                let mut interval = tokio::time::interval(tick_interval);
                while running.load(Ordering::Acquire) {
                    bar.tick();
                    interval.tick().await;
                }
            })
        };

        debug!("Progress indicator started: {}", label);
        Self {
            label,
            started: Instant::now(),
            running,
            bar,
            ticker: Some(ticker),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Halt the spinner, clear its line and print the final status
    ///
    /// Returns the total elapsed time.
    pub async fn stop(mut self, success: bool) -> Duration {
        self.running.store(false, Ordering::Release);
        if let Some(ticker) = self.ticker.take() {
            let _ = ticker.await;
        }

        self.bar.finish_and_clear();
        let elapsed = self.elapsed();
        println!("{}", status_line(&self.label, success, elapsed));

        debug!(
            "Progress indicator stopped: {} (success: {}, elapsed: {:?})",
            self.label, success, elapsed
        );
        elapsed
    }
}

impl Drop for ProgressIndicator {
    fn drop(&mut self) {
        // Dropped without stop(), e.g. when the session is interrupted
        self.running.store(false, Ordering::Release);
    }
}
