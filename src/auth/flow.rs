//! Sign-in flow against a Dataverse environment
//!
//! The flow first looks for an existing pac profile that points at an
//! organization URL and offers to reuse it. Otherwise it asks for an
//! environment URL and hands the terminal to `pac auth create`, which drives
//! the browser sign-in itself.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::app::runner::{OutputMode, ProcessRunner};
use crate::app::table::ProfileListing;
use crate::cli::prompt::{Prompter, confirm};
use crate::constants::{pac, ui};
use crate::errors::{AuthError, Result};

/// Where the flow currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    Unknown,
    Checking,
    Authenticated,
    NeedsLogin,
    LoggedIn,
    AuthFailed,
}

impl fmt::Display for AuthState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AuthState::Unknown => "unknown",
            AuthState::Checking => "checking",
            AuthState::Authenticated => "authenticated",
            AuthState::NeedsLogin => "needs login",
            AuthState::LoggedIn => "logged in",
            AuthState::AuthFailed => "failed",
        };
        f.write_str(name)
    }
}

/// Prefix `https://` unless the URL already names a scheme starting with `http`
pub fn normalize_environment_url(input: &str) -> String {
    let url = input.trim();
    if url.starts_with("http") {
        url.to_string()
    } else {
        format!("https://{}", url)
    }
}

/// Drives the authentication state machine
pub struct AuthFlow {
    runner: Arc<dyn ProcessRunner>,
    state: AuthState,
}

impl AuthFlow {
    pub fn new(runner: Arc<dyn ProcessRunner>) -> Self {
        Self {
            runner,
            state: AuthState::Unknown,
        }
    }

    pub fn state(&self) -> AuthState {
        self.state
    }

    fn transition(&mut self, next: AuthState) {
        debug!("Auth state: {} -> {}", self.state, next);
        self.state = next;
    }

    /// Run `pac auth list` and scrape it for a usable profile
    ///
    /// A failing listing counts as "no profile".
    pub async fn check_profiles(&mut self) -> Result<ProfileListing> {
        self.transition(AuthState::Checking);
        let output = self
            .runner
            .run(pac::AUTH_LIST_ARGS, OutputMode::Capture)
            .await?;

        let listing = if output.success() && !output.stdout.is_empty() {
            ProfileListing::parse(&output.stdout)
        } else {
            debug!("auth list exited with {}; treating as no profiles", output.exit_code);
            ProfileListing::default()
        };

        if listing.has_active_profile() {
            self.transition(AuthState::Authenticated);
        } else {
            self.transition(AuthState::NeedsLogin);
        }
        Ok(listing)
    }

    /// Reuse an existing profile or sign in to a new environment
    pub async fn ensure_authenticated(&mut self, prompter: &mut dyn Prompter) -> Result<()> {
        println!("\n🔐 Checking authentication status...");
        let listing = self.check_profiles().await?;

        if self.state == AuthState::Authenticated {
            println!("✅ Found existing authentication profile.");
            println!("\n📋 Current profiles:");
            println!("{}", listing.raw());

            if confirm(prompter, "\nUse existing profile? (Y/n): ", true).await? {
                info!("Reusing existing authentication profile");
                self.transition(AuthState::LoggedIn);
                return Ok(());
            }
            self.transition(AuthState::NeedsLogin);
        }

        println!("\n📝 No active profile found or creating new one...");
        println!("This will open a browser window for you to sign in.\n");

        let url = prompter.ask(ui::URL_PROMPT).await?;
        self.sign_in(&url).await
    }

    /// Create a profile for `url` through pac's interactive sign-in
    pub async fn sign_in(&mut self, url: &str) -> Result<()> {
        self.transition(AuthState::NeedsLogin);

        if url.trim().is_empty() {
            self.transition(AuthState::AuthFailed);
            return Err(AuthError::MissingUrl.into());
        }

        let env_url = normalize_environment_url(url);
        println!("\n🌐 Opening browser for authentication to: {}", env_url);
        println!("Please complete the sign-in process in your browser...\n");

        let output = self
            .runner
            .run(&["auth", "create", "--url", env_url.as_str()], OutputMode::PassThrough)
            .await?;

        if output.success() {
            println!("\n✅ Authentication successful!");
            self.transition(AuthState::LoggedIn);
            Ok(())
        } else {
            warn!("pac auth create exited with status {}", output.exit_code);
            self.transition(AuthState::AuthFailed);
            Err(AuthError::SignInFailed {
                exit_code: output.exit_code,
            }
            .into())
        }
    }
}
