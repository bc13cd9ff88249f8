//! Interrupt handling for the interactive session
//!
//! The session future is raced against [`wait_for_interrupt`]; whichever
//! finishes first wins, and dropping the session also kills any running pac
//! child.

use std::fmt;

use tokio::signal;
use tracing::{info, warn};

/// Which signal ended the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interrupt {
    CtrlC,
    Terminate,
}

impl fmt::Display for Interrupt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Interrupt::CtrlC => f.write_str("Ctrl+C"),
            Interrupt::Terminate => f.write_str("SIGTERM"),
        }
    }
}

/// Resolve once Ctrl+C or SIGTERM arrives
///
/// A handler that cannot be installed never fires.
pub async fn wait_for_interrupt() -> Interrupt {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    let interrupt = tokio::select! {
        _ = ctrl_c => Interrupt::CtrlC,
        _ = terminate => Interrupt::Terminate,
    };

    info!("Received {}, cancelling", interrupt);
    interrupt
}
