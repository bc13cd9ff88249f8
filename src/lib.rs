//! Solution Exporter Library
//!
//! An interactive front-end for the PowerApps CLI (`pac`) that signs in to a
//! Power Platform environment, lists its solutions and exports the chosen one
//! as an unmanaged, timestamped zip archive.

pub mod app;
pub mod auth;
pub mod cli;
pub mod config;
pub mod constants;
pub mod errors;
pub mod prelude;

#[cfg(test)]
mod test_helpers;

// Re-export commonly used types for convenience
pub use errors::{AppError, Result};
