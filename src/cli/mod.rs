//! CLI command handlers for Folio Interact.
//!
//! Headless access to the interaction layer: replaying scripted sessions
//! against a page layout, checking contact input, and managing the stored
//! theme preference and configuration.

pub mod common;
pub mod config;
pub mod contact;
pub mod simulate;
pub mod theme;

// Re-export types used by main.rs and tests
pub use common::{CliError, CliResult, ExitCode};
pub use config::ConfigArgs;
pub use contact::ContactArgs;
pub use simulate::SimulateArgs;
pub use theme::ThemeArgs;
