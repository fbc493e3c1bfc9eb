//! Folio Interact - headless driver for the portfolio interaction layer
//!
//! # Usage
//!
//! ```bash
//! # Replay a session against a page layout
//! folio simulate --layout demos/portfolio.toml --script demos/session.toml
//!
//! # Check contact form input
//! folio contact --email me@example.com --message "Hello there!"
//!
//! # Flip the stored theme preference
//! folio theme toggle
//! ```

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use folio_interact::constants::APP_BINARY_NAME;
use folio_interact::cli::{CliResult, ConfigArgs, ContactArgs, SimulateArgs, ThemeArgs};

/// Folio Interact - scroll, pointer and form behaviour for a portfolio page
#[derive(Parser, Debug)]
#[command(name = APP_BINARY_NAME, author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a scripted session against a page layout
    Simulate(SimulateArgs),
    /// Validate contact form input
    Contact(ContactArgs),
    /// Show or toggle the stored theme preference
    Theme(ThemeArgs),
    /// Manage configuration
    Config(ConfigArgs),
}

impl Command {
    fn execute(&self) -> CliResult<()> {
        match self {
            Self::Simulate(args) => args.execute(),
            Self::Contact(args) => args.execute(),
            Self::Theme(args) => args.execute(),
            Self::Config(args) => args.execute(),
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = cli.command.execute() {
        eprintln!("Error: {}", e);
        std::process::exit(e.code.code());
    }
}
