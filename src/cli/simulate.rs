//! `folio simulate`: replay a script against a page layout.

use clap::Args;
use std::path::PathBuf;
use std::rc::Rc;

use crate::cli::common::{print_json, CliError, CliResult};
use crate::config::{Config, ResumeMode};
use crate::host::MemoryStorage;
use crate::models::{PageLayout, Script};
use crate::replay::{Replay, Snapshot};

/// Mount the page headlessly and replay a script of user actions
#[derive(Debug, Clone, Args)]
pub struct SimulateArgs {
    /// Page layout (.toml, .json, .yaml or .yml)
    #[arg(short, long, value_name = "FILE")]
    pub layout: PathBuf,

    /// Script of steps to apply (.toml or .json); omitted means load only
    #[arg(short, long, value_name = "FILE")]
    pub script: Option<PathBuf>,

    /// Output snapshots as JSON
    #[arg(long)]
    pub json: bool,

    /// Override the resume button variant (download or print)
    #[arg(long, value_name = "MODE")]
    pub resume_mode: Option<String>,
}

impl SimulateArgs {
    /// Execute the simulate command
    pub fn execute(&self) -> CliResult<()> {
        let mut config = Config::load()
            .map_err(|e| CliError::validation(format!("Failed to load configuration: {:#}", e)))?;
        if let Some(mode) = &self.resume_mode {
            config.resume.mode =
                ResumeMode::parse(mode).map_err(|e| CliError::validation(e.to_string()))?;
        }

        let layout = PageLayout::load(&self.layout)
            .map_err(|e| CliError::io(format!("Failed to load layout: {:#}", e)))?;
        let script = match &self.script {
            Some(path) => Script::load(path)
                .map_err(|e| CliError::io(format!("Failed to load script: {:#}", e)))?,
            None => Script::default(),
        };

        tracing::info!(
            "Simulating {} element(s), {} step(s)",
            layout.element_count(),
            script.steps.len()
        );

        let mut replay = Replay::new(&layout, &config, Rc::new(MemoryStorage::new()))
            .map_err(|e| CliError::validation(format!("{:#}", e)))?;
        let snapshots = replay
            .run(&script)
            .map_err(|e| CliError::validation(format!("{:#}", e)))?;

        if self.json {
            print_json(&snapshots)
        } else {
            print_table(&snapshots);
            Ok(())
        }
    }
}

fn print_table(snapshots: &[Snapshot]) {
    println!(
        "{:>4}  {:<14} {:>7} {:>8}  {:<8} {:<6} {:<7} {:<5}  active",
        "step", "action", "t(ms)", "scroll", "revealed", "menu", "cursor", "theme"
    );
    for s in snapshots {
        let active = if s.active_links.is_empty() {
            "-".to_string()
        } else {
            s.active_links.join(",")
        };
        println!(
            "{:>4}  {:<14} {:>7} {:>8.1}  {:<8} {:<6} {:<7} {:<5}  {}",
            s.step,
            s.action,
            s.time_ms,
            s.scroll_y,
            format!("{}/{}", s.revealed, s.reveal_total),
            if s.menu_open { "open" } else { "closed" },
            if s.cursor_visible { "shown" } else { "hidden" },
            s.theme,
            active
        );
    }

    if let Some(last) = snapshots.last() {
        for alert in &last.alerts {
            println!("alert: {}", alert);
        }
        if last.downloads > 0 || last.prints > 0 {
            println!("resume: {} download(s), {} print(s)", last.downloads, last.prints);
        }
    }
}
