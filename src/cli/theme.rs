//! `folio theme`: inspect and flip the stored theme preference.

use clap::{Args, Subcommand};
use serde::Serialize;

use crate::cli::common::{print_json, CliError, CliResult};
use crate::config::Config;
use crate::host::FileStorage;
use crate::interaction::theme::{persist_preference, stored_preference};
use crate::models::ThemePreference;

/// Theme preference commands
#[derive(Args, Debug)]
pub struct ThemeArgs {
    #[command(subcommand)]
    command: ThemeCommand,
}

#[derive(Subcommand, Debug)]
enum ThemeCommand {
    /// Print the stored preference
    Show(ThemeOutputArgs),
    /// Flip between light and dark
    Toggle(ThemeOutputArgs),
}

#[derive(Args, Debug)]
struct ThemeOutputArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize, Debug)]
struct ThemeOutput {
    theme: ThemePreference,
    storage: String,
}

impl ThemeArgs {
    /// Execute theme subcommand
    pub fn execute(&self) -> CliResult<()> {
        let path = Config::storage_file_path()
            .map_err(|e| CliError::io(format!("Failed to locate storage: {}", e)))?;
        let storage = FileStorage::new(&path);

        let (theme, json) = match &self.command {
            ThemeCommand::Show(args) => (stored_preference(&storage), args.json),
            ThemeCommand::Toggle(args) => {
                let next = stored_preference(&storage).toggled();
                persist_preference(&storage, next)
                    .map_err(|e| CliError::io(format!("{:#}", e)))?;
                (next, args.json)
            }
        };

        if json {
            print_json(&ThemeOutput {
                theme,
                storage: path.display().to_string(),
            })
        } else {
            println!("Theme: {}", theme);
            Ok(())
        }
    }
}
