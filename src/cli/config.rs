//! Configuration management CLI commands.

use crate::cli::common::{print_json, CliError, CliResult};
use crate::config::{Config, ResumeMode};
use crate::constants::{APP_BINARY_NAME, APP_NAME};
use clap::{Args, Subcommand};

/// Configuration management commands
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Display current configuration
    Show(ConfigShowArgs),
    /// Set configuration values
    Set(ConfigSetArgs),
    /// Print the config file location
    Path,
}

/// Display current configuration
#[derive(Args, Debug)]
pub struct ConfigShowArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Set configuration values
#[derive(Args, Debug, Default)]
pub struct ConfigSetArgs {
    /// Reveal activation margin in pixels
    #[arg(long, value_name = "PX")]
    activation_margin: Option<f64>,

    /// Fixed header allowance for active-section tracking
    #[arg(long, value_name = "PX")]
    navbar_offset: Option<f64>,

    /// Scroll position at which the navbar compacts
    #[arg(long, value_name = "PX")]
    sticky_threshold: Option<f64>,

    /// Scroll debounce window
    #[arg(long, value_name = "MS")]
    debounce_ms: Option<u32>,

    /// Card tilt divisor
    #[arg(long, value_name = "PX")]
    tilt_divisor: Option<f64>,

    /// Cursor light easing factor in (0, 1]
    #[arg(long, value_name = "FACTOR")]
    cursor_ease: Option<f64>,

    /// Resume button variant (download or print)
    #[arg(long, value_name = "MODE")]
    resume_mode: Option<String>,

    /// Resume document location
    #[arg(long, value_name = "URL")]
    resume_href: Option<String>,

    /// Owner name for the footer
    #[arg(long, value_name = "NAME")]
    owner: Option<String>,
}

impl ConfigArgs {
    /// Execute config subcommand
    pub fn execute(&self) -> CliResult<()> {
        match &self.command {
            ConfigCommand::Show(args) => args.execute(),
            ConfigCommand::Set(args) => args.execute(),
            ConfigCommand::Path => {
                let path = Config::config_file_path()
                    .map_err(|e| CliError::io(format!("Failed to locate config: {}", e)))?;
                println!("{}", path.display());
                Ok(())
            }
        }
    }
}

impl ConfigShowArgs {
    /// Execute show command
    pub fn execute(&self) -> CliResult<()> {
        let config = Config::load()
            .map_err(|e| CliError::validation(format!("Failed to load configuration: {:#}", e)))?;

        if self.json {
            print_json(&config)?;
        } else {
            output_human_readable(&config);
        }

        Ok(())
    }
}

impl ConfigSetArgs {
    fn is_empty(&self) -> bool {
        self.activation_margin.is_none()
            && self.navbar_offset.is_none()
            && self.sticky_threshold.is_none()
            && self.debounce_ms.is_none()
            && self.tilt_divisor.is_none()
            && self.cursor_ease.is_none()
            && self.resume_mode.is_none()
            && self.resume_href.is_none()
            && self.owner.is_none()
    }

    /// Applies the given flags to `config` without validating the result.
    fn apply(&self, config: &mut Config) -> CliResult<()> {
        if let Some(v) = self.activation_margin {
            config.scroll.activation_margin = v;
        }
        if let Some(v) = self.navbar_offset {
            config.scroll.navbar_offset = v;
        }
        if let Some(v) = self.sticky_threshold {
            config.scroll.sticky_threshold = v;
        }
        if let Some(v) = self.debounce_ms {
            config.scroll.debounce_ms = v;
        }
        if let Some(v) = self.tilt_divisor {
            config.pointer.tilt_divisor = v;
        }
        if let Some(v) = self.cursor_ease {
            config.pointer.cursor_ease = v;
        }
        if let Some(mode) = &self.resume_mode {
            config.resume.mode =
                ResumeMode::parse(mode).map_err(|e| CliError::validation(e.to_string()))?;
        }
        if let Some(href) = &self.resume_href {
            config.resume.href.clone_from(href);
        }
        if let Some(owner) = &self.owner {
            config.site.owner.clone_from(owner);
        }
        Ok(())
    }

    /// Execute set command
    pub fn execute(&self) -> CliResult<()> {
        if self.is_empty() {
            return Err(CliError::validation(format!(
                "At least one configuration option must be specified (see `{} config set --help`)",
                APP_BINARY_NAME
            )));
        }

        let mut config = Config::load().unwrap_or_else(|e| {
            tracing::warn!("Ignoring unreadable configuration: {:#}", e);
            Config::default()
        });

        self.apply(&mut config)?;
        config
            .validate()
            .map_err(|e| CliError::validation(format!("Invalid configuration: {}", e)))?;

        config
            .save()
            .map_err(|e| CliError::io(format!("Failed to save configuration: {:#}", e)))?;

        println!("Configuration updated successfully.");

        Ok(())
    }
}

/// Output configuration in human-readable format
fn output_human_readable(config: &Config) {
    let title = format!("{} Configuration", APP_NAME);
    println!("{}", title);
    println!("{}", "=".repeat(title.len()));
    println!();

    println!("Scroll:");
    println!("  Activation Margin: {}px", config.scroll.activation_margin);
    println!("  Navbar Offset:     {}px", config.scroll.navbar_offset);
    println!("  Sticky Threshold:  {}px", config.scroll.sticky_threshold);
    println!(
        "  Debounce:          {}ms ({})",
        config.scroll.debounce_ms,
        if config.scroll.debounce_leading {
            "leading"
        } else {
            "trailing"
        }
    );
    println!();

    println!("Pointer:");
    println!("  Tilt Divisor: {}", config.pointer.tilt_divisor);
    println!("  Cursor Ease:  {}", config.pointer.cursor_ease);
    println!("  Cursor Idle:  {}ms", config.pointer.cursor_idle_ms);
    println!();

    println!("Resume:");
    println!(
        "  Mode: {}",
        format!("{:?}", config.resume.mode).to_lowercase()
    );
    println!("  File: {} ({})", config.resume.href, config.resume.file_name);
    println!("  Busy Label: {}", config.resume.busy_label());
    println!();

    println!("Site:");
    if config.site.owner.is_empty() {
        println!("  Owner: (not configured)");
    } else {
        println!("  Owner: {}", config.site.owner);
    }
    println!(
        "  Typewriter: {}",
        if config.site.typewriter { "on" } else { "off" }
    );
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_overrides_selected_fields() {
        let args = ConfigSetArgs {
            navbar_offset: Some(64.0),
            resume_mode: Some("PRINT".to_string()),
            ..Default::default()
        };
        let mut config = Config::default();
        args.apply(&mut config).unwrap();

        assert_eq!(config.scroll.navbar_offset, 64.0);
        assert_eq!(config.resume.mode, ResumeMode::Print);
        assert_eq!(config.scroll.activation_margin, 150.0);
    }

    #[test]
    fn test_apply_rejects_unknown_resume_mode() {
        let args = ConfigSetArgs {
            resume_mode: Some("fax".to_string()),
            ..Default::default()
        };
        let err = args.apply(&mut Config::default()).unwrap_err();
        assert!(err.message.contains("fax"));
    }

    #[test]
    fn test_empty_set_is_rejected() {
        assert!(ConfigSetArgs::default().is_empty());
        assert!(ConfigSetArgs::default().execute().is_err());
    }
}
