//! Configuration management for the application.
//!
//! This module handles loading, validating, and saving the interaction policy
//! values (reveal margin, navbar offset, debounce window, easing, ...) in TOML
//! format with platform-specific directory resolution.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::constants::{
    ACTIVATION_MARGIN, CONFIG_DIR_ENV, CONFIG_DIR_NAME, CURSOR_EASE, CURSOR_IDLE_MS,
    NAVBAR_OFFSET, RESUME_RESTORE_MS, SCROLL_DEBOUNCE_MS, STICKY_THRESHOLD, TILT_DIVISOR,
};

/// Scroll-driven behaviour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    /// Distance above the viewport bottom at which `.reveal` elements activate
    pub activation_margin: f64,
    /// Fixed header allowance subtracted from section offsets
    pub navbar_offset: f64,
    /// Scroll position past which `#navbar` gets the `scrolled` class
    pub sticky_threshold: f64,
    /// Quiet period of the debounced scroll handlers
    pub debounce_ms: u32,
    /// Run debounced handlers on the first call of a burst instead of the last
    pub debounce_leading: bool,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            activation_margin: ACTIVATION_MARGIN,
            navbar_offset: NAVBAR_OFFSET,
            sticky_threshold: STICKY_THRESHOLD,
            debounce_ms: SCROLL_DEBOUNCE_MS,
            debounce_leading: true,
        }
    }
}

/// Pointer-driven behaviour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointerConfig {
    /// Pixels of pointer offset per degree of card tilt
    pub tilt_divisor: f64,
    /// Fraction of the remaining distance the cursor light covers each frame
    pub cursor_ease: f64,
    /// Idle time before the cursor light fades out
    pub cursor_idle_ms: u32,
}

impl Default for PointerConfig {
    fn default() -> Self {
        Self {
            tilt_divisor: TILT_DIVISOR,
            cursor_ease: CURSOR_EASE,
            cursor_idle_ms: CURSOR_IDLE_MS,
        }
    }
}

/// How the resume button delivers the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ResumeMode {
    /// Download a static file
    #[default]
    Download,
    /// Open the print dialog (print-to-PDF)
    Print,
}

impl ResumeMode {
    /// Parses `download` / `print` (case-insensitive).
    pub fn parse(value: &str) -> Result<Self> {
        match value.to_lowercase().as_str() {
            "download" => Ok(Self::Download),
            "print" => Ok(Self::Print),
            other => anyhow::bail!(
                "Invalid resume mode '{}'. Must be 'download' or 'print'",
                other
            ),
        }
    }

    /// Label shown on the button while the action runs.
    #[must_use]
    pub const fn default_busy_label(self) -> &'static str {
        match self {
            Self::Download => "Downloading...",
            Self::Print => "Preparing...",
        }
    }
}

/// Resume button settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResumeConfig {
    /// Delivery variant
    pub mode: ResumeMode,
    /// Document to download
    pub href: String,
    /// File name suggested to the browser
    pub file_name: String,
    /// Button label while busy (defaults per mode)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub busy_label: Option<String>,
    /// Delay before the original label comes back
    pub restore_ms: u32,
}

impl Default for ResumeConfig {
    fn default() -> Self {
        Self {
            mode: ResumeMode::default(),
            href: "resume.pdf".to_string(),
            file_name: "Resume.pdf".to_string(),
            busy_label: None,
            restore_ms: RESUME_RESTORE_MS,
        }
    }
}

impl ResumeConfig {
    /// Busy label, falling back to the mode's default.
    #[must_use]
    pub fn busy_label(&self) -> &str {
        self.busy_label
            .as_deref()
            .unwrap_or_else(|| self.mode.default_busy_label())
    }
}

/// Page-level extras.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Name printed in the footer copyright line (empty to omit)
    pub owner: String,
    /// Retype the hero subtitle on load
    pub typewriter: bool,
    /// Delay before the typewriter starts
    pub typewriter_delay_ms: u32,
    /// Delay between typed characters
    pub typewriter_interval_ms: u32,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            owner: String::new(),
            typewriter: false,
            typewriter_delay_ms: 1000,
            typewriter_interval_ms: 100,
        }
    }
}

/// Application configuration.
///
/// # File Location
///
/// - Linux: `~/.config/FolioInteract/config.toml`
/// - macOS: `~/Library/Application Support/FolioInteract/config.toml`
/// - Windows: `%APPDATA%\FolioInteract\config.toml`
///
/// `FOLIO_CONFIG_DIR` replaces the directory on every platform.
///
/// # Validation
///
/// - `activation_margin`, `navbar_offset` and `sticky_threshold` must be finite
/// - `tilt_divisor` must be positive
/// - `cursor_ease` must lie in `(0, 1]`
/// - `resume.href` must not be empty
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Scroll behaviour
    pub scroll: ScrollConfig,
    /// Pointer behaviour
    pub pointer: PointerConfig,
    /// Resume button
    pub resume: ResumeConfig,
    /// Page extras
    pub site: SiteConfig,
}

impl Config {
    /// Creates a new Config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the config directory path.
    ///
    /// Uses `FOLIO_CONFIG_DIR` when set, otherwise the platform directory:
    ///
    /// - Linux: `~/.config/FolioInteract/`
    /// - macOS: `~/Library/Application Support/FolioInteract/`
    /// - Windows: `%APPDATA%\FolioInteract\`
    pub fn config_dir() -> Result<PathBuf> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
            if !dir.is_empty() {
                return Ok(PathBuf::from(dir));
            }
        }

        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join(CONFIG_DIR_NAME);

        Ok(config_dir)
    }

    /// Gets the full path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Gets the path of the file-backed preference storage used by the CLI.
    pub fn storage_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("storage.toml"))
    }

    /// Checks if the config file exists on disk.
    #[must_use]
    pub fn exists() -> bool {
        Self::config_file_path()
            .map(|path| path.exists())
            .unwrap_or(false)
    }

    /// Loads configuration from the config file.
    ///
    /// If the file doesn't exist, returns default configuration.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_file_path()?;

        if !config_path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(&config_path).context(format!(
            "Failed to read config file: {}",
            config_path.display()
        ))?;

        let config = Self::from_toml_str(&content).context(format!(
            "Failed to parse config file: {}",
            config_path.display()
        ))?;

        Ok(config)
    }

    /// Parses and validates a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("Invalid configuration TOML")?;
        config.validate()?;
        Ok(config)
    }

    /// Saves configuration to the config file using atomic write.
    ///
    /// Uses temp file + rename pattern for atomic writes.
    pub fn save(&self) -> Result<()> {
        self.validate()?;

        // Ensure config directory exists
        let config_dir = Self::config_dir()?;
        fs::create_dir_all(&config_dir).context(format!(
            "Failed to create config directory: {}",
            config_dir.display()
        ))?;

        // Serialize to TOML
        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        let config_path = Self::config_file_path()?;
        let temp_path = config_path.with_extension("toml.tmp");

        // Write to temp file
        fs::write(&temp_path, content).context(format!(
            "Failed to write temp config file: {}",
            temp_path.display()
        ))?;

        // Atomic rename
        fs::rename(&temp_path, &config_path).context(format!(
            "Failed to rename temp config file to: {}",
            config_path.display()
        ))?;

        Ok(())
    }

    /// Validates configuration values.
    pub fn validate(&self) -> Result<()> {
        let scroll = &self.scroll;
        for (name, value) in [
            ("scroll.activation_margin", scroll.activation_margin),
            ("scroll.navbar_offset", scroll.navbar_offset),
            ("scroll.sticky_threshold", scroll.sticky_threshold),
        ] {
            if !value.is_finite() {
                anyhow::bail!("{} must be a finite number, got {}", name, value);
            }
        }

        if !(self.pointer.tilt_divisor.is_finite() && self.pointer.tilt_divisor > 0.0) {
            anyhow::bail!(
                "pointer.tilt_divisor must be positive, got {}",
                self.pointer.tilt_divisor
            );
        }

        let ease = self.pointer.cursor_ease;
        if !(ease > 0.0 && ease <= 1.0) {
            anyhow::bail!("pointer.cursor_ease must be in (0, 1], got {}", ease);
        }

        if self.resume.href.trim().is_empty() {
            anyhow::bail!("resume.href must not be empty");
        }

        Ok(())
    }
}
