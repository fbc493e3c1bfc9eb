//! Application-wide constants.
//!
//! This module defines the application name and the default policy values
//! shared by the scroll and pointer controllers. Every value here can be
//! overridden through [`crate::config::Config`].

/// The display name of the application (human-readable, with proper capitalization).
pub const APP_NAME: &str = "Folio Interact";

/// The binary name of the application (used in command examples, lowercase).
pub const APP_BINARY_NAME: &str = "folio";

/// Directory name used under the platform config directory.
pub const CONFIG_DIR_NAME: &str = "FolioInteract";

/// Environment variable that overrides the config directory.
pub const CONFIG_DIR_ENV: &str = "FOLIO_CONFIG_DIR";

/// Distance above the viewport bottom an element must cross before it is revealed.
pub const ACTIVATION_MARGIN: f64 = 150.0;

/// Fixed header allowance subtracted from each section's page offset.
pub const NAVBAR_OFFSET: f64 = 100.0;

/// Scroll position past which the header switches to its compact style.
pub const STICKY_THRESHOLD: f64 = 100.0;

/// Quiet period for scroll debouncing.
pub const SCROLL_DEBOUNCE_MS: u32 = 10;

/// Divisor turning pointer offset (px) into card tilt (deg).
pub const TILT_DIVISOR: f64 = 20.0;

/// Per-frame easing factor of the cursor light.
pub const CURSOR_EASE: f64 = 0.1;

/// Idle time after which the cursor light fades out.
pub const CURSOR_IDLE_MS: u32 = 2000;

/// Delay before the resume button gets its original label back.
pub const RESUME_RESTORE_MS: u32 = 1000;

/// Minimum contact message length, in characters.
pub const MIN_MESSAGE_LEN: usize = 10;

/// Storage key of the persisted theme preference.
pub const THEME_STORAGE_KEY: &str = "theme";

/// Body class marking the light theme.
pub const LIGHT_MODE_CLASS: &str = "light-mode";

/// Class toggled on every "on" presentation flag (menu, nav link, reveal, light).
pub const ACTIVE_CLASS: &str = "active";
