//! Persisted light/dark preference.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Theme preference of the visitor.
///
/// The page's unstyled baseline is dark, so only `Light` is ever written to
/// storage; a missing or unrecognised value reads back as `Dark`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    /// Light theme (body carries the `light-mode` class)
    Light,
    /// Dark baseline
    #[default]
    Dark,
}

impl ThemePreference {
    /// Storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Interprets a stored value. Only `"light"` selects the light theme.
    #[must_use]
    pub fn from_stored(value: Option<&str>) -> Self {
        match value {
            Some("light") => Self::Light,
            _ => Self::Dark,
        }
    }

    /// The opposite preference.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl fmt::Display for ThemePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
