//! Scripted interaction sequences for the simulator.
//!
//! A script is an ordered list of steps, each tagged by `action`:
//!
//! ```toml
//! [[steps]]
//! action = "scroll"
//! y = 1200
//!
//! [[steps]]
//! action = "advance"
//! ms = 20
//!
//! [[steps]]
//! action = "click"
//! target = "#menuToggle"
//! ```
//!
//! Targets are selectors resolved against the simulated page; the first match wins.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A single simulated user or clock action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ScriptStep {
    /// Scroll the window to `y` and fire `scroll`
    Scroll {
        /// New vertical scroll position
        y: f64,
    },
    /// Let virtual time pass, firing due timers
    Advance {
        /// Milliseconds to advance
        ms: u64,
    },
    /// Run animation frames
    Frames {
        /// Number of frames
        count: u32,
    },
    /// Click an element
    Click {
        /// Selector of the clicked element
        target: String,
    },
    /// Move the pointer; fires on the document and, when given, on `target`
    PointerMove {
        /// Client x
        x: f64,
        /// Client y
        y: f64,
        /// Element under the pointer
        #[serde(default)]
        target: Option<String>,
    },
    /// Pointer enters an element, or the document when `target` is omitted
    PointerEnter {
        /// Client x
        #[serde(default)]
        x: f64,
        /// Client y
        #[serde(default)]
        y: f64,
        /// Entered element
        #[serde(default)]
        target: Option<String>,
    },
    /// Pointer leaves an element, or the document when `target` is omitted
    PointerLeave {
        /// Left element
        #[serde(default)]
        target: Option<String>,
    },
    /// Mouse button press on the document
    PointerDown,
    /// Key press on the document
    Key {
        /// Key name as reported by the browser (`Tab`, `Enter`, ...)
        key: String,
    },
    /// Focus an element
    Focus {
        /// Focused element
        target: String,
    },
    /// Blur an element
    Blur {
        /// Blurred element
        target: String,
    },
    /// Submit a form
    Submit {
        /// Form selector
        target: String,
    },
}

impl ScriptStep {
    /// Short action name, as written in script files.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Scroll { .. } => "scroll",
            Self::Advance { .. } => "advance",
            Self::Frames { .. } => "frames",
            Self::Click { .. } => "click",
            Self::PointerMove { .. } => "pointer_move",
            Self::PointerEnter { .. } => "pointer_enter",
            Self::PointerLeave { .. } => "pointer_leave",
            Self::PointerDown => "pointer_down",
            Self::Key { .. } => "key",
            Self::Focus { .. } => "focus",
            Self::Blur { .. } => "blur",
            Self::Submit { .. } => "submit",
        }
    }
}

/// An ordered list of steps.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Script {
    /// Steps, applied in order
    #[serde(default)]
    pub steps: Vec<ScriptStep>,
}

impl Script {
    /// Loads a script; `.json` files are parsed as JSON, everything else as TOML.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .context(format!("Failed to read script: {}", path.display()))?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            serde_json::from_str(&content)
                .context(format!("Failed to parse JSON script: {}", path.display()))
        } else {
            toml::from_str(&content).context(format!("Failed to parse script: {}", path.display()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_toml_script() {
        let script: Script = toml::from_str(
            r##"
[[steps]]
action = "scroll"
y = 1200

[[steps]]
action = "pointer_move"
x = 10
y = 20
target = ".project-card"

[[steps]]
action = "pointer_leave"

[[steps]]
action = "pointer_down"
"##,
        )
        .unwrap();

        assert_eq!(script.steps.len(), 4);
        assert_eq!(script.steps[0], ScriptStep::Scroll { y: 1200.0 });
        assert_eq!(
            script.steps[1],
            ScriptStep::PointerMove {
                x: 10.0,
                y: 20.0,
                target: Some(".project-card".to_string())
            }
        );
        assert_eq!(script.steps[2], ScriptStep::PointerLeave { target: None });
        assert_eq!(script.steps[3].name(), "pointer_down");
    }

    #[test]
    fn test_parse_json_step() {
        let step: ScriptStep =
            serde_json::from_str(r##"{"action":"click","target":"#menuToggle"}"##).unwrap();
        assert_eq!(
            step,
            ScriptStep::Click {
                target: "#menuToggle".to_string()
            }
        );
    }
}
