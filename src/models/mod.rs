//! Data models for geometry, theme preference and simulated pages.
//!
//! Models are independent of the host environment; the controllers read and
//! produce these types, and the simulator deserializes page layouts and
//! scripts from them.

pub mod geometry;
pub mod page_layout;
pub mod script;
pub mod theme;

// Re-export all model types
pub use geometry::{PageOffset, Point, Rect};
pub use page_layout::{ElementSpec, PageLayout, Viewport};
pub use script::{Script, ScriptStep};
pub use theme::ThemePreference;
