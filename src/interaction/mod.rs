//! Pointer, click and keyboard behaviour.

pub mod a11y;
pub mod cards;
pub mod cursor_light;
pub mod footer;
pub mod menu;
pub mod resume;
pub mod theme;
pub mod typewriter;

pub use cursor_light::{CursorLight, CursorLightState};
pub use menu::{MenuState, MenuToggle};
pub use theme::ThemeController;
