//! Service layer shared by the controllers.
//!
//! This module contains the small pieces of timing and geometry logic the
//! scroll and pointer controllers are built on.

pub mod debounce;
pub mod frame_loop;
pub mod geometry;

// Re-export commonly used types
pub use debounce::Debouncer;
pub use frame_loop::{FrameLoop, FrameLoopHandle};
pub use geometry::ViewportGeometry;
