//! Scroll-driven behaviour.
//!
//! - [`reveal`]: one-way reveal-on-scroll activation
//! - [`active_section`]: navigation link highlighting for the current section
//! - [`sticky`]: `#navbar.scrolled` flag
//! - [`anchors`]: smooth scrolling for in-page links
//! - [`lazy_images`]: `data-src` images loaded on first sight

pub mod active_section;
pub mod anchors;
pub mod lazy_images;
pub mod reveal;
pub mod sticky;

pub use active_section::{ActiveSectionTracker, SectionRange};
pub use lazy_images::LazyImages;
pub use reveal::{RevealController, RevealState};
pub use sticky::StickyHeader;
