//! Folio Interact Library
//!
//! Client-side behaviour for a single-page portfolio: scroll reveal,
//! active-section tracking, the mobile menu, card tilt, the cursor light,
//! contact validation and a persisted light/dark theme.
//!
//! Every controller talks to the page through the traits in [`host`], so the
//! same code runs against the real DOM (`browser` feature) and against the
//! in-memory [`host::sim::SimHost`] used by [`replay`] and the test suite.

// Module declarations
pub mod app;
pub mod cli;
pub mod config;
pub mod constants;
pub mod contact;
pub mod host;
pub mod interaction;
pub mod models;
pub mod replay;
pub mod scroll;
pub mod services;

pub use app::Portfolio;
pub use config::Config;
