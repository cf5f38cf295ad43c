//! The window and its event loop.
//!
//! [`AppSettings::run`] opens the window, creates the [`World`](crate::World)
//! and renderer and drives one frame per redraw. An [`AppState`] gets called
//! around that for setup and per-frame hooks.

pub mod app;
pub mod state;

pub use app::*;
pub use state::*;
