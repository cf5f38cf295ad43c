//! Keyboard and mouse state, and the debug key bindings built on top of it.

pub mod debug_panel;
pub mod input_manager;

pub use debug_panel::*;
pub use input_manager::*;
