//! Core data structures used throughout the engine.
//!
//! This includes the scene objects, their transforms and the frame clock.

pub mod clock;
pub mod scene;
pub mod transform;

pub use clock::*;
pub use scene::*;
pub use transform::*;
