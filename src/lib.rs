//! A small physics playground: spheres and cubes dropped onto a floor,
//! simulated with `rapier3d`, drawn with `wgpu`, with a hit sound on every
//! hard enough impact.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod config;
pub mod engine;
pub mod utils;
pub mod windowing;

pub use engine::*;
pub use windowing::*;

pub use ::log;
pub use ::winit;
