//! Drawing the scene with `wgpu`.
//!
//! [`State`] owns the surface and device, [`Renderer`] builds the pipeline and
//! draws every [`SceneObject`](crate::core::SceneObject) once per frame.

mod error;
pub mod mesh;
pub mod renderer;
pub mod state;
pub mod uniform;

pub use error::*;
pub use renderer::*;
pub use state::*;
