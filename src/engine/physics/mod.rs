//! Physics simulation powered by `rapier`.
//!
//! The [`PhysicsManager`] struct owns the rigid bodies and colliders and
//! advances them in fixed steps. Collision starts between listening bodies
//! are turned into [`Impact`]s.

pub mod impact;
pub mod simulator;

pub use impact::*;
pub use simulator::*;
