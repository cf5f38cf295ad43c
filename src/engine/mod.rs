pub mod audio;
pub mod camera;
pub mod core;
pub mod input;
pub mod physics;
pub mod rendering;
pub mod spawner;
pub mod sync;
pub mod world;

pub use self::world::World;
