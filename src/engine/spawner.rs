//! Creation of falling shapes.
//!
//! Spawning a shape creates a scene object and a matching rigid body, hooks the
//! body up to the collision sound and records both in the [`SyncList`].

use crate::config::SpawnConfig;
use crate::core::{Material, MeshKind, Scene, SceneObject};
use crate::physics::PhysicsManager;
use crate::sync::{SyncList, TrackedPair};
use log::debug;
use nalgebra::Vector3;
use rand::Rng;
use rapier3d::prelude::SharedShape;

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ShapeKind {
    Sphere { radius: f32 },
    Cube { edge: f32 },
}

impl ShapeKind {
    pub fn name(&self) -> &'static str {
        match self {
            ShapeKind::Sphere { .. } => "Sphere",
            ShapeKind::Cube { .. } => "Cube",
        }
    }

    pub fn mesh(&self) -> MeshKind {
        match self {
            ShapeKind::Sphere { .. } => MeshKind::Sphere,
            ShapeKind::Cube { .. } => MeshKind::Cube,
        }
    }

    /// Factor the shared unit mesh is scaled by.
    pub fn visual_scale(&self) -> f32 {
        match *self {
            ShapeKind::Sphere { radius } => radius,
            ShapeKind::Cube { edge } => edge,
        }
    }

    pub fn collider_shape(&self) -> SharedShape {
        match *self {
            ShapeKind::Sphere { radius } => SharedShape::ball(radius),
            ShapeKind::Cube { edge } => {
                let half = edge / 2.0;
                SharedShape::cuboid(half, half, half)
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct Spawner {
    pub material: Material,
    pub mass: f32,
}

impl Default for Spawner {
    fn default() -> Self {
        Spawner {
            material: Material::default(),
            mass: 1.0,
        }
    }
}

impl Spawner {
    /// Creates the scene object and rigid body for `shape` at `position` and
    /// starts tracking them.
    ///
    /// Sizes and positions are handed to the engines as they are.
    pub fn spawn(
        &self,
        scene: &mut Scene,
        physics: &mut PhysicsManager,
        tracked: &mut SyncList,
        shape: ShapeKind,
        position: Vector3<f32>,
    ) -> TrackedPair {
        let mut object = SceneObject::new(shape.name(), shape.mesh(), self.material);
        object.cast_shadow = true;
        object.transform.set_uniform_scale(shape.visual_scale());
        object.transform.set_position_vec(position);
        let object = scene.add(object);

        let body = physics.add_dynamic_body(shape.collider_shape(), position, self.mass);
        physics.set_collision_listener(body, true);

        let pair = TrackedPair {
            object,
            body,
            shape,
        };
        tracked.push(pair);

        debug!(
            "Spawned {shape:?} at [{:.2}, {:.2}, {:.2}]",
            position.x, position.y, position.z
        );

        pair
    }
}

/// Where and how large randomly spawned shapes are.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SpawnArea {
    pub max_size: f32,
    pub sphere_spread: f32,
    pub cube_spread: f32,
    pub height: f32,
}

impl Default for SpawnArea {
    fn default() -> Self {
        SpawnArea::from(&SpawnConfig::default())
    }
}

impl From<&SpawnConfig> for SpawnArea {
    fn from(config: &SpawnConfig) -> Self {
        SpawnArea {
            max_size: config.max_size,
            sphere_spread: config.sphere_spread,
            cube_spread: config.cube_spread,
            height: config.height,
        }
    }
}

impl SpawnArea {
    pub fn random_sphere<R: Rng + ?Sized>(&self, rng: &mut R) -> (ShapeKind, Vector3<f32>) {
        let radius = rng.r#gen::<f32>() * self.max_size;
        let position = self.random_position(rng, self.sphere_spread);
        (ShapeKind::Sphere { radius }, position)
    }

    pub fn random_cube<R: Rng + ?Sized>(&self, rng: &mut R) -> (ShapeKind, Vector3<f32>) {
        let edge = rng.r#gen::<f32>() * self.max_size;
        let position = self.random_position(rng, self.cube_spread);
        (ShapeKind::Cube { edge }, position)
    }

    fn random_position<R: Rng + ?Sized>(&self, rng: &mut R, spread: f32) -> Vector3<f32> {
        let x = (rng.r#gen::<f32>() - 0.5) * spread;
        let z = (rng.r#gen::<f32>() - 0.5) * spread;
        Vector3::new(x, self.height, z)
    }
}
