//! Pairs of scene objects and the rigid bodies that drive them.
//!
//! Every spawned shape lives twice: once as a [`SceneObject`](crate::core::SceneObject)
//! that gets drawn and once as a rigid body that gets simulated. The
//! [`SyncList`] remembers which belongs to which and copies the simulated pose
//! onto the drawn object once per frame.

use crate::core::{ObjectId, Scene};
use crate::physics::PhysicsManager;
use crate::spawner::ShapeKind;
use log::trace;
use rapier3d::prelude::RigidBodyHandle;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TrackedPair {
    pub object: ObjectId,
    pub body: RigidBodyHandle,
    pub shape: ShapeKind,
}

#[derive(Debug, Default, Clone)]
pub struct SyncList {
    pairs: Vec<TrackedPair>,
}

impl SyncList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, pair: TrackedPair) {
        self.pairs.push(pair);
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TrackedPair> {
        self.pairs.iter()
    }

    /// Removes every pair from the list, in spawn order.
    pub fn drain(&mut self) -> std::vec::Drain<'_, TrackedPair> {
        self.pairs.drain(..)
    }

    /// Copies position and orientation of every body onto its scene object.
    ///
    /// Scale is left alone, it encodes the size of the shape. Pairs whose body
    /// or object has disappeared are skipped. Returns how many pairs were
    /// synced.
    pub fn sync(&self, scene: &mut Scene, physics: &PhysicsManager) -> usize {
        let mut synced = 0;

        for pair in &self.pairs {
            let Some(pose) = physics.body_pose(pair.body) else {
                trace!("Body {:?} is gone, skipping sync", pair.body);
                continue;
            };
            let Some(object) = scene.get_mut(pair.object) else {
                trace!("Object {:?} is gone, skipping sync", pair.object);
                continue;
            };

            object.transform.set_isometry(pose);
            synced += 1;
        }

        synced
    }
}

impl<'a> IntoIterator for &'a SyncList {
    type Item = &'a TrackedPair;
    type IntoIter = std::slice::Iter<'a, TrackedPair>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.iter()
    }
}
