use crate::config::PhysicsConfig;
use crate::physics::{Impact, ImpactCollector};
use log::{debug, warn};
use nalgebra::{Isometry3, Vector3};
use rapier3d::prelude::*;

/// Friction and restitution shared by every body in the playground.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ContactMaterial {
    pub friction: f32,
    pub restitution: f32,
}

impl Default for ContactMaterial {
    fn default() -> Self {
        ContactMaterial {
            friction: 0.1,
            restitution: 0.7,
        }
    }
}

pub struct PhysicsManager {
    pub gravity: Vector3<f32>,
    pub rigid_body_set: RigidBodySet,
    pub collider_set: ColliderSet,
    pub integration_parameters: IntegrationParameters,
    pub physics_pipeline: PhysicsPipeline,
    pub island_manager: IslandManager,
    pub broad_phase: DefaultBroadPhase,
    pub narrow_phase: NarrowPhase,
    pub impulse_joint_set: ImpulseJointSet,
    pub multibody_joint_set: MultibodyJointSet,
    pub ccd_solver: CCDSolver,
    pub query_pipeline: QueryPipeline,
    pub physics_hooks: (),
    pub event_handler: ImpactCollector,
    pub default_material: ContactMaterial,
    pub allow_sleep: bool,
    fixed_timestep: f32,
    max_sub_steps: u32,
    accumulator: f32,
    steps: u64,
}

pub const EARTH_GRAVITY: f32 = 9.82;

impl Default for PhysicsManager {
    fn default() -> Self {
        PhysicsManager::new(&PhysicsConfig::default())
    }
}

impl PhysicsManager {
    pub fn new(config: &PhysicsConfig) -> Self {
        let mut integration_parameters = IntegrationParameters::default();
        integration_parameters.dt = config.fixed_timestep;

        PhysicsManager {
            gravity: config.gravity(),
            rigid_body_set: RigidBodySet::default(),
            collider_set: ColliderSet::default(),
            integration_parameters,
            physics_pipeline: PhysicsPipeline::default(),
            island_manager: IslandManager::default(),
            broad_phase: DefaultBroadPhase::default(),
            narrow_phase: NarrowPhase::default(),
            impulse_joint_set: ImpulseJointSet::default(),
            multibody_joint_set: MultibodyJointSet::default(),
            ccd_solver: CCDSolver::default(),
            query_pipeline: QueryPipeline::default(),
            physics_hooks: (),
            event_handler: ImpactCollector::default(),
            default_material: ContactMaterial {
                friction: config.friction,
                restitution: config.restitution,
            },
            allow_sleep: config.allow_sleep,
            fixed_timestep: config.fixed_timestep,
            max_sub_steps: config.max_sub_steps,
            accumulator: 0.0,
            steps: 0,
        }
    }

    /// Advances the simulation by `delta` seconds of real time in fixed steps.
    ///
    /// At most `max_sub_steps` fixed steps run per call. Whatever time is left
    /// over after that is dropped, so a long stall does not snowball into ever
    /// longer frames. Returns how many fixed steps were taken.
    pub fn step(&mut self, delta: f32) -> u32 {
        if !delta.is_finite() || delta < 0.0 {
            warn!("Ignoring invalid physics delta time {delta}");
            return 0;
        }

        self.accumulator += delta;

        let mut sub_steps = 0;
        while self.accumulator >= self.fixed_timestep && sub_steps < self.max_sub_steps {
            self.fixed_step();
            self.accumulator -= self.fixed_timestep;
            sub_steps += 1;
        }

        if sub_steps == self.max_sub_steps && self.accumulator >= self.fixed_timestep {
            debug!(
                "Physics fell behind by {:.3}s, dropping the backlog",
                self.accumulator
            );
        }
        self.accumulator %= self.fixed_timestep;

        sub_steps
    }

    /// Runs exactly one simulation step of `fixed_timestep` seconds.
    pub fn fixed_step(&mut self) {
        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &self.physics_hooks,
            &self.event_handler,
        );
        self.steps += 1;
    }

    /// Takes every impact recorded since the last call.
    pub fn drain_impacts(&mut self) -> Vec<Impact> {
        self.event_handler.drain()
    }

    /// Total number of fixed steps simulated so far.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn fixed_timestep(&self) -> f32 {
        self.fixed_timestep
    }

    pub fn max_sub_steps(&self) -> u32 {
        self.max_sub_steps
    }

    /// Time carried over to the next call of [`PhysicsManager::step`], as a
    /// fraction of one fixed step.
    pub fn interpolation_alpha(&self) -> f32 {
        self.accumulator / self.fixed_timestep
    }

    /// Adds a static infinite plane through the origin with +Y as its normal.
    pub fn add_floor(&mut self) -> RigidBodyHandle {
        let body = RigidBodyBuilder::fixed().build();
        let collider = ColliderBuilder::halfspace(Vector::y_axis())
            .friction(self.default_material.friction)
            .restitution(self.default_material.restitution)
            .build();

        self.add_body(body, collider)
    }

    /// Adds a dynamic body of mass `mass` with a single collider of `shape`,
    /// using the default contact material.
    pub fn add_dynamic_body(
        &mut self,
        shape: SharedShape,
        position: Vector3<f32>,
        mass: f32,
    ) -> RigidBodyHandle {
        let body = RigidBodyBuilder::dynamic()
            .translation(position)
            .can_sleep(self.allow_sleep)
            .build();
        let collider = ColliderBuilder::new(shape)
            .mass(mass)
            .friction(self.default_material.friction)
            .restitution(self.default_material.restitution)
            .build();

        self.add_body(body, collider)
    }

    pub fn add_body(&mut self, body: RigidBody, collider: Collider) -> RigidBodyHandle {
        let handle = self.rigid_body_set.insert(body);
        self.collider_set
            .insert_with_parent(collider, handle, &mut self.rigid_body_set);
        handle
    }

    /// Removes a body together with its colliders. Returns `false` if the body
    /// was already gone.
    pub fn remove_body(&mut self, handle: RigidBodyHandle) -> bool {
        self.rigid_body_set
            .remove(
                handle,
                &mut self.island_manager,
                &mut self.collider_set,
                &mut self.impulse_joint_set,
                &mut self.multibody_joint_set,
                true,
            )
            .is_some()
    }

    /// Attaches or detaches the collision listener of every collider on the body.
    pub fn set_collision_listener(&mut self, handle: RigidBodyHandle, listening: bool) {
        let Some(body) = self.rigid_body_set.get(handle) else {
            return;
        };

        let events = if listening {
            ActiveEvents::COLLISION_EVENTS
        } else {
            ActiveEvents::empty()
        };

        for collider in body.colliders() {
            if let Some(collider) = self.collider_set.get_mut(*collider) {
                collider.set_active_events(events);
            }
        }
    }

    pub fn has_collision_listener(&self, handle: RigidBodyHandle) -> bool {
        self.rigid_body_set.get(handle).is_some_and(|body| {
            body.colliders().iter().any(|c| {
                self.collider_set
                    .get(*c)
                    .is_some_and(|c| c.active_events().contains(ActiveEvents::COLLISION_EVENTS))
            })
        })
    }

    pub fn contains_body(&self, handle: RigidBodyHandle) -> bool {
        self.rigid_body_set.contains(handle)
    }

    pub fn body_count(&self) -> usize {
        self.rigid_body_set.len()
    }

    /// World-space position and orientation of a body.
    pub fn body_pose(&self, handle: RigidBodyHandle) -> Option<&Isometry3<f32>> {
        self.rigid_body_set.get(handle).map(|rb| rb.position())
    }
}
