//! The [`World`] ties the playground together. It owns the scene that gets
//! drawn, the physics simulation that moves it, the list of pairs connecting
//! the two and everything that reacts to them: camera, input, hit sound.
//!
//! One call to [`World::frame`] is one frame of the playground: debug input,
//! physics, collision sounds, pose sync and camera.

use crate::audio::HitSound;
use crate::camera::OrbitCamera;
use crate::config::PlaygroundConfig;
use crate::core::{FrameClock, Scene};
use crate::input::{DebugAction, DebugPanel, InputManager};
use crate::physics::PhysicsManager;
use crate::spawner::{ShapeKind, SpawnArea, Spawner};
use crate::sync::{SyncList, TrackedPair};
use crate::utils::FrameCounter;
use log::{debug, info};
use nalgebra::Vector3;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rapier3d::prelude::RigidBodyHandle;

const FPS_LOG_INTERVAL: u64 = 600;

pub struct World {
    pub scene: Scene,
    pub physics: PhysicsManager,
    pub tracked: SyncList,
    pub camera: OrbitCamera,
    pub input: InputManager,
    pub debug_panel: DebugPanel,
    pub hit_sound: HitSound,
    pub spawner: Spawner,
    pub spawn_area: SpawnArea,
    pub floor_body: RigidBodyHandle,
    pub frame_counter: FrameCounter,

    clock: FrameClock,
    rng: StdRng,
}

impl Default for World {
    fn default() -> Self {
        World::new(&PlaygroundConfig::default())
    }
}

impl World {
    /// Creates the world with the floor in place and nothing else.
    pub fn new(config: &PlaygroundConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Like [`World::new`], but random spawns and hit volumes are reproducible.
    pub fn with_seed(config: &PlaygroundConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: &PlaygroundConfig, rng: StdRng) -> Self {
        let mut scene = Scene::new();
        let mut physics = PhysicsManager::new(&config.physics);

        scene.add_floor(config.physics.floor_size);
        let floor_body = physics.add_floor();

        World {
            scene,
            physics,
            tracked: SyncList::new(),
            camera: OrbitCamera::new(&config.camera),
            input: InputManager::default(),
            debug_panel: DebugPanel::default(),
            hit_sound: HitSound::new(&config.sound),
            spawner: Spawner::default(),
            spawn_area: SpawnArea::from(&config.spawn),
            floor_body,
            frame_counter: FrameCounter::default(),
            clock: FrameClock::new(),
            rng,
        }
    }

    pub fn spawn(&mut self, shape: ShapeKind, position: Vector3<f32>) -> TrackedPair {
        self.spawner.spawn(
            &mut self.scene,
            &mut self.physics,
            &mut self.tracked,
            shape,
            position,
        )
    }

    pub fn spawn_sphere(&mut self, radius: f32, position: Vector3<f32>) -> TrackedPair {
        self.spawn(ShapeKind::Sphere { radius }, position)
    }

    pub fn spawn_cube(&mut self, edge: f32, position: Vector3<f32>) -> TrackedPair {
        self.spawn(ShapeKind::Cube { edge }, position)
    }

    pub fn spawn_random_sphere(&mut self) -> TrackedPair {
        let (shape, position) = self.spawn_area.random_sphere(&mut self.rng);
        self.spawn(shape, position)
    }

    pub fn spawn_random_cube(&mut self) -> TrackedPair {
        let (shape, position) = self.spawn_area.random_cube(&mut self.rng);
        self.spawn(shape, position)
    }

    /// The unit cube that is dropped from (0, 5, 0) when the playground starts.
    pub fn spawn_initial_cube(&mut self) -> TrackedPair {
        self.spawn_cube(1.0, Vector3::new(0.0, 5.0, 0.0))
    }

    /// Removes every spawned shape from both the scene and the simulation.
    ///
    /// The floor stays. Returns how many shapes were removed.
    pub fn reset(&mut self) -> usize {
        let mut removed = 0;

        for pair in self.tracked.drain() {
            self.physics.set_collision_listener(pair.body, false);
            self.physics.remove_body(pair.body);
            self.scene.remove(pair.object);
            removed += 1;
        }

        info!("Reset playground, removed {removed} shapes");
        removed
    }

    pub fn trigger(&mut self, action: DebugAction) {
        debug!("Debug action: {}", action.label());
        match action {
            DebugAction::SpawnSphere => {
                self.spawn_random_sphere();
            }
            DebugAction::SpawnCube => {
                self.spawn_random_cube();
            }
            DebugAction::Reset => {
                self.reset();
            }
        }
    }

    /// Runs one frame with the real time that passed since the last one.
    pub fn frame(&mut self) -> u32 {
        for action in self.debug_panel.triggered(&self.input) {
            self.trigger(action);
        }

        let time = self.clock.tick();
        self.advance(time.delta.as_secs_f32())
    }

    /// Runs one frame as if `delta` seconds had passed. Returns the number of
    /// physics steps taken.
    pub fn advance(&mut self, delta: f32) -> u32 {
        let steps = self.physics.step(delta);

        for impact in self.physics.drain_impacts() {
            self.hit_sound.on_impact(&impact, &mut self.rng);
        }

        self.tracked.sync(&mut self.scene, &self.physics);

        self.camera.apply_input(&self.input);
        self.camera.update();

        self.frame_counter.new_frame(delta);
        if self.frame_counter.total_frames() % FPS_LOG_INTERVAL == 0 {
            debug!(
                "{} fps, {} shapes",
                self.frame_counter.fps(),
                self.tracked.len()
            );
        }

        steps
    }

    /// Clears per-frame input. Call after the frame was rendered.
    pub fn next_frame(&mut self) {
        self.input.next_frame();
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.camera.resize(width, height);
    }
}
