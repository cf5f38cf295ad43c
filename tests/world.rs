use nalgebra::Vector3;
use std::cell::RefCell;
use std::rc::Rc;
use tumble::World;
use tumble::audio::HitPlayer;
use tumble::config::PlaygroundConfig;
use tumble::core::MeshKind;
use tumble::input::DebugAction;
use tumble::spawner::ShapeKind;
use winit::event::ElementState;
use winit::keyboard::KeyCode;

const DT: f32 = 1.0 / 60.0;

#[derive(Clone, Default)]
struct RecordingPlayer {
    volumes: Rc<RefCell<Vec<f32>>>,
}

impl HitPlayer for RecordingPlayer {
    fn restart(&mut self, volume: f32) {
        self.volumes.borrow_mut().push(volume);
    }
}

fn world() -> World {
    World::with_seed(&PlaygroundConfig::default(), 42)
}

fn run(world: &mut World, frames: usize) {
    for _ in 0..frames {
        world.advance(DT);
        world.next_frame();
    }
}

fn assert_synced(world: &World) {
    for pair in &world.tracked {
        let pose = world.physics.body_pose(pair.body).unwrap();
        let object = world.scene.get(pair.object).unwrap();
        assert_eq!(*object.transform.position(), pose.translation.vector);
        assert_eq!(*object.transform.rotation(), pose.rotation);
    }
}

#[test]
fn starts_with_floor_only() {
    let world = world();
    assert!(world.tracked.is_empty());
    assert_eq!(world.scene.len(), 1);
    assert_eq!(world.physics.body_count(), 1);
    assert!(world.physics.contains_body(world.floor_body));
    assert!(world.scene.find_by_name("Floor").is_some());
}

#[test]
fn spawn_creates_tracked_pair() {
    let mut world = world();
    let pair = world.spawn_sphere(0.3, Vector3::new(0.5, 3.0, -0.5));

    assert_eq!(world.tracked.len(), 1);
    assert_eq!(pair.shape, ShapeKind::Sphere { radius: 0.3 });
    assert!(world.physics.has_collision_listener(pair.body));
    assert!(!world.physics.has_collision_listener(world.floor_body));

    let object = world.scene.get(pair.object).unwrap();
    assert_eq!(object.mesh, MeshKind::Sphere);
    assert!(object.cast_shadow);
    assert_eq!(*object.transform.scale(), Vector3::new(0.3, 0.3, 0.3));
    assert_eq!(*object.transform.position(), Vector3::new(0.5, 3.0, -0.5));

    let cube = world.spawn_initial_cube();
    assert_eq!(cube.shape, ShapeKind::Cube { edge: 1.0 });
    assert_eq!(
        world.physics.body_pose(cube.body).unwrap().translation.vector,
        Vector3::new(0.0, 5.0, 0.0)
    );
}

#[test]
fn visuals_follow_bodies() {
    let mut world = world();
    world.spawn_initial_cube();
    for _ in 0..5 {
        world.spawn_random_sphere();
        world.spawn_random_cube();
    }

    let start = *world
        .scene
        .get(world.tracked.iter().next().unwrap().object)
        .unwrap()
        .transform
        .position();

    for frames in [1, 10, 60, 120] {
        run(&mut world, frames);
        assert_synced(&world);
    }

    let first = world.tracked.iter().next().unwrap();
    let end = world.scene.get(first.object).unwrap().transform.position();
    assert!(end.y < start.y, "cube should have fallen");
}

#[test]
fn shapes_come_to_rest_on_floor() {
    let mut world = world();
    let pair = world.spawn_sphere(0.25, Vector3::new(0.0, 3.0, 0.0));
    run(&mut world, 600);

    let y = world.physics.body_pose(pair.body).unwrap().translation.y;
    assert!((y - 0.25).abs() < 0.05, "sphere rests at {y}");
}

#[test]
fn reset_removes_everything_but_floor() {
    let mut world = world();
    let pairs = [
        world.spawn_random_sphere(),
        world.spawn_random_cube(),
        world.spawn_initial_cube(),
    ];
    run(&mut world, 30);

    assert_eq!(world.reset(), 3);

    assert!(world.tracked.is_empty());
    assert_eq!(world.scene.len(), 1);
    assert_eq!(world.physics.body_count(), 1);
    for pair in pairs {
        assert!(!world.physics.contains_body(pair.body));
        assert!(!world.scene.contains(pair.object));
    }

    run(&mut world, 10);
    assert_eq!(world.reset(), 0);

    let pair = world.spawn_random_sphere();
    run(&mut world, 10);
    assert_eq!(world.tracked.len(), 1);
    assert!(world.physics.contains_body(pair.body));
    assert_synced(&world);
}

#[test]
fn hard_landing_plays_hit_sound() {
    let mut world = world();
    let player = RecordingPlayer::default();
    world.hit_sound.set_player(Box::new(player.clone()));

    world.spawn_sphere(0.25, Vector3::new(0.0, 3.0, 0.0));
    run(&mut world, 180);

    let volumes = player.volumes.borrow();
    assert!(!volumes.is_empty());
    assert!(volumes.iter().all(|v| (0.0..=1.0).contains(v)));
}

#[test]
fn soft_landing_stays_silent() {
    let mut world = world();
    let player = RecordingPlayer::default();
    world.hit_sound.set_player(Box::new(player.clone()));

    world.spawn_sphere(0.25, Vector3::new(0.0, 0.3, 0.0));
    run(&mut world, 180);

    assert!(player.volumes.borrow().is_empty());
}

#[test]
fn removed_shapes_stay_silent() {
    let mut world = world();
    let player = RecordingPlayer::default();
    world.hit_sound.set_player(Box::new(player.clone()));

    world.spawn_sphere(0.25, Vector3::new(0.0, 3.0, 0.0));
    run(&mut world, 20);
    world.reset();
    run(&mut world, 120);

    assert!(player.volumes.borrow().is_empty());
}

#[test]
fn debug_actions() {
    let mut world = world();

    world.trigger(DebugAction::SpawnSphere);
    world.trigger(DebugAction::SpawnCube);
    world.trigger(DebugAction::SpawnCube);
    assert_eq!(world.tracked.len(), 3);
    assert_eq!(
        world
            .tracked
            .iter()
            .filter(|p| matches!(p.shape, ShapeKind::Cube { .. }))
            .count(),
        2
    );

    world.trigger(DebugAction::Reset);
    assert!(world.tracked.is_empty());
}

#[test]
fn debug_keys_trigger_once_per_press() {
    let mut world = world();

    world.input.process_key(KeyCode::Digit1, ElementState::Pressed);
    world.frame();
    world.next_frame();
    assert_eq!(world.tracked.len(), 1);

    // held down, no new press
    world.frame();
    world.next_frame();
    assert_eq!(world.tracked.len(), 1);

    world.input.process_key(KeyCode::Digit1, ElementState::Released);
    world.input.process_key(KeyCode::KeyR, ElementState::Pressed);
    world.frame();
    world.next_frame();
    assert!(world.tracked.is_empty());
}

#[test]
fn seeded_worlds_spawn_alike() {
    let mut a = world();
    let mut b = world();
    for _ in 0..3 {
        assert_eq!(a.spawn_random_sphere().shape, b.spawn_random_sphere().shape);
        assert_eq!(a.spawn_random_cube().shape, b.spawn_random_cube().shape);
    }
}
