use nalgebra::Vector3;
use rapier3d::prelude::SharedShape;
use tumble::config::PhysicsConfig;
use tumble::physics::{EARTH_GRAVITY, PhysicsManager};

#[test]
fn defaults_match_playground() {
    let physics = PhysicsManager::default();
    assert_eq!(physics.gravity, Vector3::new(0.0, -EARTH_GRAVITY, 0.0));
    assert_eq!(physics.fixed_timestep(), 1.0 / 60.0);
    assert_eq!(physics.max_sub_steps(), 3);
    assert_eq!(physics.default_material.friction, 0.1);
    assert_eq!(physics.default_material.restitution, 0.7);
}

#[test]
fn step_never_exceeds_sub_step_limit() {
    let mut physics = PhysicsManager::default();
    physics.add_floor();

    assert_eq!(physics.step(1.0), 3);
    assert_eq!(physics.steps(), 3);
    assert!(physics.interpolation_alpha() < 1.0);

    assert!(physics.step(10.0) <= 3);
    assert!(physics.step(0.25) <= 3);
    assert!(physics.steps() <= 9);
}

#[test]
fn short_frames_accumulate() {
    let mut physics = PhysicsManager::default();
    let half = physics.fixed_timestep() / 2.0;

    assert_eq!(physics.step(half), 0);
    assert_eq!(physics.step(half), 1);
    assert_eq!(physics.step(0.0), 0);
    assert_eq!(physics.steps(), 1);
}

#[test]
fn invalid_deltas_are_ignored() {
    let mut physics = PhysicsManager::default();
    assert_eq!(physics.step(-1.0), 0);
    assert_eq!(physics.step(f32::NAN), 0);
    assert_eq!(physics.step(f32::INFINITY), 0);
    assert_eq!(physics.steps(), 0);
    assert_eq!(physics.interpolation_alpha(), 0.0);
}

#[test]
fn custom_sub_step_limit() {
    let config = PhysicsConfig {
        max_sub_steps: 5,
        ..PhysicsConfig::default()
    };
    let mut physics = PhysicsManager::new(&config);
    assert_eq!(physics.step(1.0), 5);
}

#[test]
fn impact_strength_is_approach_speed() {
    let mut physics = PhysicsManager::default();
    physics.add_floor();

    let drop = 2.0;
    let body = physics.add_dynamic_body(SharedShape::ball(0.5), Vector3::new(0.0, 0.5 + drop, 0.0), 1.0);
    physics.set_collision_listener(body, true);

    let mut impacts = Vec::new();
    for _ in 0..120 {
        physics.fixed_step();
        impacts.extend(physics.drain_impacts());
        if !impacts.is_empty() {
            break;
        }
    }

    assert_eq!(impacts.len(), 1);
    let impact = impacts[0];
    assert_eq!(impact.body, body);
    assert!(impact.other.is_some());

    let expected = (2.0 * EARTH_GRAVITY * drop).sqrt();
    assert!(
        (impact.strength - expected).abs() < 0.5,
        "strength {} expected about {expected}",
        impact.strength
    );
}

#[test]
fn bodies_without_listener_report_nothing() {
    let mut physics = PhysicsManager::default();
    physics.add_floor();
    let body = physics.add_dynamic_body(SharedShape::ball(0.5), Vector3::new(0.0, 2.0, 0.0), 1.0);
    assert!(!physics.has_collision_listener(body));

    for _ in 0..120 {
        physics.fixed_step();
    }
    assert!(physics.drain_impacts().is_empty());
}

#[test]
fn detached_listener_stops_reports() {
    let mut physics = PhysicsManager::default();
    physics.add_floor();
    let body = physics.add_dynamic_body(SharedShape::cuboid(0.25, 0.25, 0.25), Vector3::new(0.0, 2.0, 0.0), 1.0);

    physics.set_collision_listener(body, true);
    assert!(physics.has_collision_listener(body));
    physics.set_collision_listener(body, false);
    assert!(!physics.has_collision_listener(body));

    for _ in 0..120 {
        physics.fixed_step();
    }
    assert!(physics.drain_impacts().is_empty());
}

#[test]
fn remove_body_twice() {
    let mut physics = PhysicsManager::default();
    let body = physics.add_dynamic_body(SharedShape::ball(0.1), Vector3::zeros(), 1.0);
    assert_eq!(physics.body_count(), 1);
    assert!(physics.remove_body(body));
    assert!(!physics.remove_body(body));
    assert_eq!(physics.body_count(), 0);
    assert!(physics.body_pose(body).is_none());
}
