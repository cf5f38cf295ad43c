use std::path::PathBuf;
use tumble::config::{ConfigError, PlaygroundConfig};

#[test]
fn empty_file_gives_defaults() {
    let config = PlaygroundConfig::from_toml_str("").unwrap();
    assert_eq!(config, PlaygroundConfig::default());

    assert_eq!(config.physics.gravity, [0.0, -9.82, 0.0]);
    assert_eq!(config.physics.max_sub_steps, 3);
    assert_eq!(config.sound.threshold, 1.5);
    assert_eq!(config.sound.volume_divisor, 10.0);
    assert_eq!(config.spawn.max_size, 0.5);
    assert_eq!(config.camera.fov, 75.0);
    assert_eq!(config.camera.position, [-3.0, 3.0, 3.0]);
    assert_eq!(config.window.max_pixel_ratio, 2.0);
}

#[test]
fn partial_sections_keep_other_defaults() {
    let config = PlaygroundConfig::from_toml_str(
        r#"
        [physics]
        gravity = [0.0, -1.62, 0.0]
        max_sub_steps = 8

        [sound]
        enabled = false
        hit_path = "sounds/clack.ogg"
        "#,
    )
    .unwrap();

    assert_eq!(config.physics.gravity, [0.0, -1.62, 0.0]);
    assert_eq!(config.physics.max_sub_steps, 8);
    assert_eq!(config.physics.restitution, 0.7);
    assert!(!config.sound.enabled);
    assert_eq!(config.sound.hit_path, PathBuf::from("sounds/clack.ogg"));
    assert_eq!(config.sound.threshold, 1.5);
    assert_eq!(config.window, Default::default());
}

#[test]
fn invalid_values_are_rejected() {
    let err = PlaygroundConfig::from_toml_str("[physics]\nmax_sub_steps = \"many\"").unwrap_err();
    assert!(matches!(err, ConfigError::ParseStr { .. }));
}

fn rejected_field(toml: &str) -> &'static str {
    match PlaygroundConfig::from_toml_str(toml) {
        Err(ConfigError::Invalid { field, .. }) => field,
        other => panic!("expected invalid value error, got {other:?}"),
    }
}

#[test]
fn zero_timestep_is_rejected() {
    assert_eq!(rejected_field("[physics]\nfixed_timestep = 0.0"), "physics.fixed_timestep");
}

#[test]
fn negative_timestep_is_rejected() {
    assert_eq!(rejected_field("[physics]\nfixed_timestep = -0.01"), "physics.fixed_timestep");
}

#[test]
fn infinite_timestep_is_rejected() {
    assert_eq!(rejected_field("[physics]\nfixed_timestep = inf"), "physics.fixed_timestep");
}

#[test]
fn zero_sub_steps_are_rejected() {
    assert_eq!(rejected_field("[physics]\nmax_sub_steps = 0"), "physics.max_sub_steps");
}

#[test]
fn non_positive_volume_divisor_is_rejected() {
    assert_eq!(rejected_field("[sound]\nvolume_divisor = 0.0"), "sound.volume_divisor");
    assert_eq!(rejected_field("[sound]\nvolume_divisor = -10.0"), "sound.volume_divisor");
}

#[test]
fn invalid_file_is_rejected_on_load() {
    let path = std::env::temp_dir().join(format!("tumble-invalid-{}.toml", std::process::id()));
    std::fs::write(&path, "[physics]\nfixed_timestep = 0.0\n").unwrap();
    let result = PlaygroundConfig::load(&path);
    std::fs::remove_file(&path).unwrap();

    let err = result.unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { field: "physics.fixed_timestep", .. }));
    assert!(err.to_string().contains("physics.fixed_timestep"));
}

#[test]
fn missing_file_reports_path() {
    let err = PlaygroundConfig::load("does/not/exist.toml").unwrap_err();
    match &err {
        ConfigError::Read { path, .. } => assert_eq!(path, &PathBuf::from("does/not/exist.toml")),
        other => panic!("unexpected error {other}"),
    }
    assert!(err.to_string().contains("does/not/exist.toml"));
}

#[test]
fn round_trips_through_toml() {
    let mut config = PlaygroundConfig::default();
    config.spawn.initial_cube = false;
    config.camera.damping_factor = 0.2;

    let text = toml::to_string(&config).unwrap();
    assert_eq!(PlaygroundConfig::from_toml_str(&text).unwrap(), config);
}
