//! Playground configuration.
//!
//! Every value has a default matching the stock playground, so a config file
//! only needs to name what it changes. Files are TOML.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use snafu::{ResultExt, Snafu, ensure};
use std::path::{Path, PathBuf};

#[derive(Debug, Snafu)]
#[snafu(context(suffix(Err)))]
pub enum ConfigError {
    #[snafu(display("Unable to read config file {}: {source}", path.display()))]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[snafu(display("Invalid config file {}: {source}", path.display()))]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[snafu(display("Invalid config: {source}"))]
    ParseStr { source: toml::de::Error },

    #[snafu(display("Invalid value for {field}: {reason}"))]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PlaygroundConfig {
    pub window: WindowConfig,
    pub physics: PhysicsConfig,
    pub sound: SoundConfig,
    pub spawn: SpawnConfig,
    pub camera: CameraConfig,
}

impl PlaygroundConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).context(ReadErr { path })?;
        let config: Self = toml::from_str(&contents).context(ParseErr { path })?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents).context(ParseStrErr)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let physics = &self.physics;
        ensure!(
            physics.fixed_timestep.is_finite() && physics.fixed_timestep > 0.0,
            InvalidErr {
                field: "physics.fixed_timestep",
                reason: "must be a positive number of seconds",
            }
        );
        ensure!(
            physics.max_sub_steps >= 1,
            InvalidErr {
                field: "physics.max_sub_steps",
                reason: "must be at least 1",
            }
        );
        ensure!(
            self.sound.volume_divisor.is_finite() && self.sound.volume_divisor > 0.0,
            InvalidErr {
                field: "sound.volume_divisor",
                reason: "must be positive",
            }
        );
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Upper bound for the surface pixel ratio on high-DPI displays
    pub max_pixel_ratio: f64,
}

impl Default for WindowConfig {
    fn default() -> Self {
        WindowConfig {
            title: "Tumble".to_string(),
            width: 1280,
            height: 720,
            max_pixel_ratio: 2.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    pub gravity: [f32; 3],
    /// Length of one simulation step in seconds
    pub fixed_timestep: f32,
    /// How many fixed steps a single frame may catch up on
    pub max_sub_steps: u32,
    pub friction: f32,
    pub restitution: f32,
    pub allow_sleep: bool,
    pub floor_size: f32,
}

impl PhysicsConfig {
    pub fn gravity(&self) -> Vector3<f32> {
        Vector3::from(self.gravity)
    }
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        PhysicsConfig {
            gravity: [0.0, -9.82, 0.0],
            fixed_timestep: 1.0 / 60.0,
            max_sub_steps: 3,
            friction: 0.1,
            restitution: 0.7,
            allow_sleep: true,
            floor_size: 10.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SoundConfig {
    pub enabled: bool,
    pub hit_path: PathBuf,
    /// Impacts at or below this normal velocity stay silent
    pub threshold: f32,
    /// Impact velocity that maps to full volume
    pub volume_divisor: f32,
}

impl Default for SoundConfig {
    fn default() -> Self {
        SoundConfig {
            enabled: true,
            hit_path: PathBuf::from("assets/sounds/hit.mp3"),
            threshold: 1.5,
            volume_divisor: 10.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    /// Upper bound (exclusive) for random radii and edge lengths
    pub max_size: f32,
    /// Width of the square area random spheres are dropped into
    pub sphere_spread: f32,
    /// Width of the square area random cubes are dropped into
    pub cube_spread: f32,
    pub height: f32,
    /// Drop one unit cube from (0, 5, 0) at startup
    pub initial_cube: bool,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        SpawnConfig {
            max_size: 0.5,
            sphere_spread: 3.0,
            cube_spread: 5.0,
            height: 3.0,
            initial_cube: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    pub position: [f32; 3],
    pub target: [f32; 3],
    pub damping_factor: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        CameraConfig {
            fov: 75.0,
            near: 0.1,
            far: 100.0,
            position: [-3.0, 3.0, 3.0],
            target: [0.0, 0.0, 0.0],
            damping_factor: 0.05,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
        }
    }
}
