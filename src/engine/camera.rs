//! Perspective camera orbiting a target point.
//!
//! Dragging with the left mouse button swings the camera around the target,
//! the mouse wheel moves it closer or further away. With damping enabled the
//! camera keeps gliding for a while after the input stops and eases out.

use crate::config::CameraConfig;
use crate::core::Transform;
use crate::ensure_aligned;
use crate::input::InputManager;
use nalgebra::{Isometry3, Matrix4, Perspective3, Point3, UnitQuaternion, Vector2, Vector3};
use std::f32::consts::PI;
use winit::event::MouseButton;

const MIN_POLAR: f32 = 1e-6;
/// Eye movement below this is not reported as motion.
const MOVE_EPSILON: f32 = 1e-5;

/// Maps OpenGL clip space depth (-1..1) to the 0..1 range wgpu expects.
#[rustfmt::skip]
pub const OPENGL_TO_WGPU: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.5,
    0.0, 0.0, 0.0, 1.0,
);

/// Radius, polar angle from +Y and azimuth around +Y (measured from +Z).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
struct Spherical {
    radius: f32,
    phi: f32,
    theta: f32,
}

impl Spherical {
    fn from_offset(offset: &Vector3<f32>) -> Self {
        let radius = offset.norm();
        if radius == 0.0 {
            return Spherical::default();
        }

        Spherical {
            radius,
            phi: (offset.y / radius).clamp(-1.0, 1.0).acos(),
            theta: offset.x.atan2(offset.z),
        }
    }

    fn to_offset(self) -> Vector3<f32> {
        let sin_phi_radius = self.phi.sin() * self.radius;
        Vector3::new(
            sin_phi_radius * self.theta.sin(),
            self.phi.cos() * self.radius,
            sin_phi_radius * self.theta.cos(),
        )
    }
}

pub struct OrbitCamera {
    pub transform: Transform,
    pub target: Vector3<f32>,
    pub projection: Perspective3<f32>,
    pub enable_damping: bool,
    pub damping_factor: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    spherical_delta: Spherical,
    zoom_scale: f32,
    viewport: Vector2<f32>,
    fovy: f32,
    near: f32,
    far: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        OrbitCamera::new(&CameraConfig::default())
    }
}

impl OrbitCamera {
    pub fn new(config: &CameraConfig) -> Self {
        let fovy = config.fov.to_radians();
        let mut camera = OrbitCamera {
            transform: Transform::new(),
            target: Vector3::from(config.target),
            projection: Perspective3::new(800.0 / 600.0, fovy, config.near, config.far),
            enable_damping: true,
            damping_factor: config.damping_factor,
            rotate_speed: config.rotate_speed,
            zoom_speed: config.zoom_speed,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
            spherical_delta: Spherical::default(),
            zoom_scale: 1.0,
            viewport: Vector2::new(800.0, 600.0),
            fovy,
            near: config.near,
            far: config.far,
        };

        camera.transform.set_position_vec(Vector3::from(config.position));
        camera.look_at_target();
        camera
    }

    /// Updates the aspect ratio after the render surface changed size.
    pub fn resize(&mut self, width: f32, height: f32) {
        if width <= 0.0 || height <= 0.0 {
            return;
        }

        self.viewport = Vector2::new(width, height);
        self.projection = Perspective3::new(width / height, self.fovy, self.near, self.far);
    }

    pub fn aspect(&self) -> f32 {
        self.projection.aspect()
    }

    pub fn eye(&self) -> &Vector3<f32> {
        self.transform.position()
    }

    pub fn distance(&self) -> f32 {
        (self.eye() - self.target).norm()
    }

    /// Swings the camera around the vertical axis.
    pub fn rotate_left(&mut self, angle: f32) {
        self.spherical_delta.theta -= angle;
    }

    /// Swings the camera over the top of the target.
    pub fn rotate_up(&mut self, angle: f32) {
        self.spherical_delta.phi -= angle;
    }

    /// Moves towards the target for positive `steps`, away for negative.
    pub fn zoom(&mut self, steps: f32) {
        self.zoom_scale *= 0.95f32.powf(self.zoom_speed * steps);
    }

    /// Turns mouse drags and wheel movement of this frame into camera motion.
    pub fn apply_input(&mut self, input: &InputManager) {
        if input.is_button_pressed(MouseButton::Left) {
            let delta = input.mouse_delta();
            let height = self.viewport.y.max(1.0);
            self.rotate_left(2.0 * PI * delta.x / height * self.rotate_speed);
            self.rotate_up(2.0 * PI * delta.y / height * self.rotate_speed);
        }

        let wheel = input.mouse_wheel_delta();
        if wheel != 0.0 {
            self.zoom(wheel);
        }
    }

    /// Applies pending rotation and zoom. With damping, only a fraction of the
    /// pending rotation is applied and the rest decays over the next updates.
    ///
    /// Returns `true` if the camera moved.
    pub fn update(&mut self) -> bool {
        let old_eye = *self.eye();
        let offset = old_eye - self.target;
        let mut spherical = Spherical::from_offset(&offset);

        if self.enable_damping {
            spherical.theta += self.spherical_delta.theta * self.damping_factor;
            spherical.phi += self.spherical_delta.phi * self.damping_factor;
        } else {
            spherical.theta += self.spherical_delta.theta;
            spherical.phi += self.spherical_delta.phi;
        }

        spherical.phi = spherical.phi.clamp(MIN_POLAR, PI - MIN_POLAR);
        spherical.radius = (spherical.radius * self.zoom_scale)
            .clamp(self.min_distance, self.max_distance);

        let eye = self.target + spherical.to_offset();
        self.transform.set_position_vec(eye);
        self.look_at_target();

        if self.enable_damping {
            self.spherical_delta.theta *= 1.0 - self.damping_factor;
            self.spherical_delta.phi *= 1.0 - self.damping_factor;
        } else {
            self.spherical_delta = Spherical::default();
        }
        self.zoom_scale = 1.0;

        (eye - old_eye).norm() > MOVE_EPSILON
    }

    fn look_at_target(&mut self) {
        let back = self.eye() - self.target;
        if back.norm_squared() > 0.0 {
            self.transform
                .set_rotation(UnitQuaternion::face_towards(&back, &Vector3::y()));
        }
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        Isometry3::look_at_rh(
            &Point3::from(*self.eye()),
            &Point3::from(self.target),
            &Vector3::y(),
        )
        .to_homogeneous()
    }

    pub fn projection_matrix(&self) -> Matrix4<f32> {
        OPENGL_TO_WGPU * self.projection.to_homogeneous()
    }
}

#[repr(C)]
#[derive(Default, Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pos: Vector3<f32>,
    _padding: u32,
    view_mat: Matrix4<f32>,
    projection_mat: Matrix4<f32>,
    pub proj_view_mat: Matrix4<f32>,
}

ensure_aligned!(CameraUniform { pos, view_mat, projection_mat, proj_view_mat }, align <= 16 * 13 => size);

impl CameraUniform {
    pub fn update(&mut self, camera: &OrbitCamera) {
        self.pos = *camera.eye();
        self.view_mat = camera.view_matrix();
        self.projection_mat = camera.projection_matrix();
        self.proj_view_mat = self.projection_mat * self.view_mat;
    }
}
