use nalgebra::{Affine3, Isometry3, Scale3, Translation3, UnitQuaternion, Vector3};

/// Stores the translation, rotation and scale of a [`SceneObject`](crate::core::SceneObject).
///
/// The transform keeps precomputed matrices for each component so that
/// retrieving the final model matrix every frame is cheap.
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    pos: Vector3<f32>,
    rot: UnitQuaternion<f32>,
    scale: Vector3<f32>,
    pos_mat: Translation3<f32>,
    scale_mat: Scale3<f32>,
    compound_mat: Affine3<f32>,
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}

impl Transform {
    /// Creates a new [`Transform`] at the origin with no rotation and a uniform
    /// scale of `1.0`.
    pub fn new() -> Self {
        Transform {
            pos: Vector3::zeros(),
            rot: UnitQuaternion::identity(),
            scale: Vector3::new(1.0, 1.0, 1.0),
            pos_mat: Translation3::identity(),
            scale_mat: Scale3::identity(),
            compound_mat: Affine3::identity(),
        }
    }

    /// Sets the position of the transform.
    #[inline(always)]
    pub fn set_position(&mut self, x: f32, y: f32, z: f32) {
        self.set_position_vec(Vector3::new(x, y, z))
    }

    /// Sets the position using a vector.
    pub fn set_position_vec(&mut self, pos: Vector3<f32>) {
        self.pos = pos;
        self.recalculate_pos_matrix();
    }

    /// Returns the position of the transform.
    pub fn position(&self) -> &Vector3<f32> {
        &self.pos
    }

    /// Adds the given offset to the position.
    pub fn translate(&mut self, other: Vector3<f32>) {
        self.pos += other;
        self.recalculate_pos_matrix();
    }

    pub fn set_rotation(&mut self, rotation: UnitQuaternion<f32>) {
        self.rot = rotation;
        self.recalculate_combined_matrix()
    }

    pub fn rotation(&self) -> &UnitQuaternion<f32> {
        &self.rot
    }

    /// Copies translation and rotation from a rigid pose, leaving scale untouched.
    pub fn set_isometry(&mut self, pose: &Isometry3<f32>) {
        self.pos = pose.translation.vector;
        self.rot = pose.rotation;
        self.recalculate_pos_matrix();
    }

    /// Sets the scale using three independent factors.
    pub fn set_nonuniform_scale(&mut self, scale: Vector3<f32>) {
        self.scale = scale;
        self.recalculate_scale_matrix();
    }

    /// Sets the scale uniformly.
    pub fn set_uniform_scale(&mut self, factor: f32) {
        self.set_nonuniform_scale(Vector3::new(factor, factor, factor));
    }

    pub fn scale(&self) -> &Vector3<f32> {
        &self.scale
    }

    fn recalculate_pos_matrix(&mut self) {
        self.pos_mat = Translation3::from(self.pos);
        self.recalculate_combined_matrix()
    }

    fn recalculate_scale_matrix(&mut self) {
        self.scale_mat = Scale3::from(self.scale);
        self.recalculate_combined_matrix()
    }

    fn recalculate_combined_matrix(&mut self) {
        self.compound_mat = Affine3::from_matrix_unchecked(
            self.pos_mat.to_homogeneous()
                * self.rot.to_homogeneous()
                * self.scale_mat.to_homogeneous(),
        );
    }

    /// Returns a reference to the combined model matrix.
    pub fn full_matrix(&self) -> &Affine3<f32> {
        &self.compound_mat
    }

    /// Returns the forward direction in world space.
    pub fn forward(&self) -> Vector3<f32> {
        self.rot * Vector3::new(0.0, 0.0, -1.0)
    }

    /// Returns the right direction in world space.
    pub fn right(&self) -> Vector3<f32> {
        self.rot * Vector3::new(1.0, 0.0, 0.0)
    }

    /// Returns the up direction in world space.
    pub fn up(&self) -> Vector3<f32> {
        self.rot * Vector3::new(0.0, 1.0, 0.0)
    }
}
