use crate::core::{Lighting, SceneObject};
use crate::ensure_aligned;
use nalgebra::{Matrix4, Vector4};
use wgpu::{VertexAttribute, VertexBufferLayout, VertexStepMode};

#[repr(C)]
#[derive(Default, Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightUniform {
    ambient: Vector4<f32>,
    direction: Vector4<f32>,
    color: Vector4<f32>,
}

ensure_aligned!(LightUniform { ambient, direction, color }, align <= 16 * 3 => size);

impl LightUniform {
    pub fn update(&mut self, lighting: &Lighting) {
        let ambient = lighting.ambient.color * lighting.ambient.intensity;
        let color = lighting.directional.color * lighting.directional.intensity;

        self.ambient = ambient.push(1.0);
        self.direction = lighting.directional.direction_to_light().push(0.0);
        self.color = color.push(1.0);
    }
}

/// Per-object data, fed to the pipeline as an instance vertex buffer.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ObjectInstance {
    model: Matrix4<f32>,
    color: Vector4<f32>,
    params: Vector4<f32>,
}

ensure_aligned!(ObjectInstance { model, color, params }, align <= 16 * 6 => size);

impl ObjectInstance {
    const ATTRIBUTES: [VertexAttribute; 6] = wgpu::vertex_attr_array![
        2 => Float32x4,
        3 => Float32x4,
        4 => Float32x4,
        5 => Float32x4,
        6 => Float32x4,
        7 => Float32x4,
    ];

    pub fn from_object(object: &SceneObject) -> Self {
        let material = &object.material;
        ObjectInstance {
            model: object.transform.full_matrix().to_homogeneous(),
            color: material.color.push(material.metalness),
            params: Vector4::new(material.roughness, 0.0, 0.0, 0.0),
        }
    }

    pub fn layout<'a>() -> VertexBufferLayout<'a> {
        VertexBufferLayout {
            array_stride: size_of::<ObjectInstance>() as u64,
            step_mode: VertexStepMode::Instance,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Material, MeshKind};
    use nalgebra::Vector3;

    #[test]
    fn instance_carries_pose_and_material() {
        let mut object = SceneObject::new("Ball", MeshKind::Sphere, Material::from_hex(0xff0000, 0.3, 0.4));
        object.transform.set_position(1.0, 2.0, 3.0);
        object.transform.set_uniform_scale(0.5);

        let instance = ObjectInstance::from_object(&object);
        let translation = Vector3::new(instance.model[(0, 3)], instance.model[(1, 3)], instance.model[(2, 3)]);
        assert_eq!(translation, Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(instance.model[(0, 0)], 0.5);
        assert_eq!(instance.color, Vector4::new(1.0, 0.0, 0.0, 0.3));
        assert_eq!(instance.params.x, 0.4);
    }

    #[test]
    fn light_premultiplies_intensity() {
        let mut uniform = LightUniform::default();
        uniform.update(&Lighting::default());
        assert!((uniform.ambient.x - 0.7).abs() < 1e-6);
        assert!((uniform.color.y - 0.2).abs() < 1e-6);
        assert!((uniform.direction.norm() - 1.0).abs() < 1e-6);
    }
}
