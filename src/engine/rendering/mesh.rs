//! The three unit meshes every object in the playground is drawn with.

use crate::core::MeshKind;
use std::f32::consts::PI;
use wgpu::util::{BufferInitDescriptor, DeviceExt};
use wgpu::{Buffer, BufferUsages, Device, VertexAttribute, VertexBufferLayout, VertexStepMode};

pub const SPHERE_SEGMENTS: u32 = 24;
pub const SPHERE_RINGS: u32 = 24;

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl Vertex {
    const ATTRIBUTES: [VertexAttribute; 2] = wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];

    pub const fn new(position: [f32; 3], normal: [f32; 3]) -> Self {
        Vertex { position, normal }
    }

    pub fn layout<'a>() -> VertexBufferLayout<'a> {
        VertexBufferLayout {
            array_stride: size_of::<Vertex>() as u64,
            step_mode: VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u16>,
}

impl MeshData {
    pub fn for_kind(kind: MeshKind) -> Self {
        match kind {
            MeshKind::Sphere => Self::unit_sphere(SPHERE_SEGMENTS, SPHERE_RINGS),
            MeshKind::Cube => Self::unit_cube(),
            MeshKind::Plane => Self::unit_plane(),
        }
    }

    /// UV sphere of radius 1 around the origin.
    pub fn unit_sphere(segments: u32, rings: u32) -> Self {
        let segments = segments.max(3);
        let rings = rings.max(2);

        let mut vertices = Vec::with_capacity(((segments + 1) * (rings + 1)) as usize);
        for ring in 0..=rings {
            let phi = ring as f32 / rings as f32 * PI;
            for segment in 0..=segments {
                let theta = segment as f32 / segments as f32 * 2.0 * PI;
                let normal = [phi.sin() * theta.cos(), phi.cos(), phi.sin() * theta.sin()];
                vertices.push(Vertex::new(normal, normal));
            }
        }

        let stride = segments + 1;
        let mut indices = Vec::with_capacity((segments * rings * 6) as usize);
        for ring in 0..rings {
            for segment in 0..segments {
                let a = (ring * stride + segment) as u16;
                let b = ((ring + 1) * stride + segment) as u16;
                let c = b + 1;
                let d = a + 1;

                if ring != 0 {
                    indices.extend_from_slice(&[a, d, b]);
                }
                if ring != rings - 1 {
                    indices.extend_from_slice(&[d, c, b]);
                }
            }
        }

        MeshData { vertices, indices }
    }

    /// Cube with an edge length of 1 centered on the origin. Each face has its
    /// own vertices so normals stay flat.
    pub fn unit_cube() -> Self {
        const FACES: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
            ([1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]),
            ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
            ([0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]),
            ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
            ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
            ([0.0, 0.0, -1.0], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ];

        let mut mesh = MeshData::default();
        for (normal, u, v) in FACES {
            mesh.push_quad(normal, u, v, 0.5);
        }
        mesh
    }

    /// 1x1 quad in the XY plane facing +Z.
    pub fn unit_plane() -> Self {
        let mut mesh = MeshData::default();
        mesh.push_quad([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0], 0.0);
        mesh
    }

    /// Pushes a counter-clockwise quad of size 1 spanned by `u` and `v`,
    /// moved `offset` along `normal`.
    fn push_quad(&mut self, normal: [f32; 3], u: [f32; 3], v: [f32; 3], offset: f32) {
        let base = self.vertices.len() as u16;
        for (su, sv) in [(-0.5, -0.5), (0.5, -0.5), (0.5, 0.5), (-0.5, 0.5)] {
            let position = std::array::from_fn(|i| normal[i] * offset + u[i] * su + v[i] * sv);
            self.vertices.push(Vertex::new(position, normal));
        }
        self.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
}

pub struct GpuMesh {
    pub vertex_buffer: Buffer,
    pub index_buffer: Buffer,
    pub index_count: u32,
}

impl GpuMesh {
    pub fn upload(device: &Device, kind: MeshKind, data: &MeshData) -> Self {
        let vertex_buffer = device.create_buffer_init(&BufferInitDescriptor {
            label: Some(&format!("{kind:?} Vertex Buffer")),
            contents: bytemuck::cast_slice(&data.vertices),
            usage: BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&BufferInitDescriptor {
            label: Some(&format!("{kind:?} Index Buffer")),
            contents: bytemuck::cast_slice(&data.indices),
            usage: BufferUsages::INDEX,
        });

        GpuMesh {
            vertex_buffer,
            index_buffer,
            index_count: data.indices.len() as u32,
        }
    }
}
