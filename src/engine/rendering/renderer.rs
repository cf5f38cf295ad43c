use super::error::*;
use super::mesh::{GpuMesh, MeshData, Vertex};
use super::state::{DEPTH_FORMAT, State};
use super::uniform::{LightUniform, ObjectInstance};
use crate::camera::{CameraUniform, OrbitCamera};
use crate::core::{MeshKind, Scene};
use log::{error, warn};
use snafu::ResultExt;
use std::sync::Arc;
use wgpu::{
    BindGroup, BindGroupDescriptor, BindGroupEntry, BindGroupLayoutDescriptor,
    BindGroupLayoutEntry, BindingType, BlendState, Buffer, BufferBindingType, BufferDescriptor,
    BufferUsages, Color, ColorTargetState, ColorWrites, CommandEncoderDescriptor, CompareFunction,
    DepthBiasState, DepthStencilState, Device, FragmentState, IndexFormat, LoadOp,
    MultisampleState, Operations, PipelineCompilationOptions, PipelineLayoutDescriptor,
    PrimitiveState, PrimitiveTopology, RenderPassColorAttachment,
    RenderPassDepthStencilAttachment, RenderPassDescriptor, RenderPipeline,
    RenderPipelineDescriptor, ShaderModuleDescriptor, ShaderSource, ShaderStages, StencilState,
    StoreOp, SurfaceError, SurfaceTexture, TextureFormat, TextureViewDescriptor, VertexState,
};
use winit::dpi::PhysicalSize;
use winit::window::Window;

pub const SCENE_SHADER: &str = include_str!("shaders/scene.wgsl");

const MESH_KINDS: [MeshKind; 3] = [MeshKind::Sphere, MeshKind::Cube, MeshKind::Plane];
const INITIAL_INSTANCE_CAPACITY: u64 = 64;
const MAX_PRINTED_ERRORS: u32 = 5;

struct MeshSet {
    sphere: GpuMesh,
    cube: GpuMesh,
    plane: GpuMesh,
}

impl MeshSet {
    fn upload(device: &Device) -> Self {
        let upload = |kind| GpuMesh::upload(device, kind, &MeshData::for_kind(kind));
        MeshSet {
            sphere: upload(MeshKind::Sphere),
            cube: upload(MeshKind::Cube),
            plane: upload(MeshKind::Plane),
        }
    }

    fn get(&self, kind: MeshKind) -> &GpuMesh {
        match kind {
            MeshKind::Sphere => &self.sphere,
            MeshKind::Cube => &self.cube,
            MeshKind::Plane => &self.plane,
        }
    }
}

/// Forward renderer drawing a [`Scene`] through an [`OrbitCamera`].
///
/// All objects share one pipeline. Objects are grouped by mesh and drawn
/// instanced, with model matrix and material in a per-instance buffer.
pub struct Renderer {
    pub state: Box<State>,
    window: Arc<Window>,
    pipeline: RenderPipeline,
    uniform_bind_group: BindGroup,
    camera_buffer: Buffer,
    light_buffer: Buffer,
    camera_data: CameraUniform,
    light_data: LightUniform,
    meshes: MeshSet,
    instances: Vec<ObjectInstance>,
    batch_sizes: [u32; MESH_KINDS.len()],
    instance_buffer: Buffer,
    instance_capacity: u64,
    pub clear_color: Color,
    printed_errors: u32,
}

impl Renderer {
    pub async fn new(window: Arc<Window>, max_pixel_ratio: f64) -> Result<Self> {
        let state = Box::new(
            State::new(window.clone(), max_pixel_ratio)
                .await
                .context(StateErr)?,
        );
        let device = &state.device;

        let uniform_bgl = device.create_bind_group_layout(&BindGroupLayoutDescriptor {
            label: Some("Scene Uniform Bind Group Layout"),
            entries: &[uniform_layout_entry(0), uniform_layout_entry(1)],
        });

        let camera_buffer = create_uniform_buffer(device, "Camera Buffer", size_of::<CameraUniform>());
        let light_buffer = create_uniform_buffer(device, "Light Buffer", size_of::<LightUniform>());

        let uniform_bind_group = device.create_bind_group(&BindGroupDescriptor {
            label: Some("Scene Uniform Bind Group"),
            layout: &uniform_bgl,
            entries: &[
                BindGroupEntry {
                    binding: 0,
                    resource: camera_buffer.as_entire_binding(),
                },
                BindGroupEntry {
                    binding: 1,
                    resource: light_buffer.as_entire_binding(),
                },
            ],
        });

        let pipeline = create_scene_pipeline(device, &uniform_bgl, state.config.format);
        let meshes = MeshSet::upload(device);
        let instance_buffer = create_instance_buffer(device, INITIAL_INSTANCE_CAPACITY);

        Ok(Renderer {
            state,
            window,
            pipeline,
            uniform_bind_group,
            camera_buffer,
            light_buffer,
            camera_data: CameraUniform::default(),
            light_data: LightUniform::default(),
            meshes,
            instances: Vec::new(),
            batch_sizes: [0; MESH_KINDS.len()],
            instance_buffer,
            instance_capacity: INITIAL_INSTANCE_CAPACITY,
            clear_color: Color::BLACK,
            printed_errors: 0,
        })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    /// Resizes the surface. Returns the size it ended up with, which the
    /// camera should use for its aspect ratio.
    pub fn resize(&mut self, new_size: PhysicalSize<u32>) -> PhysicalSize<u32> {
        self.state.set_scale_factor(self.window.scale_factor());
        self.state.resize(new_size)
    }

    /// Draws one frame. Returns `false` if rendering cannot continue.
    pub fn render_scene(&mut self, scene: &Scene, camera: &OrbitCamera) -> bool {
        let output = match self.acquire_frame() {
            Ok(output) => output,
            Err(RenderError::Surface {
                source: SurfaceError::Lost | SurfaceError::Outdated,
            }) => {
                self.state.recreate_surface();
                return true; // drop frame but don't cancel
            }
            Err(RenderError::Surface {
                source: SurfaceError::OutOfMemory,
            }) => {
                error!("The application ran out of GPU memory!");
                return false;
            }
            Err(e) => {
                if self.printed_errors < MAX_PRINTED_ERRORS {
                    self.printed_errors += 1;
                    warn!("Skipping frame: {e}");
                }
                return true;
            }
        };
        self.printed_errors = 0;

        self.upload_frame_data(scene, camera);
        self.draw(&output);

        self.window.pre_present_notify();
        output.present();

        true
    }

    fn acquire_frame(&mut self) -> Result<SurfaceTexture> {
        let mut output = self
            .state
            .surface
            .get_current_texture()
            .context(SurfaceErr)?;
        if output.suboptimal {
            drop(output);
            self.state.recreate_surface();
            output = self
                .state
                .surface
                .get_current_texture()
                .context(SurfaceErr)?;
        }

        Ok(output)
    }

    fn upload_frame_data(&mut self, scene: &Scene, camera: &OrbitCamera) {
        self.camera_data.update(camera);
        self.light_data.update(&scene.lighting);

        let queue = &self.state.queue;
        queue.write_buffer(&self.camera_buffer, 0, bytemuck::bytes_of(&self.camera_data));
        queue.write_buffer(&self.light_buffer, 0, bytemuck::bytes_of(&self.light_data));

        self.instances.clear();
        for (kind, batch_size) in MESH_KINDS.iter().zip(self.batch_sizes.iter_mut()) {
            let before = self.instances.len();
            self.instances.extend(
                scene
                    .iter()
                    .filter(|(_, o)| o.mesh == *kind)
                    .map(|(_, o)| ObjectInstance::from_object(o)),
            );
            *batch_size = (self.instances.len() - before) as u32;
        }

        let needed = self.instances.len() as u64;
        if needed > self.instance_capacity {
            self.instance_capacity = needed.next_power_of_two();
            self.instance_buffer = create_instance_buffer(&self.state.device, self.instance_capacity);
        }
        if !self.instances.is_empty() {
            self.state.queue.write_buffer(
                &self.instance_buffer,
                0,
                bytemuck::cast_slice(&self.instances),
            );
        }
    }

    fn draw(&self, output: &SurfaceTexture) {
        let color_view = output
            .texture
            .create_view(&TextureViewDescriptor::default());
        let depth_view = self.state.depth_view();

        let mut encoder = self
            .state
            .device
            .create_command_encoder(&CommandEncoderDescriptor {
                label: Some("Main Encoder"),
            });

        {
            let mut rpass = encoder.begin_render_pass(&RenderPassDescriptor {
                label: Some("Scene Render Pass"),
                color_attachments: &[Some(RenderPassColorAttachment {
                    view: &color_view,
                    resolve_target: None,
                    ops: Operations {
                        load: LoadOp::Clear(self.clear_color),
                        store: StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(RenderPassDepthStencilAttachment {
                    view: &depth_view,
                    depth_ops: Some(Operations {
                        load: LoadOp::Clear(1.0),
                        store: StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                ..RenderPassDescriptor::default()
            });

            rpass.set_pipeline(&self.pipeline);
            rpass.set_bind_group(0, &self.uniform_bind_group, &[]);
            rpass.set_vertex_buffer(1, self.instance_buffer.slice(..));

            let mut first = 0u32;
            for (kind, count) in MESH_KINDS.into_iter().zip(self.batch_sizes) {
                if count == 0 {
                    continue;
                }

                let mesh = self.meshes.get(kind);
                rpass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
                rpass.set_index_buffer(mesh.index_buffer.slice(..), IndexFormat::Uint16);
                rpass.draw_indexed(0..mesh.index_count, 0, first..first + count);
                first += count;
            }
        }

        self.state.queue.submit(Some(encoder.finish()));
    }
}

fn uniform_layout_entry(binding: u32) -> BindGroupLayoutEntry {
    BindGroupLayoutEntry {
        binding,
        visibility: ShaderStages::VERTEX_FRAGMENT,
        ty: BindingType::Buffer {
            ty: BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: None,
        },
        count: None,
    }
}

fn create_uniform_buffer(device: &Device, label: &str, size: usize) -> Buffer {
    device.create_buffer(&BufferDescriptor {
        label: Some(label),
        size: size as u64,
        usage: BufferUsages::UNIFORM | BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

fn create_instance_buffer(device: &Device, capacity: u64) -> Buffer {
    device.create_buffer(&BufferDescriptor {
        label: Some("Object Instance Buffer"),
        size: capacity * size_of::<ObjectInstance>() as u64,
        usage: BufferUsages::VERTEX | BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

fn create_scene_pipeline(
    device: &Device,
    uniform_bgl: &wgpu::BindGroupLayout,
    format: TextureFormat,
) -> RenderPipeline {
    let shader = device.create_shader_module(ShaderModuleDescriptor {
        label: Some("Scene Shader"),
        source: ShaderSource::Wgsl(SCENE_SHADER.into()),
    });

    let layout = device.create_pipeline_layout(&PipelineLayoutDescriptor {
        label: Some("Scene Pipeline Layout"),
        bind_group_layouts: &[uniform_bgl],
        push_constant_ranges: &[],
    });

    device.create_render_pipeline(&RenderPipelineDescriptor {
        label: Some("Scene Pipeline"),
        layout: Some(&layout),
        vertex: VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            compilation_options: PipelineCompilationOptions::default(),
            buffers: &[Vertex::layout(), ObjectInstance::layout()],
        },
        fragment: Some(FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            compilation_options: PipelineCompilationOptions::default(),
            targets: &[Some(ColorTargetState {
                format,
                blend: Some(BlendState::REPLACE),
                write_mask: ColorWrites::ALL,
            })],
        }),
        primitive: PrimitiveState {
            topology: PrimitiveTopology::TriangleList,
            cull_mode: None,
            ..PrimitiveState::default()
        },
        depth_stencil: Some(DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: true,
            depth_compare: CompareFunction::Less,
            stencil: StencilState::default(),
            bias: DepthBiasState::default(),
        }),
        multisample: MultisampleState::default(),
        multiview: None,
        cache: None,
    })
}
