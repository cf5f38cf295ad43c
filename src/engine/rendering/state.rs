use super::error::*;
use log::{debug, info};
use snafu::{OptionExt, ResultExt};
use std::sync::Arc;
use wgpu::{
    Device, DeviceDescriptor, Extent3d, Instance, PowerPreference, Queue, RequestAdapterOptions,
    Surface, SurfaceConfiguration, Texture, TextureDescriptor, TextureDimension, TextureFormat,
    TextureUsages, TextureView, TextureViewDescriptor,
};
use winit::dpi::PhysicalSize;
use winit::window::Window;

pub const DEPTH_FORMAT: TextureFormat = TextureFormat::Depth32Float;

/// The GPU side of a window: surface, device and the depth buffer that goes
/// with the surface.
pub struct State {
    pub surface: Surface<'static>,
    pub device: Device,
    pub queue: Queue,
    pub config: SurfaceConfiguration,
    pub size: PhysicalSize<u32>,
    pub depth_texture: Texture,
    max_pixel_ratio: f64,
    scale_factor: f64,
}

impl State {
    pub async fn new(window: Arc<Window>, max_pixel_ratio: f64) -> Result<Self, StateError> {
        let scale_factor = window.scale_factor();
        let size = effective_surface_size(window.inner_size(), scale_factor, max_pixel_ratio);

        let instance = Instance::default();
        let surface = instance
            .create_surface(window)
            .context(CreateSurfaceErr)?;

        let adapter = instance
            .request_adapter(&RequestAdapterOptions {
                power_preference: PowerPreference::HighPerformance,
                force_fallback_adapter: false,
                compatible_surface: Some(&surface),
            })
            .await
            .context(RequestAdapterErr)?;
        info!("Using adapter {:?}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(&DeviceDescriptor {
                label: Some("Renderer Hardware"),
                ..DeviceDescriptor::default()
            })
            .await
            .context(RequestDeviceErr)?;

        let config = surface
            .get_default_config(&adapter, size.width.max(1), size.height.max(1))
            .context(SurfaceUnsupportedErr)?;
        surface.configure(&device, &config);

        let depth_texture = Self::create_depth_texture(&device, &config);

        Ok(State {
            surface,
            device,
            queue,
            config,
            size,
            depth_texture,
            max_pixel_ratio,
            scale_factor,
        })
    }

    fn create_depth_texture(device: &Device, config: &SurfaceConfiguration) -> Texture {
        device.create_texture(&TextureDescriptor {
            label: Some("Depth Texture"),
            size: Extent3d {
                width: config.width,
                height: config.height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: TextureUsages::RENDER_ATTACHMENT | TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        })
    }

    pub fn depth_view(&self) -> TextureView {
        self.depth_texture
            .create_view(&TextureViewDescriptor::default())
    }

    /// Reconfigures the surface for a new window size. Returns the size the
    /// surface actually got after capping the pixel ratio.
    pub fn resize(&mut self, window_size: PhysicalSize<u32>) -> PhysicalSize<u32> {
        let size = effective_surface_size(window_size, self.scale_factor, self.max_pixel_ratio);
        if size.width == 0 || size.height == 0 {
            return self.size;
        }

        debug!("Resizing surface to {}x{}", size.width, size.height);
        self.size = size;
        self.config.width = size.width;
        self.config.height = size.height;
        self.recreate_surface();

        size
    }

    pub fn set_scale_factor(&mut self, scale_factor: f64) {
        self.scale_factor = scale_factor;
    }

    pub fn recreate_surface(&mut self) {
        self.surface.configure(&self.device, &self.config);
        self.depth_texture = Self::create_depth_texture(&self.device, &self.config);
    }
}

/// Size of the render surface for a window of `window_size` physical pixels.
///
/// When the display's pixel ratio exceeds `max_pixel_ratio`, the surface is
/// shrunk so it only carries `max_pixel_ratio` pixels per logical pixel.
pub fn effective_surface_size(
    window_size: PhysicalSize<u32>,
    scale_factor: f64,
    max_pixel_ratio: f64,
) -> PhysicalSize<u32> {
    if scale_factor <= max_pixel_ratio || max_pixel_ratio <= 0.0 {
        return window_size;
    }

    let ratio = max_pixel_ratio / scale_factor;
    PhysicalSize::new(
        (window_size.width as f64 * ratio).round() as u32,
        (window_size.height as f64 * ratio).round() as u32,
    )
}
