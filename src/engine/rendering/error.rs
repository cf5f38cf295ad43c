use snafu::Snafu;
use wgpu::{CreateSurfaceError, RequestAdapterError, RequestDeviceError, SurfaceError};

pub type Result<T, E = RenderError> = std::result::Result<T, E>;

#[derive(Debug, Snafu)]
#[snafu(context(suffix(Err)), visibility(pub(crate)))]
pub enum StateError {
    #[snafu(display("Unable to create surface: {source}"))]
    CreateSurface { source: CreateSurfaceError },

    #[snafu(display("Unable to get device adapter: {source}"))]
    RequestAdapter { source: RequestAdapterError },

    #[snafu(display("Unable to request device: {source}"))]
    RequestDevice { source: RequestDeviceError },

    #[snafu(display("The surface is not supported by the chosen adapter"))]
    SurfaceUnsupported,
}

#[derive(Debug, Snafu)]
#[snafu(context(suffix(Err)), visibility(pub(crate)))]
pub enum RenderError {
    #[snafu(display("Error with current render surface: {source}"))]
    Surface { source: SurfaceError },

    #[snafu(display("Error while creating render state: {source}"))]
    State { source: StateError },
}
