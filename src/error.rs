//! Engine error types
//!
//! Every failure in Kiln is fatal except an invalid resize, which is ignored
//! by the session before it can reach the camera or the surface.

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced while starting up or running the engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// An asset (model or shader) path does not exist.
    #[error("could not find resource {0}")]
    ResourceNotFound(PathBuf),

    /// The OBJ parser rejected a model file.
    #[error("failed to load model {path}")]
    ModelLoad {
        path: PathBuf,
        #[source]
        source: tobj::LoadError,
    },

    /// A model parsed but its contents cannot be rendered.
    #[error("invalid mesh: {0}")]
    InvalidMesh(String),

    #[error("event loop failure")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("failed to create window")]
    WindowCreation(#[from] winit::error::OsError),

    #[error("failed to create rendering surface")]
    SurfaceCreation(#[from] wgpu::CreateSurfaceError),

    #[error("no compatible graphics adapter")]
    AdapterRequest(#[from] wgpu::RequestAdapterError),

    #[error("failed to create graphics device")]
    DeviceRequest(#[from] wgpu::RequestDeviceError),

    #[error("surface error: {0}")]
    Surface(#[from] wgpu::SurfaceError),
}

pub type Result<T, E = EngineError> = std::result::Result<T, E>;
