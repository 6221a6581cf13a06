//! Kiln 3D Engine
//!
//! A minimal real-time renderer: a flat scene of transformable objects, a
//! free-flying camera, and one draw call per object each frame, built on
//! wgpu and winit.

pub mod app;
pub mod config;
pub mod error;
pub mod gfx;
pub mod input;
pub mod prelude;
pub mod session;
pub mod timing;
pub mod wgpu_utils;

// Re-export main types for convenience
pub use app::KilnApp;
pub use config::AppConfig;
pub use error::{EngineError, Result};
