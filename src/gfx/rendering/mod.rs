//! Core rendering functionality
//!
//! [`build_draw_list`] turns the scene into per-object draw calls; the
//! [`RenderEngine`] submits them with wgpu.

pub mod draw_list;
pub mod pipeline;
pub mod render_engine;

pub use draw_list::{build_draw_list, DrawCall, ObjectUniform};
pub use pipeline::PipelineConfig;
pub use render_engine::{RenderEngine, WgpuPrimitiveBuffers};
