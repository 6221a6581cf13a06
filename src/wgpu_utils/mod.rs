//! WGPU utility functions and helpers
//!
//! Small typed wrappers over raw wgpu buffers and binding descriptions.

pub mod binding_types;
pub mod constant_buffer;

pub use binding_types::*;
pub use constant_buffer::ConstantBuffer;
