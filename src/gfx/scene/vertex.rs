//! # Vertex Data Structures
//!
//! GPU-compatible vertex format shared by the OBJ loader and the render pipeline.

/// A 3D vertex with position, normal and colour.
///
/// `#[repr(C)]` keeps the layout stable for upload through `bytemuck`.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex3D {
    /// Position in the mesh's local, left-handed space
    pub position: [f32; 3],
    /// Unit normal used for lighting
    pub normal: [f32; 3],
    /// Linear RGB colour
    pub color: [f32; 3],
}

impl Vertex3D {
    pub const ATTRIBUTES: [wgpu::VertexAttribute; 3] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x3];

    pub fn new(position: [f32; 3], normal: [f32; 3], color: [f32; 3]) -> Self {
        Self {
            position,
            normal,
            color,
        }
    }

    /// Vertex buffer layout:
    /// - location 0: position
    /// - location 1: normal
    /// - location 2: color
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex3D>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}
