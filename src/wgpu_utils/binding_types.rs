//! WGPU binding type utilities

/// Uniform buffer whose binding must be at least `T` bytes.
pub fn uniform_sized<T>() -> wgpu::BindingType {
    wgpu::BindingType::Buffer {
        ty: wgpu::BufferBindingType::Uniform,
        has_dynamic_offset: false,
        min_binding_size: wgpu::BufferSize::new(std::mem::size_of::<T>() as u64),
    }
}
