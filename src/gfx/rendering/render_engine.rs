//! WGPU-based rendering engine
//!
//! Owns the surface, device and the single mesh pipeline. Frames are drawn
//! from a prepared draw list; the engine never walks the scene itself.

use std::{any::Any, sync::Arc};

use bytemuck::Zeroable;
use log::{debug, info, warn};
use wgpu::util::DeviceExt;

use crate::{
    error::Result,
    gfx::{
        resources::texture_resource::TextureResource,
        scene::{MeshUploader, PrimitiveBuffers, Vertex3D},
    },
    wgpu_utils::{self, ConstantBuffer},
};

use super::{
    draw_list::{DrawCall, ObjectUniform},
    pipeline::PipelineConfig,
};

/// Vertex and index buffers for one uploaded mesh.
pub struct WgpuPrimitiveBuffers {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

impl PrimitiveBuffers for WgpuPrimitiveBuffers {
    fn index_count(&self) -> u32 {
        self.index_count
    }

    fn backend(&self) -> &'static str {
        "wgpu"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// One per-draw constant buffer and the bind group pointing at it.
struct DrawSlot {
    constants: ConstantBuffer<ObjectUniform>,
    bind_group: wgpu::BindGroup,
}

/// Core rendering engine managing GPU resources and draw calls
pub struct RenderEngine {
    surface: wgpu::Surface<'static>,
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    config: wgpu::SurfaceConfiguration,
    depth_texture: TextureResource,
    pipeline: wgpu::RenderPipeline,
    object_layout: wgpu::BindGroupLayout,
    draw_slots: Vec<DrawSlot>,
    clear_color: wgpu::Color,
}

impl RenderEngine {
    /// Creates a new render engine for the given window
    ///
    /// # Arguments
    /// * `window` - Window surface target for rendering
    /// * `width` - Initial surface width in pixels
    /// * `height` - Initial surface height in pixels
    /// * `vsync` - Wait for vertical blank when presenting
    ///
    /// # Errors
    /// Fails if no surface, adapter or device can be created.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        width: u32,
        height: u32,
        vsync: bool,
    ) -> Result<RenderEngine> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;
        info!("Using adapter: {}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("Kiln Device"),
                required_features: wgpu::Features::default(),
                required_limits: wgpu::Limits::downlevel_defaults(),
                memory_hints: wgpu::MemoryHints::default(),
                trace: wgpu::Trace::Off,
            })
            .await?;

        let surface_capabilities = surface.get_capabilities(&adapter);
        let format = surface_capabilities
            .formats
            .iter()
            .copied()
            .find(|f| !f.is_srgb())
            .or_else(|| surface_capabilities.formats.first().copied())
            .unwrap_or(wgpu::TextureFormat::Bgra8Unorm);
        let alpha_mode = surface_capabilities
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        // Configuring a zero-sized surface is a validation error
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode: present_mode(vsync),
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let depth_texture =
            TextureResource::create_depth_texture(&device, &config, "depth_texture");

        let object_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Object Bind Group Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu_utils::uniform_sized::<ObjectUniform>(),
                count: None,
            }],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Mesh Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shader.wgsl").into()),
        });

        let pipeline = PipelineConfig::default()
            .with_label("Mesh Pipeline")
            .with_color_format(format)
            .with_depth_format(TextureResource::DEPTH_FORMAT)
            .build(&device, &shader, &[&object_layout]);

        info!(
            "Render engine ready: {}x{} {:?}, vsync {}",
            config.width, config.height, format, vsync
        );

        Ok(RenderEngine {
            surface,
            device: Arc::new(device),
            queue: Arc::new(queue),
            config,
            depth_texture,
            pipeline,
            object_layout,
            draw_slots: Vec::new(),
            clear_color: wgpu::Color {
                r: 0.1,
                g: 0.2,
                b: 0.3,
                a: 1.0,
            },
        })
    }

    pub fn create_vertex_buffer(&self, vertices: &[Vertex3D]) -> wgpu::Buffer {
        self.device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Vertex Buffer"),
                contents: bytemuck::cast_slice(vertices),
                usage: wgpu::BufferUsages::VERTEX,
            })
    }

    pub fn create_index_buffer(&self, indices: &[u32]) -> wgpu::Buffer {
        self.device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Index Buffer"),
                contents: bytemuck::cast_slice(indices),
                usage: wgpu::BufferUsages::INDEX,
            })
    }

    /// Uniform buffer seeded with `initial`, bindable as a whole.
    pub fn create_constant_buffer<T: bytemuck::Pod>(&self, initial: &T) -> ConstantBuffer<T> {
        ConstantBuffer::new_with_data(&self.device, initial)
    }

    /// Colour the frame is cleared to, RGBA in `[0, 1]`.
    pub fn set_clear_color(&mut self, rgba: [f32; 4]) {
        let [r, g, b, a] = rgba.map(f64::from);
        self.clear_color = wgpu::Color { r, g, b, a };
    }

    /// Toggles vertical sync by switching the present mode
    pub fn set_vsync(&mut self, enable: bool) {
        self.config.present_mode = present_mode(enable);
        self.surface.configure(&self.device, &self.config);
        debug!("Present mode set to {:?}", self.config.present_mode);
    }

    /// Resizes the surface and recreates the depth buffer
    ///
    /// Zero sizes (minimised windows) are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }

        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);

        // Release the old target-sized texture before allocating its replacement
        self.depth_texture.texture.destroy();
        self.depth_texture =
            TextureResource::create_depth_texture(&self.device, &self.config, "depth_texture");
    }

    /// Draws one frame and presents it
    ///
    /// A lost or outdated surface is reconfigured and the frame skipped.
    /// Calls whose mesh was not uploaded by this engine are skipped.
    pub fn render_frame(&mut self, draw_calls: &[DrawCall]) -> Result<()> {
        let surface_texture = match self.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                warn!("Surface lost or outdated, reconfiguring");
                self.surface.configure(&self.device, &self.config);
                return Ok(());
            }
            Err(error) => return Err(error.into()),
        };

        self.ensure_draw_slots(draw_calls.len());
        for (slot, call) in self.draw_slots.iter_mut().zip(draw_calls) {
            slot.constants.update_content(&self.queue, &call.uniform);
        }

        let surface_texture_view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Main Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &surface_texture_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            render_pass.set_pipeline(&self.pipeline);

            for (slot, call) in self.draw_slots.iter().zip(draw_calls) {
                let Some(buffers) = call
                    .mesh
                    .primitive_buffers()
                    .and_then(|buffers| buffers.as_any().downcast_ref::<WgpuPrimitiveBuffers>())
                else {
                    debug!("Skipping '{}': no wgpu buffers", call.mesh.name());
                    continue;
                };

                render_pass.set_bind_group(0, &slot.bind_group, &[]);
                render_pass.set_vertex_buffer(0, buffers.vertex_buffer.slice(..));
                render_pass
                    .set_index_buffer(buffers.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                render_pass.draw_indexed(0..buffers.index_count, 0, 0..1);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        surface_texture.present();
        Ok(())
    }

    /// The pool only grows; slots beyond the current draw count sit idle.
    fn ensure_draw_slots(&mut self, count: usize) {
        while self.draw_slots.len() < count {
            let constants = self.create_constant_buffer(&ObjectUniform::zeroed());
            let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("Object Bind Group"),
                layout: &self.object_layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: constants.binding_resource(),
                }],
            });
            self.draw_slots.push(DrawSlot {
                constants,
                bind_group,
            });
        }
    }
}

impl MeshUploader for RenderEngine {
    fn upload_mesh(
        &self,
        vertices: &[Vertex3D],
        indices: &[u32],
    ) -> Result<Arc<dyn PrimitiveBuffers>> {
        Ok(Arc::new(WgpuPrimitiveBuffers {
            vertex_buffer: self.create_vertex_buffer(vertices),
            index_buffer: self.create_index_buffer(indices),
            index_count: indices.len() as u32,
        }))
    }
}

fn present_mode(vsync: bool) -> wgpu::PresentMode {
    if vsync {
        wgpu::PresentMode::AutoVsync
    } else {
        // Immediate where supported, Mailbox or Fifo otherwise
        wgpu::PresentMode::AutoNoVsync
    }
}
