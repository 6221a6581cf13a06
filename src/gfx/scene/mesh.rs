//! CPU-side mesh data and the seam to the GPU backend
//!
//! A [`MeshResource`] keeps its vertices and indices on the CPU and carries the
//! backend's uploaded buffers as a [`PrimitiveBuffers`] trait object. The backend
//! that created the buffers is the only one that knows their concrete type and
//! recovers it with [`PrimitiveBuffers::as_any`].

use std::{any::Any, fmt, sync::Arc};

use crate::error::Result;

use super::vertex::Vertex3D;

/// Backend-specific GPU buffers for one mesh.
pub trait PrimitiveBuffers: Any + Send + Sync {
    /// Number of indices the draw call should consume.
    fn index_count(&self) -> u32;

    /// Short backend name used in diagnostics.
    fn backend(&self) -> &'static str;

    fn as_any(&self) -> &dyn Any;
}

/// Anything able to turn vertices and indices into [`PrimitiveBuffers`].
///
/// The wgpu `RenderEngine` is the production implementation.
pub trait MeshUploader {
    fn upload_mesh(
        &self,
        vertices: &[Vertex3D],
        indices: &[u32],
    ) -> Result<Arc<dyn PrimitiveBuffers>>;
}

/// Geometry shared by any number of scene objects.
pub struct MeshResource {
    name: String,
    vertices: Vec<Vertex3D>,
    indices: Vec<u32>,
    primitive_buffers: Option<Arc<dyn PrimitiveBuffers>>,
}

impl MeshResource {
    pub fn new(name: impl Into<String>, vertices: Vec<Vertex3D>, indices: Vec<u32>) -> Self {
        Self {
            name: name.into(),
            vertices,
            indices,
            primitive_buffers: None,
        }
    }

    /// Uploads the geometry and attaches the resulting buffers.
    pub fn upload(&mut self, uploader: &dyn MeshUploader) -> Result<()> {
        let buffers = uploader.upload_mesh(&self.vertices, &self.indices)?;
        self.primitive_buffers = Some(buffers);
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn vertices(&self) -> &[Vertex3D] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertices.len() as u32
    }

    pub fn triangle_count(&self) -> u32 {
        (self.indices.len() / 3) as u32
    }

    pub fn primitive_buffers(&self) -> Option<&dyn PrimitiveBuffers> {
        self.primitive_buffers.as_deref()
    }

    pub fn is_uploaded(&self) -> bool {
        self.primitive_buffers.is_some()
    }
}

impl fmt::Debug for MeshResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MeshResource")
            .field("name", &self.name)
            .field("vertices", &self.vertices.len())
            .field("indices", &self.indices.len())
            .field(
                "primitive_buffers",
                &self.primitive_buffers.as_ref().map(|buffers| buffers.backend()),
            )
            .finish()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::{any::Any, cell::Cell, sync::Arc};

    use super::*;

    /// Buffers produced by [`RecordingUploader`]; no GPU involved.
    #[derive(Debug)]
    pub struct FakeBuffers {
        pub vertex_count: usize,
        pub index_count: u32,
    }

    impl PrimitiveBuffers for FakeBuffers {
        fn index_count(&self) -> u32 {
            self.index_count
        }

        fn backend(&self) -> &'static str {
            "fake"
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    #[derive(Default)]
    pub struct RecordingUploader {
        pub uploads: Cell<usize>,
    }

    impl MeshUploader for RecordingUploader {
        fn upload_mesh(
            &self,
            vertices: &[Vertex3D],
            indices: &[u32],
        ) -> Result<Arc<dyn PrimitiveBuffers>> {
            self.uploads.set(self.uploads.get() + 1);
            Ok(Arc::new(FakeBuffers {
                vertex_count: vertices.len(),
                index_count: indices.len() as u32,
            }))
        }
    }

    /// A single triangle in the XY plane at the given depth.
    pub fn triangle_mesh(depth: f32) -> Arc<MeshResource> {
        let color = [0.8, 0.8, 0.8];
        let normal = [0.0, 0.0, -1.0];
        let mut mesh = MeshResource::new(
            "triangle",
            vec![
                Vertex3D::new([-0.5, -0.5, depth], normal, color),
                Vertex3D::new([0.0, 0.5, depth], normal, color),
                Vertex3D::new([0.5, -0.5, depth], normal, color),
            ],
            vec![0, 1, 2],
        );
        mesh.upload(&RecordingUploader::default())
            .expect("fake upload cannot fail");
        Arc::new(mesh)
    }
}
