//! OBJ model loading
//!
//! OBJ files are right-handed with counter-clockwise front faces. The engine
//! is left-handed with clockwise front faces, so every model is mirrored in Z
//! and its triangle winding reversed on the way in.

use std::{
    io::BufRead,
    path::{Path, PathBuf},
    sync::Arc,
};

use cgmath::{InnerSpace, Vector3, Zero};
use log::{debug, info, warn};

use crate::{
    error::{EngineError, Result},
    gfx::scene::{MeshResource, MeshUploader, Vertex3D},
};

/// Colour for vertices whose model has no material.
pub const DEFAULT_VERTEX_COLOR: [f32; 3] = [0.8, 0.8, 0.8];

fn load_options() -> tobj::LoadOptions {
    tobj::LoadOptions {
        single_index: true,
        triangulate: true,
        ignore_points: true,
        ignore_lines: true,
        ..Default::default()
    }
}

/// Loads meshes from a models directory and uploads them to the GPU.
pub struct ResourceManager<'a> {
    models_dir: PathBuf,
    uploader: &'a dyn MeshUploader,
}

impl<'a> ResourceManager<'a> {
    pub fn new(models_dir: impl Into<PathBuf>, uploader: &'a dyn MeshUploader) -> Self {
        Self {
            models_dir: models_dir.into(),
            uploader,
        }
    }

    pub fn models_dir(&self) -> &Path {
        &self.models_dir
    }

    /// Loads `relative_path` (resolved under the models directory), merges
    /// every model in the file into one mesh and uploads it.
    ///
    /// Each call parses and uploads again; share the returned `Arc` to draw
    /// the same mesh more than once.
    pub fn load_model(&self, relative_path: impl AsRef<Path>) -> Result<Arc<MeshResource>> {
        let path = self.models_dir.join(relative_path.as_ref());
        if !path.is_file() {
            return Err(EngineError::ResourceNotFound(path));
        }

        let (models, materials) =
            tobj::load_obj(&path, &load_options()).map_err(|source| EngineError::ModelLoad {
                path: path.clone(),
                source,
            })?;
        let materials = materials.unwrap_or_else(|error| {
            warn!("No materials for {}: {}", path.display(), error);
            Vec::new()
        });

        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let mut mesh = build_mesh(&name, &models, &materials)?;
        mesh.upload(self.uploader)?;
        info!(
            "Loaded model '{}': {} vertices, {} triangles",
            name,
            mesh.vertex_count(),
            mesh.triangle_count()
        );

        Ok(Arc::new(mesh))
    }
}

/// Parses OBJ text into a mesh without touching the filesystem or the GPU.
///
/// Material libraries cannot be resolved without a directory, so every
/// vertex gets [`DEFAULT_VERTEX_COLOR`].
pub fn parse_obj(name: &str, reader: &mut impl BufRead) -> Result<MeshResource> {
    let (models, _) = tobj::load_obj_buf(reader, &load_options(), |_| {
        Err(tobj::LoadError::OpenFileFailed)
    })
    .map_err(|source| EngineError::ModelLoad {
        path: PathBuf::from(name),
        source,
    })?;

    build_mesh(name, &models, &[])
}

/// Merges tobj models into a single left-handed mesh with smooth normals.
pub fn build_mesh(
    name: &str,
    models: &[tobj::Model],
    materials: &[tobj::Material],
) -> Result<MeshResource> {
    let mut vertices: Vec<Vertex3D> = Vec::new();
    let mut indices: Vec<u32> = Vec::new();

    for model in models {
        let mesh = &model.mesh;
        let base = vertices.len() as u32;
        let color = mesh
            .material_id
            .and_then(|id| materials.get(id))
            .and_then(|material| material.diffuse)
            .unwrap_or(DEFAULT_VERTEX_COLOR);

        vertices.extend(mesh.positions.chunks_exact(3).map(|p| {
            Vertex3D::new([p[0], p[1], -p[2]], [0.0; 3], color)
        }));

        for face in mesh.indices.chunks_exact(3) {
            indices.extend([base + face[2], base + face[1], base + face[0]]);
        }

        debug!(
            "Model '{}': {} positions, {} triangles",
            model.name,
            mesh.positions.len() / 3,
            mesh.indices.len() / 3
        );
    }

    if indices.is_empty() {
        return Err(EngineError::InvalidMesh(format!(
            "'{}' contains no triangles",
            name
        )));
    }
    if let Some(&index) = indices.iter().find(|&&index| index as usize >= vertices.len()) {
        return Err(EngineError::InvalidMesh(format!(
            "'{}' references vertex {} of {}",
            name,
            index,
            vertices.len()
        )));
    }

    accumulate_normals(&mut vertices, &indices);
    Ok(MeshResource::new(name, vertices, indices))
}

/// Sums each face normal into its three vertices, then normalises.
fn accumulate_normals(vertices: &mut [Vertex3D], indices: &[u32]) {
    let mut sums = vec![Vector3::<f32>::zero(); vertices.len()];

    for face in indices.chunks_exact(3) {
        let [a, b, c] = [face[0], face[1], face[2]].map(|i| i as usize);
        let p0 = Vector3::from(vertices[a].position);
        let p1 = Vector3::from(vertices[b].position);
        let p2 = Vector3::from(vertices[c].position);

        let normal = (p1 - p0).cross(p2 - p0);
        // Degenerate faces have no direction to contribute
        if normal.magnitude2() <= f32::EPSILON * f32::EPSILON {
            continue;
        }
        let normal = normal.normalize();

        sums[a] += normal;
        sums[b] += normal;
        sums[c] += normal;
    }

    for (vertex, sum) in vertices.iter_mut().zip(sums) {
        vertex.normal = if sum.magnitude2() > f32::EPSILON {
            sum.normalize().into()
        } else {
            [0.0, 1.0, 0.0]
        };
    }
}
