//! # Scene Management Module
//!
//! Flat, insertion-ordered scene of transformable objects that share
//! reference-counted meshes.
//!
//! ## Key Components
//!
//! - [`Scene`] - append-only object container
//! - [`SceneObject`] - a transform plus an optional mesh
//! - [`MeshResource`] - CPU geometry with backend buffers attached after upload
//! - [`Vertex3D`] - vertex format with position, normal and colour
//!
//! ## Usage
//!
//! ```no_run
//! use kiln::gfx::scene::Scene;
//!
//! let mut scene = Scene::new();
//! let handle = scene.create_object(None);
//! if let Some(object) = scene.object_mut(handle) {
//!     object.set_position(0.0, -0.3, 2.5);
//!     object.set_uniform_scale(0.3);
//! }
//! ```

pub mod mesh;
pub mod object;
pub mod scene;
pub mod vertex;

// Re-export main types
pub use mesh::{MeshResource, MeshUploader, PrimitiveBuffers};
pub use object::SceneObject;
pub use scene::{ObjectHandle, Scene, SceneStatistics};
pub use vertex::Vertex3D;
