use std::sync::Arc;

use cgmath::{Matrix4, Vector3};

use crate::gfx::transform::Transform;

use super::mesh::MeshResource;

/// A transformable, optionally renderable entity. Created through
/// [`Scene::create_object`](super::Scene::create_object).
#[derive(Debug, Clone)]
pub struct SceneObject {
    pub name: String,
    pub visible: bool,
    transform: Transform,
    mesh: Option<Arc<MeshResource>>,
}

impl SceneObject {
    pub(crate) fn new(name: String, mesh: Option<Arc<MeshResource>>) -> Self {
        Self {
            name,
            visible: true,
            transform: Transform::default(),
            mesh,
        }
    }

    pub fn mesh(&self) -> Option<&Arc<MeshResource>> {
        self.mesh.as_ref()
    }

    pub fn set_mesh(&mut self, mesh: Arc<MeshResource>) {
        self.mesh = Some(mesh);
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }

    pub fn position(&self) -> Vector3<f32> {
        self.transform.position()
    }

    pub fn set_position(&mut self, x: f32, y: f32, z: f32) {
        self.transform.set_position(Vector3::new(x, y, z));
    }

    pub fn move_by(&mut self, delta: Vector3<f32>) {
        self.transform.move_by(delta);
    }

    pub fn set_scale(&mut self, x: f32, y: f32, z: f32) {
        self.transform.set_scale(x, y, z);
    }

    pub fn set_uniform_scale(&mut self, scale: f32) {
        self.transform.set_uniform_scale(scale);
    }

    /// Replaces the orientation (Euler degrees).
    pub fn set_rotation(&mut self, x: f32, y: f32, z: f32) {
        self.transform.set_rotation(Vector3::new(x, y, z));
    }

    /// Adds a world-space Euler rotation (degrees) on top of the current one.
    pub fn add_rotation(&mut self, x: f32, y: f32, z: f32) {
        self.transform.add_rotation(Vector3::new(x, y, z));
    }

    pub fn rotate_around(&mut self, axis: Vector3<f32>, angle_degrees: f32) {
        self.transform.rotate_around(axis, angle_degrees);
    }

    pub fn rotation(&self) -> Vector3<f32> {
        self.transform.rotation()
    }

    pub fn forward(&self) -> Vector3<f32> {
        self.transform.forward()
    }

    pub fn up(&self) -> Vector3<f32> {
        self.transform.up()
    }

    pub fn right(&self) -> Vector3<f32> {
        self.transform.right()
    }

    pub fn model_matrix(&self) -> Matrix4<f32> {
        self.transform.model_matrix()
    }

    /// Whether the traversal should emit a draw call for this object.
    pub fn is_renderable(&self) -> bool {
        self.visible && self.mesh.is_some()
    }
}
