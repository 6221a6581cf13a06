//! Scene traversal producing one draw call per renderable object

use std::sync::Arc;

use bytemuck::{Pod, Zeroable};
use cgmath::{Matrix, Matrix4, SquareMatrix};

use crate::gfx::{camera::Camera, scene::MeshResource, scene::Scene};

/// Per-draw constant block, laid out to match `ObjectUniforms` in `shader.wgsl`.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct ObjectUniform {
    pub model_view_projection: [[f32; 4]; 4],
    pub model: [[f32; 4]; 4],
    /// Inverse-transpose of `model`, for transforming normals.
    pub normal: [[f32; 4]; 4],
}

impl ObjectUniform {
    pub fn new(view_projection: Matrix4<f32>, model: Matrix4<f32>) -> Self {
        // Degenerate scale has no inverse; identity keeps lighting finite
        let normal = model
            .invert()
            .map(|inverse| inverse.transpose())
            .unwrap_or_else(Matrix4::identity);

        Self {
            model_view_projection: (view_projection * model).into(),
            model: model.into(),
            normal: normal.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DrawCall {
    pub mesh: Arc<MeshResource>,
    pub uniform: ObjectUniform,
}

/// Walks the scene once, computing the camera matrix a single time.
///
/// Hidden objects and objects without a mesh are skipped; insertion order
/// is preserved.
pub fn build_draw_list(scene: &Scene, camera: &Camera) -> Vec<DrawCall> {
    let view_projection = camera.view_projection_matrix();

    scene
        .iter()
        .filter(|object| object.is_renderable())
        .filter_map(|object| {
            let mesh = object.mesh()?;
            Some(DrawCall {
                mesh: Arc::clone(mesh),
                uniform: ObjectUniform::new(view_projection, object.model_matrix()),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use cgmath::Vector3;

    use super::*;
    use crate::gfx::{math::test_support::*, scene::mesh::test_support::triangle_mesh};

    fn column_major(matrix: [[f32; 4]; 4]) -> Matrix4<f32> {
        matrix.into()
    }

    #[test]
    fn test_empty_scene_yields_nothing() {
        assert!(build_draw_list(&Scene::new(), &Camera::new()).is_empty());
    }

    #[test]
    fn test_object_ahead_of_camera_lands_in_view_center() {
        let mut scene = Scene::new();
        let handle = scene.create_object(Some(triangle_mesh(0.0)));
        scene.object_mut(handle).unwrap().set_position(0.0, 0.0, 5.0);

        let calls = build_draw_list(&scene, &Camera::new());
        assert_eq!(calls.len(), 1);

        let mvp = column_major(calls[0].uniform.model_view_projection);
        let ndc = project(mvp, Vector3::new(0.0, 0.0, 0.0));
        assert!(approx(ndc.x, 0.0));
        assert!(approx(ndc.y, 0.0));
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }

    #[test]
    fn test_hidden_and_meshless_objects_are_skipped() {
        let mut scene = Scene::new();
        let mesh = triangle_mesh(0.0);
        let visible = scene.create_object(Some(Arc::clone(&mesh)));
        let hidden = scene.create_object(Some(Arc::clone(&mesh)));
        scene.create_object(None);
        scene.object_mut(hidden).unwrap().visible = false;
        scene.object_mut(visible).unwrap().set_position(1.0, 2.0, 3.0);

        let calls = build_draw_list(&scene, &Camera::new());

        assert_eq!(calls.len(), 1);
        let model = column_major(calls[0].uniform.model);
        assert_vec3_eq(model.w.truncate(), Vector3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_shared_mesh_is_drawn_per_object_in_order() {
        let mut scene = Scene::new();
        let mesh = triangle_mesh(0.0);
        for x in 0..3 {
            let handle = scene.create_object(Some(Arc::clone(&mesh)));
            scene.object_mut(handle).unwrap().set_position(x as f32, 0.0, 0.0);
        }

        let calls = build_draw_list(&scene, &Camera::new());

        assert_eq!(calls.len(), 3);
        for (x, call) in calls.iter().enumerate() {
            assert!(Arc::ptr_eq(&call.mesh, &mesh));
            assert!(approx(call.uniform.model[3][0], x as f32));
        }
    }

    #[test]
    fn test_normal_matrix_undoes_nonuniform_scale() {
        let model = Matrix4::from_nonuniform_scale(2.0, 1.0, 1.0);
        let uniform = ObjectUniform::new(Matrix4::identity(), model);

        let normal = column_major(uniform.normal);
        assert!(approx(normal.x.x, 0.5));
        assert!(approx(normal.y.y, 1.0));
    }

    #[test]
    fn test_singular_model_falls_back_to_identity_normal() {
        let model = Matrix4::from_nonuniform_scale(0.0, 1.0, 1.0);
        let uniform = ObjectUniform::new(Matrix4::identity(), model);

        assert_mat4_eq(column_major(uniform.normal), Matrix4::identity());
    }

    #[test]
    fn test_uniform_size_matches_shader_block() {
        assert_eq!(std::mem::size_of::<ObjectUniform>(), 192);
    }
}
