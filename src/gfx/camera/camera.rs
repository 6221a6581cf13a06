use std::cell::Cell;

use cgmath::{Matrix4, Quaternion, SquareMatrix, Vector3};

use crate::gfx::math::{
    euler_to_quaternion, identity_rotation, look_to_lh, perspective_lh_zo, BASE_FORWARD,
    BASE_RIGHT, BASE_UP,
};

/// Free-flying perspective camera.
///
/// The view-projection matrix is cached behind a dirty flag like
/// [`Transform`](crate::gfx::transform::Transform). All state is private and
/// every setter invalidates, so the cache can never go stale; during
/// interactive use the controller touches the camera every frame and the
/// matrix is rebuilt once per rendered frame.
#[derive(Debug, Clone)]
pub struct Camera {
    fov: f32,
    aspect_ratio: f32,
    near: f32,
    far: f32,

    position: Vector3<f32>,
    rotation: Quaternion<f32>,

    view_projection: Cell<Matrix4<f32>>,
    dirty: Cell<bool>,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            fov: 45.0,
            aspect_ratio: 1.0,
            near: 0.1,
            far: 50.0,
            position: Vector3::new(0.0, 0.0, 0.0),
            rotation: identity_rotation(),
            view_projection: Cell::new(Matrix4::identity()),
            dirty: Cell::new(true),
        }
    }
}

impl Camera {
    pub fn new() -> Self {
        Self::default()
    }

    /// Vertical field of view in degrees.
    pub fn fov(&self) -> f32 {
        self.fov
    }

    pub fn set_fov(&mut self, fov_degrees: f32) {
        self.fov = fov_degrees;
        self.invalidate();
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }

    /// Must be positive; callers reject degenerate sizes before getting here.
    pub fn set_aspect_ratio(&mut self, aspect_ratio: f32) {
        self.aspect_ratio = aspect_ratio;
        self.invalidate();
    }

    pub fn set_aspect_ratio_from_size(&mut self, width: u32, height: u32) {
        self.set_aspect_ratio(width as f32 / height as f32);
    }

    pub fn clip_range(&self) -> (f32, f32) {
        (self.near, self.far)
    }

    pub fn set_clip_range(&mut self, near: f32, far: f32) {
        self.near = near;
        self.far = far;
        self.invalidate();
    }

    pub fn position(&self) -> Vector3<f32> {
        self.position
    }

    pub fn set_position(&mut self, position: Vector3<f32>) {
        self.position = position;
        self.invalidate();
    }

    pub fn move_by(&mut self, delta: Vector3<f32>) {
        self.set_position(self.position + delta);
    }

    /// Orients the camera from Euler degrees. Roll is normally zero.
    pub fn set_rotation(&mut self, pitch: f32, yaw: f32, roll: f32) {
        self.rotation = euler_to_quaternion(Vector3::new(pitch, yaw, roll));
        self.invalidate();
    }

    pub fn orientation(&self) -> Quaternion<f32> {
        self.rotation
    }

    pub fn forward(&self) -> Vector3<f32> {
        self.rotation * BASE_FORWARD
    }

    pub fn up(&self) -> Vector3<f32> {
        self.rotation * BASE_UP
    }

    pub fn right(&self) -> Vector3<f32> {
        self.rotation * BASE_RIGHT
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        look_to_lh(self.position, self.forward(), self.up())
    }

    pub fn projection_matrix(&self) -> Matrix4<f32> {
        perspective_lh_zo(self.fov, self.aspect_ratio, self.near, self.far)
    }

    /// World space to clip space.
    pub fn view_projection_matrix(&self) -> Matrix4<f32> {
        if self.dirty.get() {
            self.view_projection
                .set(self.projection_matrix() * self.view_matrix());
            self.dirty.set(false);
        }

        self.view_projection.get()
    }

    fn invalidate(&mut self) {
        self.dirty.set(true);
    }
}

#[cfg(test)]
mod tests {
    use cgmath::InnerSpace;

    use super::*;
    use crate::gfx::math::test_support::*;

    #[test]
    fn test_default_basis() {
        let camera = Camera::new();
        assert_vec3_eq(camera.forward(), Vector3::new(0.0, 0.0, 1.0));
        assert_vec3_eq(camera.up(), Vector3::new(0.0, 1.0, 0.0));
        assert_vec3_eq(camera.right(), Vector3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_point_ahead_projects_to_viewport_center() {
        let camera = Camera::new();
        let ndc = project(camera.view_projection_matrix(), Vector3::new(0.0, 0.0, 5.0));
        assert!(approx(ndc.x, 0.0));
        assert!(approx(ndc.y, 0.0));
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }

    #[test]
    fn test_right_and_up_map_to_positive_ndc() {
        let camera = Camera::new();
        let right = project(camera.view_projection_matrix(), Vector3::new(1.0, 0.0, 5.0));
        let up = project(camera.view_projection_matrix(), Vector3::new(0.0, 1.0, 5.0));
        assert!(right.x > 0.0);
        assert!(up.y > 0.0);
    }

    #[test]
    fn test_every_setter_invalidates_cache() {
        let mut camera = Camera::new();
        let mut previous = camera.view_projection_matrix();

        let mutations: Vec<Box<dyn Fn(&mut Camera)>> = vec![
            Box::new(|c: &mut Camera| c.set_fov(70.0)),
            Box::new(|c: &mut Camera| c.set_aspect_ratio(2.0)),
            Box::new(|c: &mut Camera| c.set_aspect_ratio_from_size(800, 600)),
            Box::new(|c: &mut Camera| c.set_clip_range(0.5, 200.0)),
            Box::new(|c: &mut Camera| c.set_position(Vector3::new(1.0, 2.0, 3.0))),
            Box::new(|c: &mut Camera| c.move_by(Vector3::new(0.0, 0.0, 1.0))),
            Box::new(|c: &mut Camera| c.set_rotation(10.0, 20.0, 0.0)),
        ];

        for mutate in mutations {
            mutate(&mut camera);
            let current = camera.view_projection_matrix();
            let a: [[f32; 4]; 4] = current.into();
            let b: [[f32; 4]; 4] = previous.into();
            assert_ne!(a, b, "cached matrix survived a mutation");
            previous = current;
        }
    }

    #[test]
    fn test_cached_matrix_matches_fresh_computation() {
        let mut camera = Camera::new();
        camera.set_position(Vector3::new(0.0, 1.0, -4.0));
        camera.set_rotation(15.0, 30.0, 0.0);
        camera.set_aspect_ratio(16.0 / 9.0);

        let cached = camera.view_projection_matrix();
        let fresh = camera.projection_matrix() * camera.view_matrix();
        assert_mat4_eq(cached, fresh);
        assert_mat4_eq(camera.view_projection_matrix(), fresh);
    }

    #[test]
    fn test_yaw_looks_along_rotated_forward() {
        let mut camera = Camera::new();
        camera.set_rotation(0.0, 90.0, 0.0);

        // Facing +X now: a point on +X is dead ahead.
        let ndc = project(camera.view_projection_matrix(), Vector3::new(5.0, 0.0, 0.0));
        assert!(approx(ndc.x, 0.0) && approx(ndc.y, 0.0));
        assert!(approx(camera.right().dot(Vector3::new(0.0, 0.0, -1.0)), 1.0));
    }

    #[test]
    fn test_looking_straight_down_stays_well_defined() {
        let mut camera = Camera::new();
        camera.set_rotation(90.0, 45.0, 0.0);

        let matrix: [[f32; 4]; 4] = camera.view_projection_matrix().into();
        assert!(matrix.iter().flatten().all(|value| value.is_finite()));
        assert_vec3_eq(camera.forward(), Vector3::new(0.0, -1.0, 0.0));
    }
}
