//! Position, rotation and scale of a scene object
//!
//! The model matrix is composed as `T * R * S` (scale innermost) and cached
//! behind a dirty flag. Fields are private, so every change goes through a
//! setter that invalidates the cache.

use std::cell::Cell;

use cgmath::{Matrix4, Quaternion, SquareMatrix, Vector3};

use super::math::{
    axis_angle, euler_to_quaternion, identity_rotation, quaternion_to_euler, BASE_FORWARD,
    BASE_RIGHT, BASE_UP,
};

#[derive(Debug, Clone)]
pub struct Transform {
    position: Vector3<f32>,
    scale: Vector3<f32>,
    rotation: Quaternion<f32>,

    model_matrix: Cell<Matrix4<f32>>,
    dirty: Cell<bool>,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vector3::new(0.0, 0.0, 0.0),
            scale: Vector3::new(1.0, 1.0, 1.0),
            rotation: identity_rotation(),
            model_matrix: Cell::new(Matrix4::identity()),
            dirty: Cell::new(false),
        }
    }
}

impl Transform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(&self) -> Vector3<f32> {
        self.position
    }

    pub fn set_position(&mut self, position: Vector3<f32>) {
        self.position = position;
        self.invalidate();
    }

    /// Moves relative to the current position.
    pub fn move_by(&mut self, delta: Vector3<f32>) {
        self.set_position(self.position + delta);
    }

    pub fn scale(&self) -> Vector3<f32> {
        self.scale
    }

    /// Sets per-axis scale. Negative components mirror the geometry.
    pub fn set_scale(&mut self, x: f32, y: f32, z: f32) {
        self.scale = Vector3::new(x, y, z);
        self.invalidate();
    }

    pub fn set_uniform_scale(&mut self, scale: f32) {
        self.set_scale(scale, scale, scale);
    }

    /// Raw orientation.
    pub fn orientation(&self) -> Quaternion<f32> {
        self.rotation
    }

    /// Replaces the orientation with one built from Euler degrees.
    pub fn set_rotation(&mut self, euler_degrees: Vector3<f32>) {
        self.rotation = euler_to_quaternion(euler_degrees);
        self.invalidate();
    }

    /// Applies an Euler delta in world space: `rotation = q(delta) * rotation`.
    pub fn add_rotation(&mut self, euler_degrees: Vector3<f32>) {
        self.apply_rotation(euler_to_quaternion(euler_degrees));
    }

    /// Rotates about an arbitrary world-space axis, composed like [`Self::add_rotation`].
    pub fn rotate_around(&mut self, axis: Vector3<f32>, angle_degrees: f32) {
        self.apply_rotation(axis_angle(axis, angle_degrees));
    }

    /// Current orientation as Euler degrees.
    ///
    /// Not guaranteed to return the triple passed to [`Self::set_rotation`]:
    /// several triples describe the same orientation, and near `y = ±90` the
    /// X and Z angles cannot be told apart.
    pub fn rotation(&self) -> Vector3<f32> {
        quaternion_to_euler(self.rotation)
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

    /// Returns the model matrix, recomputing it only after a mutation.
    pub fn model_matrix(&self) -> Matrix4<f32> {
        if self.dirty.get() {
            let translation = Matrix4::from_translation(self.position);
            let rotation = Matrix4::from(self.rotation);
            let scale = Matrix4::from_nonuniform_scale(self.scale.x, self.scale.y, self.scale.z);

            self.model_matrix.set(translation * rotation * scale);
            self.dirty.set(false);
        }

        self.model_matrix.get()
    }

    /// Whether the next [`Self::model_matrix`] call will recompute.
    pub fn is_dirty(&self) -> bool {
        self.dirty.get()
    }

    fn apply_rotation(&mut self, rotation: Quaternion<f32>) {
        self.rotation = rotation * self.rotation;
        self.invalidate();
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
    fn test_defaults_are_identity() {
        let transform = Transform::new();
        assert!(!transform.is_dirty());
        assert_mat4_eq(transform.model_matrix(), Matrix4::identity());
        assert_vec3_eq(transform.scale(), Vector3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_position_only_gives_pure_translation() {
        for position in [
            Vector3::new(1.0, 2.0, 3.0),
            Vector3::new(-4.5, 0.0, 12.25),
            Vector3::new(0.0, -0.3, 2.5),
        ] {
            let mut transform = Transform::new();
            transform.set_position(position);
            assert_mat4_eq(transform.model_matrix(), Matrix4::from_translation(position));
        }
    }

    #[test]
    fn test_scale_only_gives_pure_scale_including_negative() {
        for (x, y, z) in [(2.0, 3.0, 4.0), (-1.0, 1.0, 1.0), (0.3, -0.5, -2.0)] {
            let mut transform = Transform::new();
            transform.set_scale(x, y, z);
            assert_mat4_eq(
                transform.model_matrix(),
                Matrix4::from_nonuniform_scale(x, y, z),
            );
        }
    }

    #[test]
    fn test_scale_is_applied_before_rotation_and_translation() {
        let mut transform = Transform::new();
        transform.set_scale(2.0, 1.0, 1.0);
        transform.set_rotation(Vector3::new(0.0, 90.0, 0.0));
        transform.set_position(Vector3::new(0.0, 0.0, 10.0));

        // Local +X is stretched to 2, turned onto -Z by the yaw, then pushed forward.
        let moved = project(transform.model_matrix(), Vector3::new(1.0, 0.0, 0.0));
        assert_vec3_eq(moved, Vector3::new(0.0, 0.0, 8.0));
    }

    #[test]
    fn test_mutators_invalidate_cache() {
        let mut transform = Transform::new();
        transform.set_position(Vector3::new(1.0, 0.0, 0.0));
        assert!(transform.is_dirty());

        let first = transform.model_matrix();
        assert!(!transform.is_dirty());
        assert_mat4_eq(transform.model_matrix(), first);

        transform.move_by(Vector3::new(1.0, 0.0, 0.0));
        assert!(transform.is_dirty());
        assert_mat4_eq(
            transform.model_matrix(),
            Matrix4::from_translation(Vector3::new(2.0, 0.0, 0.0)),
        );

        transform.set_uniform_scale(0.5);
        assert!(transform.is_dirty());
        transform.model_matrix();

        transform.rotate_around(BASE_UP, 10.0);
        assert!(transform.is_dirty());
    }

    #[test]
    fn test_add_rotation_premultiplies() {
        let e = Vector3::new(30.0, 60.0, 0.0);

        let mut composed = Transform::new();
        composed.set_rotation(e);
        composed.add_rotation(e);

        let expected = euler_to_quaternion(e) * euler_to_quaternion(e);
        for axis in [BASE_FORWARD, BASE_UP, BASE_RIGHT] {
            assert_vec3_eq(composed.orientation() * axis, expected * axis);
        }

        // Rotations about different axes do not commute, so this is not 2e.
        let mut doubled = Transform::new();
        doubled.set_rotation(e * 2.0);
        let difference = (composed.forward() - doubled.forward()).magnitude();
        assert!(difference > 1e-2, "expected composition to differ from 2e");
    }

    #[test]
    fn test_add_rotation_is_applied_in_world_space() {
        let mut transform = Transform::new();
        transform.set_rotation(Vector3::new(90.0, 0.0, 0.0));
        transform.add_rotation(Vector3::new(0.0, 90.0, 0.0));

        // Pitched forward points down; a world-space yaw leaves it pointing down.
        assert_vec3_eq(transform.forward(), Vector3::new(0.0, -1.0, 0.0));
    }

    #[test]
    fn test_rotate_around_matches_add_rotation_for_world_axis() {
        let mut by_axis = Transform::new();
        by_axis.set_rotation(Vector3::new(20.0, 0.0, 0.0));
        by_axis.rotate_around(BASE_UP, 35.0);

        let mut by_euler = Transform::new();
        by_euler.set_rotation(Vector3::new(20.0, 0.0, 0.0));
        by_euler.add_rotation(Vector3::new(0.0, 35.0, 0.0));

        assert_vec3_eq(by_axis.forward(), by_euler.forward());
        assert_vec3_eq(by_axis.up(), by_euler.up());
    }

    #[test]
    fn test_basis_is_orthonormal_for_any_rotation() {
        let mut transform = Transform::new();
        let steps = [
            Vector3::new(10.0, 20.0, 30.0),
            Vector3::new(-45.0, 170.0, 5.0),
            Vector3::new(89.0, -89.0, 89.0),
            Vector3::new(0.0, 0.0, -120.0),
        ];

        for step in steps {
            transform.add_rotation(step);
            transform.rotate_around(Vector3::new(1.0, 1.0, 0.0), 17.0);

            let (f, u, r) = (transform.forward(), transform.up(), transform.right());
            assert!(approx(f.magnitude(), 1.0));
            assert!(approx(u.magnitude(), 1.0));
            assert!(approx(r.magnitude(), 1.0));
            assert!(approx(f.dot(u), 0.0));
            assert!(approx(f.dot(r), 0.0));
            assert!(approx(u.dot(r), 0.0));
        }
    }

    #[test]
    fn test_rotation_reports_euler_degrees() {
        let mut transform = Transform::new();
        transform.set_rotation(Vector3::new(10.0, -35.0, 50.0));
        assert_vec3_eq(transform.rotation(), Vector3::new(10.0, -35.0, 50.0));
    }
}
