//! Coordinate conventions and matrix builders
//!
//! Kiln works in a left-handed space: +X right, +Y up, +Z forward, with clip
//! depth in `[0, 1]` as wgpu expects. cgmath's own `perspective` targets the
//! right-handed OpenGL convention, so the projection and view builders live here.
//!
//! Euler angles are `(x, y, z)` in degrees, applied about the fixed world axes
//! in the order X, then Y, then Z. As a quaternion that is `qz * qy * qx`, which
//! for a camera rotation `(pitch, yaw, 0)` means pitch about the local right axis
//! followed by yaw about world up, so the horizon never rolls.

use cgmath::{InnerSpace, Matrix4, Quaternion, Rad, Rotation3, Vector3};

pub const BASE_FORWARD: Vector3<f32> = Vector3::new(0.0, 0.0, 1.0);
pub const BASE_UP: Vector3<f32> = Vector3::new(0.0, 1.0, 0.0);
pub const BASE_RIGHT: Vector3<f32> = Vector3::new(1.0, 0.0, 0.0);

/// Past this value of `sin(y)` the X and Z angles are no longer separable.
const GIMBAL_LOCK_THRESHOLD: f32 = 0.999_999;

pub fn identity_rotation() -> Quaternion<f32> {
    Quaternion::new(1.0, 0.0, 0.0, 0.0)
}

/// Converts Euler angles in degrees to a unit quaternion (`qz * qy * qx`).
pub fn euler_to_quaternion(degrees: Vector3<f32>) -> Quaternion<f32> {
    let qx = Quaternion::from_angle_x(Rad(degrees.x.to_radians()));
    let qy = Quaternion::from_angle_y(Rad(degrees.y.to_radians()));
    let qz = Quaternion::from_angle_z(Rad(degrees.z.to_radians()));
    (qz * qy * qx).normalize()
}

/// Decomposes a rotation back into Euler degrees under the same convention as
/// [`euler_to_quaternion`].
///
/// The result is one of several equivalent triples: `y` lands in `[-90, 90]`
/// and `x`, `z` in `(-180, 180]`. At `y = ±90` the X and Z rotations collapse
/// onto one axis, so the whole angle is reported on X and Z is zero.
pub fn quaternion_to_euler(rotation: Quaternion<f32>) -> Vector3<f32> {
    let q = rotation.normalize();
    let (w, x, y, z) = (q.s, q.v.x, q.v.y, q.v.z);

    let sin_y = (2.0 * (w * y - x * z)).clamp(-1.0, 1.0);

    if sin_y.abs() >= GIMBAL_LOCK_THRESHOLD {
        let r01 = 2.0 * (x * y - w * z);
        let r11 = 1.0 - 2.0 * (x * x + z * z);
        let angle_x = (sin_y.signum() * r01).atan2(r11);
        return Vector3::new(
            angle_x.to_degrees(),
            sin_y.signum() * 90.0,
            0.0,
        );
    }

    let angle_x = (2.0 * (y * z + w * x)).atan2(1.0 - 2.0 * (x * x + y * y));
    let angle_y = sin_y.asin();
    let angle_z = (2.0 * (x * y + w * z)).atan2(1.0 - 2.0 * (y * y + z * z));

    Vector3::new(
        angle_x.to_degrees(),
        angle_y.to_degrees(),
        angle_z.to_degrees(),
    )
}

/// Axis-angle rotation with the angle in degrees. The axis is normalised here
/// so callers can pass any non-zero direction.
pub fn axis_angle(axis: Vector3<f32>, degrees: f32) -> Quaternion<f32> {
    Quaternion::from_axis_angle(axis.normalize(), Rad(degrees.to_radians()))
}

/// Left-handed perspective projection mapping depth to `[0, 1]`.
#[rustfmt::skip]
pub fn perspective_lh_zo(fov_y_degrees: f32, aspect_ratio: f32, near: f32, far: f32) -> Matrix4<f32> {
    let focal = 1.0 / (fov_y_degrees.to_radians() * 0.5).tan();
    let depth_scale = far / (far - near);

    Matrix4::new(
        focal / aspect_ratio, 0.0,   0.0,                  0.0,
        0.0,                  focal, 0.0,                  0.0,
        0.0,                  0.0,   depth_scale,          1.0,
        0.0,                  0.0,   -near * depth_scale,  0.0,
    )
}

/// Left-handed view matrix for an eye looking along `direction`.
///
/// `up` must not be parallel to `direction`; the camera always passes its own
/// rotated up vector, which is perpendicular by construction.
#[rustfmt::skip]
pub fn look_to_lh(eye: Vector3<f32>, direction: Vector3<f32>, up: Vector3<f32>) -> Matrix4<f32> {
    let f = direction.normalize();
    let s = up.cross(f).normalize();
    let u = f.cross(s);

    Matrix4::new(
        s.x,          u.x,          f.x,          0.0,
        s.y,          u.y,          f.y,          0.0,
        s.z,          u.z,          f.z,          0.0,
        -s.dot(eye),  -u.dot(eye),  -f.dot(eye),  1.0,
    )
}
