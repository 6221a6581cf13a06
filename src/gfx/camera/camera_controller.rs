use cgmath::{InnerSpace, Vector3, Zero};
use winit::{event::MouseButton, keyboard::KeyCode};

use crate::{
    config::ControlConfig,
    gfx::scene::Scene,
    input::{InputAxis, InputManager},
};

use super::camera::Camera;

/// Fly-through camera and drag-to-rotate object controls.
///
/// Yaw and pitch live here rather than being read back from the camera's
/// quaternion each frame: repeated quaternion/Euler round trips drift and
/// become ambiguous near the poles.
///
/// - `Q`/`E`: up/down, `W`/`S`: forward/back, `A`/`D`: strafe
/// - right mouse drag: look around
/// - left mouse drag: rotate the first scene object
#[derive(Debug, Clone)]
pub struct FlightController {
    /// Units per second.
    pub velocity: f32,
    /// Degrees per unit of mouse motion per second while looking.
    pub look_sensitivity: f32,
    /// Degrees per unit of mouse motion per second while dragging an object.
    pub drag_sensitivity: f32,
    yaw: f32,
    pitch: f32,
}

impl Default for FlightController {
    fn default() -> Self {
        Self::from_config(&ControlConfig::default())
    }
}

impl FlightController {
    pub fn new(velocity: f32, look_sensitivity: f32, drag_sensitivity: f32) -> Self {
        Self {
            velocity,
            look_sensitivity,
            drag_sensitivity,
            yaw: 0.0,
            pitch: 0.0,
        }
    }

    pub fn from_config(config: &ControlConfig) -> Self {
        Self::new(
            config.velocity,
            config.look_sensitivity,
            config.drag_sensitivity,
        )
    }

    /// Yaw in degrees, always within `[0, 360)`.
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn set_yaw(&mut self, yaw: f32) {
        let wrapped = yaw.rem_euclid(360.0);
        // rem_euclid can round tiny negatives up to exactly 360
        self.yaw = if wrapped >= 360.0 { 0.0 } else { wrapped };
    }

    pub fn add_yaw(&mut self, delta: f32) {
        self.set_yaw(self.yaw + delta);
    }

    /// Pitch in degrees, always within `[-90, 90]`.
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn set_pitch(&mut self, pitch: f32) {
        self.pitch = pitch.clamp(-90.0, 90.0);
    }

    pub fn add_pitch(&mut self, delta: f32) {
        self.set_pitch(self.pitch + delta);
    }

    /// Pushes the stored yaw/pitch into the camera.
    pub fn apply_orientation(&self, camera: &mut Camera) {
        camera.set_rotation(self.pitch, self.yaw, 0.0);
    }

    /// One frame of control: move, look, then drag.
    pub fn update(
        &mut self,
        input: &InputManager,
        camera: &mut Camera,
        scene: &mut Scene,
        elapsed_seconds: f32,
    ) {
        self.fly(input, camera, elapsed_seconds);

        if input.is_button_down(MouseButton::Right) {
            self.look(input, camera, elapsed_seconds);
        }

        if input.is_button_down(MouseButton::Left) {
            self.drag_first_object(input, camera, scene, elapsed_seconds);
        }
    }

    fn fly(&self, input: &InputManager, camera: &mut Camera, elapsed_seconds: f32) {
        let bindings = [
            (KeyCode::KeyQ, camera.up()),
            (KeyCode::KeyE, -camera.up()),
            (KeyCode::KeyW, camera.forward()),
            (KeyCode::KeyS, -camera.forward()),
            (KeyCode::KeyD, camera.right()),
            (KeyCode::KeyA, -camera.right()),
        ];

        let direction = bindings
            .iter()
            .filter(|(key, _)| input.is_key_down(*key))
            .fold(Vector3::zero(), |sum, (_, axis)| sum + *axis);

        // Opposite keys cancel out; normalising a zero vector would give NaN
        if direction.magnitude2() > f32::EPSILON {
            camera.move_by(direction.normalize() * self.velocity * elapsed_seconds);
        }
    }

    fn look(&mut self, input: &InputManager, camera: &mut Camera, elapsed_seconds: f32) {
        let scale = self.look_sensitivity * elapsed_seconds;
        self.add_yaw(input.axis(InputAxis::MouseX) * scale);
        self.add_pitch(input.axis(InputAxis::MouseY) * scale);
        self.apply_orientation(camera);
    }

    fn drag_first_object(
        &self,
        input: &InputManager,
        camera: &Camera,
        scene: &mut Scene,
        elapsed_seconds: f32,
    ) {
        let Some(object) = scene.first_mut() else {
            return;
        };

        let scale = self.drag_sensitivity * elapsed_seconds;
        let delta_x = input.axis(InputAxis::MouseX) * scale;
        let delta_y = input.axis(InputAxis::MouseY) * scale;

        if delta_x != 0.0 {
            object.add_rotation(0.0, -delta_x, 0.0);
        }
        if delta_y != 0.0 {
            // Around the camera's right axis so dragging feels screen-relative
            object.rotate_around(camera.right(), -delta_y);
        }
    }
}
