//! Application configuration
//!
//! Plain data with defaults and `with_*` builders. The viewer binary fills
//! these from the command line; library users build them directly.

use std::path::PathBuf;

use cgmath::Vector3;

use crate::gfx::camera::Camera;

/// Lens and starting pose of the camera.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraConfig {
    /// Vertical field of view in degrees.
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    pub position: [f32; 3],
    pub pitch: f32,
    pub yaw: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov: 45.0,
            near: 0.1,
            far: 50.0,
            position: [0.0, 0.0, 0.0],
            pitch: 0.0,
            yaw: 0.0,
        }
    }
}

impl CameraConfig {
    pub fn with_fov(mut self, fov: f32) -> Self {
        self.fov = fov;
        self
    }

    pub fn with_clip_range(mut self, near: f32, far: f32) -> Self {
        self.near = near;
        self.far = far;
        self
    }

    pub fn with_position(mut self, position: [f32; 3]) -> Self {
        self.position = position;
        self
    }

    /// Aspect ratio comes from the window and is not part of the config.
    pub fn build_camera(&self, width: u32, height: u32) -> Camera {
        let mut camera = Camera::new();
        camera.set_fov(self.fov);
        camera.set_clip_range(self.near, self.far);
        camera.set_position(Vector3::from(self.position));
        camera.set_rotation(self.pitch, self.yaw, 0.0);
        if width > 0 && height > 0 {
            camera.set_aspect_ratio_from_size(width, height);
        }
        camera
    }
}

/// Speeds for the fly-through controls.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlConfig {
    /// Units per second.
    pub velocity: f32,
    /// Degrees per mouse unit per second while looking around.
    pub look_sensitivity: f32,
    /// Degrees per mouse unit per second while rotating an object.
    pub drag_sensitivity: f32,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            velocity: 1.0,
            look_sensitivity: 6.0,
            drag_sensitivity: 12.0,
        }
    }
}

impl ControlConfig {
    pub fn with_velocity(mut self, velocity: f32) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_look_sensitivity(mut self, sensitivity: f32) -> Self {
        self.look_sensitivity = sensitivity;
        self
    }

    pub fn with_drag_sensitivity(mut self, sensitivity: f32) -> Self {
        self.drag_sensitivity = sensitivity;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Frame-rate ceiling; `0` renders as fast as the loop spins.
    pub max_fps: u32,
    pub vsync: bool,
    pub clear_color: [f32; 4],
    pub models_dir: PathBuf,
    pub camera: CameraConfig,
    pub controls: ControlConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "Kiln".to_string(),
            width: 1280,
            height: 720,
            max_fps: 120,
            vsync: true,
            clear_color: [0.1, 0.2, 0.3, 1.0],
            models_dir: PathBuf::from("assets/models"),
            camera: CameraConfig::default(),
            controls: ControlConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.to_owned();
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_max_fps(mut self, max_fps: u32) -> Self {
        self.max_fps = max_fps;
        self
    }

    pub fn with_vsync(mut self, vsync: bool) -> Self {
        self.vsync = vsync;
        self
    }

    pub fn with_clear_color(mut self, rgba: [f32; 4]) -> Self {
        self.clear_color = rgba;
        self
    }

    pub fn with_models_dir(mut self, models_dir: impl Into<PathBuf>) -> Self {
        self.models_dir = models_dir.into();
        self
    }

    pub fn with_camera(mut self, camera: CameraConfig) -> Self {
        self.camera = camera;
        self
    }

    pub fn with_controls(mut self, controls: ControlConfig) -> Self {
        self.controls = controls;
        self
    }
}
