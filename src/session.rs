//! Per-frame engine state independent of any window or GPU
//!
//! The [`Session`] owns the scene, camera, input state and controller. The
//! app feeds it events and asks it for draw lists; tests drive it directly.

use std::time::Duration;

use log::{debug, info, warn};
use winit::{event::ElementState, keyboard::KeyCode};

use crate::{
    config::AppConfig,
    gfx::{
        camera::{Camera, FlightController},
        rendering::{build_draw_list, DrawCall},
        scene::Scene,
    },
    input::{InputEvent, InputManager},
};

/// What the app should do after an event has been handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    Continue,
    Exit,
    /// The surface must be resized to match.
    Resized { width: u32, height: u32 },
    /// A zero-sized resize (minimised window) was dropped.
    ResizeIgnored,
    /// The vsync toggle key was pressed.
    ToggleVsync,
}

/// Flips vertical sync at runtime.
pub const VSYNC_TOGGLE_KEY: KeyCode = KeyCode::KeyV;

pub struct Session {
    pub scene: Scene,
    pub camera: Camera,
    pub input: InputManager,
    pub controller: FlightController,
}

impl Session {
    pub fn new(scene: Scene, camera: Camera, controller: FlightController) -> Self {
        Self {
            scene,
            camera,
            input: InputManager::new(),
            controller,
        }
    }

    /// Empty scene with camera and controls taken from `config`.
    pub fn from_config(config: &AppConfig) -> Self {
        let mut camera = config.camera.build_camera(config.width, config.height);
        let mut controller = FlightController::from_config(&config.controls);
        // The controller owns yaw/pitch; the camera must start where it does
        controller.set_pitch(config.camera.pitch);
        controller.set_yaw(config.camera.yaw);
        controller.apply_orientation(&mut camera);

        Self::new(Scene::new(), camera, controller)
    }

    pub fn handle_event(&mut self, event: InputEvent) -> EventOutcome {
        match event {
            InputEvent::Close => {
                info!("Close requested");
                EventOutcome::Exit
            }
            InputEvent::Resize { width, height } => {
                if width == 0 || height == 0 {
                    warn!("Ignoring resize to {}x{}", width, height);
                    return EventOutcome::ResizeIgnored;
                }
                self.camera.set_aspect_ratio_from_size(width, height);
                debug!("Resized to {}x{}", width, height);
                EventOutcome::Resized { width, height }
            }
            InputEvent::Focus(focused) => {
                if !focused {
                    debug!("Window lost focus, clearing input state");
                    self.input.notify_lost_focus();
                }
                EventOutcome::Continue
            }
            InputEvent::Keyboard { key, state } => {
                self.input.notify_key_state_change(key, state);
                if key == VSYNC_TOGGLE_KEY && state == ElementState::Pressed {
                    return EventOutcome::ToggleVsync;
                }
                EventOutcome::Continue
            }
            InputEvent::PointerButton { button, state } => {
                self.input.notify_mouse_button_change(button, state);
                EventOutcome::Continue
            }
            InputEvent::PointerRawDelta { dx, dy } => {
                self.input.notify_mouse_raw_input(dx, dy);
                EventOutcome::Continue
            }
        }
    }

    /// Runs the controls for one frame, then consumes this frame's axes.
    pub fn update(&mut self, elapsed: Duration) {
        self.controller.update(
            &self.input,
            &mut self.camera,
            &mut self.scene,
            elapsed.as_secs_f32(),
        );
        self.input.notify_update_finished();
    }

    pub fn draw_list(&self) -> Vec<DrawCall> {
        build_draw_list(&self.scene, &self.camera)
    }
}
