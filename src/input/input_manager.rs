use std::collections::{HashMap, HashSet};

use winit::{
    event::{ElementState, MouseButton},
    keyboard::KeyCode,
};

/// Continuous input channels accumulated over a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAxis {
    MouseX,
    MouseY,
}

/// Per-frame input state.
///
/// Keys and buttons are held state: present means down. Axes accumulate raw
/// deltas until [`InputManager::notify_update_finished`] consumes them.
#[derive(Debug, Default)]
pub struct InputManager {
    key_states: HashSet<KeyCode>,
    button_states: HashSet<MouseButton>,
    axis_values: HashMap<InputAxis, f32>,
}

impl InputManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.key_states.contains(&key)
    }

    pub fn is_button_down(&self, button: MouseButton) -> bool {
        self.button_states.contains(&button)
    }

    /// Accumulated value for this frame, `0.0` if nothing arrived.
    pub fn axis(&self, axis: InputAxis) -> f32 {
        self.axis_values.get(&axis).copied().unwrap_or(0.0)
    }

    pub fn notify_key_state_change(&mut self, key: KeyCode, state: ElementState) {
        match state {
            ElementState::Pressed => {
                self.key_states.insert(key);
            }
            ElementState::Released => {
                self.key_states.remove(&key);
            }
        }
    }

    pub fn notify_mouse_button_change(&mut self, button: MouseButton, state: ElementState) {
        match state {
            ElementState::Pressed => {
                self.button_states.insert(button);
            }
            ElementState::Released => {
                self.button_states.remove(&button);
            }
        }
    }

    pub fn notify_mouse_raw_input(&mut self, dx: f32, dy: f32) {
        self.accumulate(InputAxis::MouseX, dx);
        self.accumulate(InputAxis::MouseY, dy);
    }

    /// Axes are per-frame; held keys and buttons carry over.
    pub fn notify_update_finished(&mut self) {
        self.axis_values.clear();
    }

    /// The OS does not always deliver key-up events to an unfocused window,
    /// so everything is dropped rather than left stuck down.
    pub fn notify_lost_focus(&mut self) {
        self.key_states.clear();
        self.button_states.clear();
        self.axis_values.clear();
    }

    fn accumulate(&mut self, axis: InputAxis, delta: f32) {
        if delta != 0.0 {
            *self.axis_values.entry(axis).or_insert(0.0) += delta;
        }
    }
}
