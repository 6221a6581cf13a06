//! Discrete input events the engine reacts to
//!
//! winit reports window and device events separately; both are folded into
//! [`InputEvent`] so the session has a single dispatch point that can be
//! driven without a window in tests.

use winit::{
    dpi::PhysicalSize,
    event::{DeviceEvent, ElementState, KeyEvent, MouseButton, WindowEvent},
    keyboard::{KeyCode, PhysicalKey},
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Close,
    Resize { width: u32, height: u32 },
    Focus(bool),
    Keyboard { key: KeyCode, state: ElementState },
    PointerButton { button: MouseButton, state: ElementState },
    /// Unaccelerated pointer motion, in device units.
    PointerRawDelta { dx: f32, dy: f32 },
}

impl InputEvent {
    /// Translates the window events Kiln cares about. Repeated key presses
    /// are dropped since held state is tracked separately.
    pub fn from_window_event(event: &WindowEvent) -> Option<Self> {
        match event {
            WindowEvent::CloseRequested => Some(Self::Close),
            WindowEvent::Resized(PhysicalSize { width, height }) => Some(Self::Resize {
                width: *width,
                height: *height,
            }),
            WindowEvent::Focused(focused) => Some(Self::Focus(*focused)),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state,
                        repeat: false,
                        ..
                    },
                ..
            } => Some(Self::Keyboard {
                key: *key,
                state: *state,
            }),
            WindowEvent::MouseInput { state, button, .. } => Some(Self::PointerButton {
                button: *button,
                state: *state,
            }),
            _ => None,
        }
    }

    pub fn from_device_event(event: &DeviceEvent) -> Option<Self> {
        match event {
            DeviceEvent::MouseMotion { delta: (dx, dy) } => Some(Self::PointerRawDelta {
                dx: *dx as f32,
                dy: *dy as f32,
            }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_events_translate() {
        assert_eq!(
            InputEvent::from_window_event(&WindowEvent::CloseRequested),
            Some(InputEvent::Close)
        );
        assert_eq!(
            InputEvent::from_window_event(&WindowEvent::Resized(PhysicalSize::new(640, 480))),
            Some(InputEvent::Resize {
                width: 640,
                height: 480
            })
        );
        assert_eq!(
            InputEvent::from_window_event(&WindowEvent::Focused(false)),
            Some(InputEvent::Focus(false))
        );
    }

    #[test]
    fn test_mouse_motion_translates() {
        let event = DeviceEvent::MouseMotion { delta: (3.0, -2.0) };
        assert_eq!(
            InputEvent::from_device_event(&event),
            Some(InputEvent::PointerRawDelta { dx: 3.0, dy: -2.0 })
        );
    }
}
