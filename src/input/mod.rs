//! Input state tracking
//!
//! Raw winit events become [`InputEvent`]s, which feed the [`InputManager`]
//! that the per-frame update step queries.

pub mod event;
pub mod input_manager;

pub use event::InputEvent;
pub use input_manager::{InputAxis, InputManager};
