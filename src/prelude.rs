//! # Kiln Prelude
//!
//! Commonly used types in one import.
//!
//! ```no_run
//! use kiln::prelude::*;
//!
//! fn main() -> Result<(), EngineError> {
//!     let mut app = KilnApp::new(AppConfig::default());
//!     app.on_setup(|scene, resources| {
//!         let cube = resources.load_model("cube.obj")?;
//!         let handle = scene.create_object(Some(cube));
//!         if let Some(object) = scene.object_mut(handle) {
//!             object.set_position(0.0, 0.0, 2.5);
//!         }
//!         Ok(())
//!     });
//!     app.run()
//! }
//! ```

pub use crate::app::KilnApp;
pub use crate::config::{AppConfig, CameraConfig, ControlConfig};
pub use crate::error::{EngineError, Result};
pub use crate::gfx::{
    camera::{Camera, FlightController},
    resources::ResourceManager,
    scene::{MeshResource, ObjectHandle, Scene, SceneObject, Vertex3D},
    transform::Transform,
};
pub use crate::input::{InputAxis, InputEvent, InputManager};
pub use crate::session::{EventOutcome, Session};
pub use crate::timing::FrameLimiter;

pub use cgmath::{Quaternion, Vector3};
