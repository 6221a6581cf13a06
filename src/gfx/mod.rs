//! # Graphics Module
//!
//! Everything between a loaded mesh and pixels on screen.
//!
//! - **Math** ([`math`]) - Left-handed conventions, Euler/quaternion conversion
//! - **Transforms** ([`transform`]) - Position/rotation/scale with a cached model matrix
//! - **Camera** ([`camera`]) - Perspective camera and the fly-through controller
//! - **Scene** ([`scene`]) - Shared meshes and the flat object list
//! - **Rendering** ([`rendering`]) - Draw list traversal and the wgpu backend
//! - **Resources** ([`resources`]) - OBJ loading and GPU textures
//!
//! ```no_run
//! use kiln::gfx::{camera::Camera, rendering::build_draw_list, scene::Scene};
//!
//! let scene = Scene::new();
//! let camera = Camera::new();
//! let draw_calls = build_draw_list(&scene, &camera);
//! assert!(draw_calls.is_empty());
//! ```

pub mod camera;
pub mod math;
pub mod rendering;
pub mod resources;
pub mod scene;
pub mod transform;

pub use camera::{Camera, FlightController};
pub use rendering::render_engine::RenderEngine;
pub use resources::ResourceManager;
