//! Asset loading and GPU resources

pub mod resource_manager;
pub mod texture_resource;

pub use resource_manager::{build_mesh, parse_obj, ResourceManager, DEFAULT_VERTEX_COLOR};
pub use texture_resource::TextureResource;
