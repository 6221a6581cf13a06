pub mod camera;
pub mod camera_controller;

pub use camera::Camera;
pub use camera_controller::FlightController;
