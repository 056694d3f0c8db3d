//! First-person fly camera.
//!
//! Pointer motion turns the camera (yaw/pitch in degrees, pitch clamped),
//! the scroll wheel narrows or widens the field of view, and held keys move
//! it along its look and strafe axes at a frame-rate independent speed.
//! Nothing here touches a window or a GPU; hosts feed raw input in and read
//! the view matrix and field of view back out each frame.

pub mod camera;
pub mod config;
pub mod error;
pub mod timing;

pub use camera::{FlyCamera, Movement, Projection};
pub use config::{CameraConfig, CameraSettings};
pub use error::ConfigError;
pub use timing::FrameClock;
