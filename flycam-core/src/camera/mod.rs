mod fly;
mod projection;

pub use fly::{front_from_angles, FlyCamera, Movement, DEFAULT_PITCH, DEFAULT_YAW, DEFAULT_ZOOM};
pub use projection::{Projection, DEFAULT_ZFAR, DEFAULT_ZNEAR};
